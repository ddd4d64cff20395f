// crates/garden-gate-config/src/lib.rs
// ============================================================================
// Module: Garden Gate Config
// Description: Configuration loading and validation for the gateway.
// Purpose: Provide strict, fail-closed configuration with hard limits.
// Dependencies: garden-gate-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration for the Garden Gate gateway: bind address, body limits,
//! token verification settings, and the default response locale. Loading is
//! fail closed: a present-but-invalid file refuses to start the server
//! rather than falling back to defaults.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuthConfig;
pub use config::ConfigError;
pub use config::GardenGateConfig;
pub use config::LocaleConfig;
pub use config::ServerConfig;
pub use config::SigningSecret;
