// crates/garden-gate-mcp/src/lib.rs
// ============================================================================
// Module: Garden Gate MCP
// Description: Machine-tool gateway server for the Garden Gate product.
// Purpose: Expose directory, garden, and commerce tools via JSON-RPC 2.0.
// Dependencies: garden-gate-config, garden-gate-contract, garden-gate-core, axum
// ============================================================================

//! ## Overview
//! The gateway crate wires bearer-token authentication, role permissions, and
//! declarative argument validation in front of the store collaborators. Each
//! surface is served under its own HTTP path and shares one dispatch pipeline:
//! parse, authenticate, authorize, resolve, validate, invoke. Every response,
//! success or fault, carries a server-issued correlation identifier.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod correlation;
pub mod errors;
pub mod permissions;
pub mod server;
pub mod telemetry;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::GatewayAuditEvent;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use auth::AuthFailure;
pub use auth::Identity;
pub use auth::TokenVerifier;
pub use auth::parse_bearer_token;
pub use correlation::CorrelationIdGenerator;
pub use errors::GatewayFault;
pub use permissions::PermissionRegistry;
pub use server::GatewayServer;
pub use server::GatewayServerError;
pub use server::GatewayStores;
pub use tools::ToolInvoker;
