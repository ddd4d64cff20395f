// crates/garden-gate-contract/src/lib.rs
// ============================================================================
// Module: Garden Gate Contract
// Description: Canonical tool surface for the Garden Gate machine gateway.
// Purpose: Provide surfaces, tool names, input schemas, and localized messages.
// Dependencies: garden-gate-core, serde_json
// ============================================================================

//! ## Overview
//! The contract crate is the single source of truth for the machine-callable
//! tool surface: the three surfaces, every tool name with its aliases, the
//! declarative input schemas that drive validation and `tools/list`, and the
//! localized message catalog. Registries built from this crate are immutable
//! configuration: constructed once at startup and read-only afterwards.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod messages;
pub mod schema;
pub mod surface;
pub mod tooling;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use messages::FaultMessage;
pub use schema::FieldKind;
pub use schema::FieldSpec;
pub use schema::FieldViolation;
pub use schema::InputSchema;
pub use schema::ValidatedArgs;
pub use surface::Surface;
pub use tooling::ToolDefinition;
pub use tooling::ToolName;
pub use tooling::normalize_tool_name;
pub use tooling::surface_tools;
pub use tooling::tool_definitions;
