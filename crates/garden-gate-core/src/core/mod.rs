// crates/garden-gate-core/src/core/mod.rs
// ============================================================================
// Module: Core Domain Model
// Description: Identifiers, access enums, records, and time values.
// Purpose: Group the canonical domain shapes used across Garden Gate.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core domain model groups typed identifiers, the closed role and locale
//! enums, domain records for the three surfaces, and the canonical timestamp
//! representation. Everything here is plain data with stable wire forms.

pub mod access;
pub mod identifiers;
pub mod records;
pub mod time;
