// crates/garden-gate-core/src/lib.rs
// ============================================================================
// Module: Garden Gate Core
// Description: Domain model and collaborator contracts for Garden Gate.
// Purpose: Provide canonical types and store interfaces for the tool gateway.
// Dependencies: serde, thiserror, async-trait
// ============================================================================

//! ## Overview
//! Garden Gate Core defines the domain records, typed identifiers, and
//! collaborator store contracts shared by the gateway crates. The gateway
//! itself never persists anything; all durable state lives behind the
//! [`DirectoryStore`], [`GardenStore`], and [`CommerceStore`] traits.
//! Business rejections and unexpected faults are split into two explicit
//! result variants at this boundary so callers never have to guess which
//! failures are expected.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod memory;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::access::Locale;
pub use core::access::Role;
pub use core::identifiers::ActivityId;
pub use core::identifiers::CartId;
pub use core::identifiers::GardenId;
pub use core::identifiers::OrderId;
pub use core::identifiers::PlantId;
pub use core::identifiers::ProductId;
pub use core::identifiers::UserId;
pub use core::records::CartItem;
pub use core::records::CartRecord;
pub use core::records::DirectoryEntity;
pub use core::records::EntityKind;
pub use core::records::GardenActivityRecord;
pub use core::records::GardenRecord;
pub use core::records::OrderRecord;
pub use core::records::OrderStatus;
pub use core::records::PlantRecord;
pub use core::records::ProductRecord;
pub use core::records::RaisedBed;
pub use core::time::Timestamp;
pub use interfaces::ActivityDraft;
pub use interfaces::CartItemUpdate;
pub use interfaces::CommerceStore;
pub use interfaces::DirectoryStore;
pub use interfaces::EntitySearch;
pub use interfaces::GardenDraft;
pub use interfaces::GardenStore;
pub use interfaces::PlantingDraft;
pub use interfaces::ProductSearch;
pub use interfaces::Rejection;
pub use interfaces::RejectionKind;
pub use interfaces::StoreError;
pub use interfaces::StoreOutcome;
pub use memory::InMemoryCommerceStore;
pub use memory::InMemoryDirectoryStore;
pub use memory::InMemoryGardenStore;
