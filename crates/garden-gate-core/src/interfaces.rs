// crates/garden-gate-core/src/interfaces.rs
// ============================================================================
// Module: Garden Gate Interfaces
// Description: Backend-agnostic store contracts for the three surfaces.
// Purpose: Define the collaborator boundary consumed by the tool gateway.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Garden Gate integrates with the directory, garden,
//! and commerce stores without embedding backend-specific details.
//!
//! Outcomes at this boundary are split into two explicit variants:
//! [`StoreOutcome::Rejected`] carries expected, recoverable business
//! conditions (not found, not owned, out of stock) that callers branch on,
//! while [`StoreError`] carries unexpected faults that surface as protocol
//! errors. Implementations must fail closed on missing or invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::access::Locale;
use crate::core::identifiers::GardenId;
use crate::core::identifiers::PlantId;
use crate::core::identifiers::ProductId;
use crate::core::identifiers::UserId;
use crate::core::records::CartRecord;
use crate::core::records::DirectoryEntity;
use crate::core::records::EntityKind;
use crate::core::records::GardenActivityRecord;
use crate::core::records::GardenRecord;
use crate::core::records::OrderRecord;
use crate::core::records::PlantRecord;
use crate::core::records::ProductRecord;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Outcome Split
// ============================================================================

/// Expected business rejection kinds.
///
/// # Invariants
/// - Variants are stable for audit labeling and payload branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// The referenced record does not exist.
    NotFound,
    /// The record exists but belongs to another user.
    NotOwned,
    /// Requested quantity exceeds available stock.
    OutOfStock,
    /// The request is valid at the protocol layer but invalid for the domain.
    Invalid,
}

impl RejectionKind {
    /// Returns a stable label for this rejection kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::NotOwned => "not_owned",
            Self::OutOfStock => "out_of_stock",
            Self::Invalid => "invalid",
        }
    }
}

/// Expected business rejection with localized message pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Rejection classification.
    pub kind: RejectionKind,
    /// Croatian message.
    pub message_hr: String,
    /// English message.
    pub message_en: String,
}

impl Rejection {
    /// Creates a rejection with a localized message pair.
    #[must_use]
    pub fn new(kind: RejectionKind, hr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            kind,
            message_hr: hr.into(),
            message_en: en.into(),
        }
    }

    /// Returns the message for the requested locale.
    #[must_use]
    pub fn message(&self, locale: Locale) -> &str {
        locale.pick(&self.message_hr, &self.message_en)
    }
}

/// Store call outcome: success payload or expected business rejection.
///
/// # Invariants
/// - `Rejected` is never used for unexpected faults; those are [`StoreError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome<T> {
    /// Successful payload.
    Ok(T),
    /// Expected, recoverable business rejection.
    Rejected(Rejection),
}

impl<T> StoreOutcome<T> {
    /// Maps the success payload while preserving rejections.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> StoreOutcome<U> {
        match self {
            Self::Ok(value) => StoreOutcome::Ok(op(value)),
            Self::Rejected(rejection) => StoreOutcome::Rejected(rejection),
        }
    }
}

/// Unexpected store faults that surface as protocol errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unavailable or I/O failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// Stored data violated an internal invariant.
    #[error("store corruption: {0}")]
    Corrupted(String),
}

// ============================================================================
// SECTION: Query and Draft Shapes
// ============================================================================

/// Cross-catalog entity search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySearch {
    /// Free-text query matched against names and summaries.
    pub query: String,
    /// Optional entity-kind filter.
    pub kind: Option<EntityKind>,
    /// Maximum number of results.
    pub limit: usize,
}

/// Product search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSearch {
    /// Free-text query matched against product names.
    pub query: String,
    /// Optional category filter.
    pub category: Option<String>,
    /// Maximum number of results.
    pub limit: usize,
}

/// Draft for a new garden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenDraft {
    /// Display name chosen by the owner.
    pub name: String,
    /// Number of raised beds to lay out.
    pub bed_count: u16,
}

/// Draft for planting into a raised bed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingDraft {
    /// Plant to assign.
    pub plant_id: PlantId,
    /// Target bed position index (0-based).
    pub bed_index: u16,
}

/// Draft for a garden activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    /// Activity kind label (watering, sowing, harvest, ...).
    pub kind: String,
    /// Free-form note.
    pub note: String,
    /// Time the activity happened.
    pub recorded_at: Timestamp,
}

/// Cart line-item mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemUpdate {
    /// Product whose line item is updated.
    pub product_id: ProductId,
    /// New quantity; zero removes the line item.
    pub quantity: u32,
}

// ============================================================================
// SECTION: Directory Store
// ============================================================================

/// Read-only directory catalog collaborator.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Lists plants in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn list_plants(&self, limit: usize, offset: usize)
    -> Result<Vec<PlantRecord>, StoreError>;

    /// Fetches a single plant by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn get_plant(&self, id: &PlantId) -> Result<StoreOutcome<PlantRecord>, StoreError>;

    /// Searches entities across the directory catalogs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn search_entities(
        &self,
        search: &EntitySearch,
    ) -> Result<Vec<DirectoryEntity>, StoreError>;
}

// ============================================================================
// SECTION: Garden Store
// ============================================================================

/// Garden and raised-bed collaborator.
#[async_trait]
pub trait GardenStore: Send + Sync {
    /// Lists gardens owned by the user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn list_gardens(&self, owner: &UserId) -> Result<Vec<GardenRecord>, StoreError>;

    /// Fetches a garden, rejecting gardens owned by other users.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn get_garden(
        &self,
        owner: &UserId,
        id: &GardenId,
    ) -> Result<StoreOutcome<GardenRecord>, StoreError>;

    /// Creates a garden for the user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn create_garden(
        &self,
        owner: &UserId,
        draft: GardenDraft,
    ) -> Result<StoreOutcome<GardenRecord>, StoreError>;

    /// Assigns a plant to a raised bed in the user's garden.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn add_plant(
        &self,
        owner: &UserId,
        id: &GardenId,
        draft: PlantingDraft,
    ) -> Result<StoreOutcome<GardenRecord>, StoreError>;

    /// Lists activity log entries for the user's garden, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn list_activities(
        &self,
        owner: &UserId,
        id: &GardenId,
        limit: usize,
    ) -> Result<StoreOutcome<Vec<GardenActivityRecord>>, StoreError>;

    /// Records an activity against the user's garden.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn log_activity(
        &self,
        owner: &UserId,
        id: &GardenId,
        draft: ActivityDraft,
    ) -> Result<StoreOutcome<GardenActivityRecord>, StoreError>;
}

// ============================================================================
// SECTION: Commerce Store
// ============================================================================

/// Commerce catalog, cart, and order collaborator.
#[async_trait]
pub trait CommerceStore: Send + Sync {
    /// Lists products in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn list_products(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ProductRecord>, StoreError>;

    /// Fetches a single product by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn get_product(&self, id: &ProductId)
    -> Result<StoreOutcome<ProductRecord>, StoreError>;

    /// Searches products by name and category.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn search_products(
        &self,
        search: &ProductSearch,
    ) -> Result<Vec<ProductRecord>, StoreError>;

    /// Fetches the user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn get_cart(&self, owner: &UserId) -> Result<StoreOutcome<CartRecord>, StoreError>;

    /// Adds a product to the user's cart, creating the cart when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn add_to_cart(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<StoreOutcome<CartRecord>, StoreError>;

    /// Updates a cart line item; zero quantity removes it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn update_cart_item(
        &self,
        owner: &UserId,
        update: CartItemUpdate,
    ) -> Result<StoreOutcome<CartRecord>, StoreError>;

    /// Creates an order from the user's cart and empties the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn create_order(&self, owner: &UserId) -> Result<StoreOutcome<OrderRecord>, StoreError>;

    /// Lists the user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    async fn list_orders(&self, owner: &UserId, limit: usize)
    -> Result<Vec<OrderRecord>, StoreError>;
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::Rejection;
    use super::RejectionKind;
    use super::StoreOutcome;
    use crate::core::access::Locale;

    #[test]
    fn rejection_message_follows_locale() {
        let rejection =
            Rejection::new(RejectionKind::NotFound, "vrt nije pronađen", "garden not found");
        assert_eq!(rejection.message(Locale::Hr), "vrt nije pronađen");
        assert_eq!(rejection.message(Locale::En), "garden not found");
    }

    #[test]
    fn outcome_map_preserves_rejection() {
        let outcome: StoreOutcome<u32> =
            StoreOutcome::Rejected(Rejection::new(RejectionKind::Invalid, "neispravno", "invalid"));
        let mapped = outcome.map(|value| value + 1);
        assert!(matches!(mapped, StoreOutcome::Rejected(_)));
    }
}
