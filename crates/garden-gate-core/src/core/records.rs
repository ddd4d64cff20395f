// crates/garden-gate-core/src/core/records.rs
// ============================================================================
// Module: Domain Records
// Description: Directory, garden, and commerce record shapes.
// Purpose: Provide canonical serializable records returned by the stores.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Domain records are the payloads the tool gateway returns to callers.
//! They are snapshots: stores hand out owned copies and the gateway never
//! mutates them in place. Monetary amounts are integer cents to avoid
//! floating-point drift in cart math.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ActivityId;
use crate::core::identifiers::CartId;
use crate::core::identifiers::GardenId;
use crate::core::identifiers::OrderId;
use crate::core::identifiers::PlantId;
use crate::core::identifiers::ProductId;
use crate::core::identifiers::UserId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Directory Records
// ============================================================================

/// Plant entry in the directory catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    /// Plant identifier.
    pub id: PlantId,
    /// Croatian display name.
    pub name_hr: String,
    /// English display name.
    pub name_en: String,
    /// Botanical (Latin) name.
    pub latin_name: String,
    /// Sowing months (1-12).
    pub sowing_months: Vec<u8>,
    /// Days from sowing to harvest.
    pub days_to_harvest: u16,
    /// Companion plant identifiers.
    pub companions: Vec<PlantId>,
}

/// Directory entity kinds searchable across the catalog.
///
/// # Invariants
/// - Serialized as `snake_case` for wire stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Plant catalog entries.
    Plant,
    /// Pest and disease entries.
    Pest,
    /// Growing-guide articles.
    Guide,
}

impl EntityKind {
    /// Returns a stable label for this entity kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plant => "plant",
            Self::Pest => "pest",
            Self::Guide => "guide",
        }
    }
}

/// Generic directory entity returned by cross-catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntity {
    /// Entity identifier within its kind.
    pub id: String,
    /// Entity kind.
    pub kind: EntityKind,
    /// Croatian display name.
    pub name_hr: String,
    /// English display name.
    pub name_en: String,
    /// Short description used in search results.
    pub summary: String,
}

// ============================================================================
// SECTION: Garden Records
// ============================================================================

/// Raised bed inside a garden with its planted slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaisedBed {
    /// Bed position index within the garden (0-based).
    pub index: u16,
    /// Plants assigned to this bed.
    pub plants: Vec<PlantId>,
}

/// Garden owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenRecord {
    /// Garden identifier.
    pub id: GardenId,
    /// Owning user.
    pub owner: UserId,
    /// Display name chosen by the owner.
    pub name: String,
    /// Raised beds in layout order.
    pub beds: Vec<RaisedBed>,
    /// Creation time.
    pub created_at: Timestamp,
}

/// Activity log entry recorded against a garden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenActivityRecord {
    /// Activity identifier.
    pub id: ActivityId,
    /// Garden the activity belongs to.
    pub garden_id: GardenId,
    /// Activity kind label (watering, sowing, harvest, ...).
    pub kind: String,
    /// Free-form note supplied by the caller.
    pub note: String,
    /// Time the activity was recorded.
    pub recorded_at: Timestamp,
}

// ============================================================================
// SECTION: Commerce Records
// ============================================================================

/// Product entry in the commerce catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identifier.
    pub id: ProductId,
    /// Croatian display name.
    pub name_hr: String,
    /// English display name.
    pub name_en: String,
    /// Product category label.
    pub category: String,
    /// Unit price in euro cents.
    pub price_cents: u32,
    /// Units currently in stock.
    pub stock: u32,
}

/// Single line item in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity of units.
    pub quantity: u32,
    /// Unit price in euro cents captured when the item was added.
    pub unit_price_cents: u32,
}

/// Shopping cart scoped to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Cart identifier.
    pub id: CartId,
    /// Owning user.
    pub owner: UserId,
    /// Line items in insertion order.
    pub items: Vec<CartItem>,
}

impl CartRecord {
    /// Returns the cart total in euro cents.
    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity) * u64::from(item.unit_price_cents))
            .sum()
    }
}

/// Order lifecycle status.
///
/// # Invariants
/// - Serialized as `snake_case` for wire stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order accepted, awaiting fulfilment.
    Pending,
    /// Order shipped to the customer.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Returns a stable label for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Completed order created from a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier.
    pub id: OrderId,
    /// Owning user.
    pub owner: UserId,
    /// Line items captured at checkout.
    pub items: Vec<CartItem>,
    /// Order total in euro cents.
    pub total_cents: u64,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Creation time.
    pub created_at: Timestamp,
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

    use super::CartItem;
    use super::CartRecord;
    use crate::core::identifiers::CartId;
    use crate::core::identifiers::ProductId;
    use crate::core::identifiers::UserId;

    #[test]
    fn cart_total_sums_line_items() {
        let cart = CartRecord {
            id: CartId::new("cart-1"),
            owner: UserId::new("user-1"),
            items: vec![
                CartItem {
                    product_id: ProductId::new("p-1"),
                    quantity: 2,
                    unit_price_cents: 350,
                },
                CartItem {
                    product_id: ProductId::new("p-2"),
                    quantity: 1,
                    unit_price_cents: 1_200,
                },
            ],
        };
        assert_eq!(cart.total_cents(), 1_900);
    }

    #[test]
    fn empty_cart_total_is_zero() {
        let cart = CartRecord {
            id: CartId::new("cart-1"),
            owner: UserId::new("user-1"),
            items: Vec::new(),
        };
        assert_eq!(cart.total_cents(), 0);
    }
}
