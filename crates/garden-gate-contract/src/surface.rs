// crates/garden-gate-contract/src/surface.rs
// ============================================================================
// Module: Gateway Surfaces
// Description: The three independently deployed tool groupings.
// Purpose: Provide surface identities and their minimum read permissions.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A surface is an independently deployed tool grouping sharing a permission
//! domain. Every surface declares a minimum read permission that the
//! dispatcher enforces before any method branch, so an unauthorized caller
//! never reaches tool resolution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Permission Names
// ============================================================================

/// Read permission for the directories surface.
pub const DIRECTORIES_READ: &str = "directories:read";
/// Read permission for the gardens surface.
pub const GARDENS_READ: &str = "gardens:read";
/// Write permission for the gardens surface.
pub const GARDENS_WRITE: &str = "gardens:write";
/// Read permission for the commerce surface.
pub const COMMERCE_READ: &str = "commerce:read";
/// Write permission for the commerce surface.
pub const COMMERCE_WRITE: &str = "commerce:write";

// ============================================================================
// SECTION: Surface
// ============================================================================

/// Independently deployed tool grouping.
///
/// # Invariants
/// - Variants are stable for routing and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Plant/pest/guide directory catalog.
    Directories,
    /// Gardens and raised beds.
    Gardens,
    /// Products, carts, and orders.
    Commerce,
}

impl Surface {
    /// All surfaces in routing order.
    pub const ALL: [Self; 3] = [Self::Directories, Self::Gardens, Self::Commerce];

    /// Returns the stable path segment for this surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directories => "directories",
            Self::Gardens => "gardens",
            Self::Commerce => "commerce",
        }
    }

    /// Parses a request path segment into a surface.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "directories" => Some(Self::Directories),
            "gardens" => Some(Self::Gardens),
            "commerce" => Some(Self::Commerce),
            _ => None,
        }
    }

    /// Returns the minimum permission required to talk to this surface.
    #[must_use]
    pub const fn read_permission(self) -> &'static str {
        match self {
            Self::Directories => DIRECTORIES_READ,
            Self::Gardens => GARDENS_READ,
            Self::Commerce => COMMERCE_READ,
        }
    }
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

    use super::Surface;

    #[test]
    fn parse_round_trips_every_surface() {
        for surface in Surface::ALL {
            assert_eq!(Surface::parse(surface.as_str()), Some(surface));
        }
    }

    #[test]
    fn unknown_segment_is_rejected() {
        assert_eq!(Surface::parse("weather"), None);
        assert_eq!(Surface::parse(""), None);
    }
}
