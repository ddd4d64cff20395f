// crates/garden-gate-core/src/core/access.rs
// ============================================================================
// Module: Access Enums
// Description: Closed role and locale enumerations for caller contexts.
// Purpose: Provide stable, fail-closed labels for authorization and i18n.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Roles and locales are closed enums with stable snake-case wire forms.
//! Unknown values fail deserialization, which keeps authentication fail
//! closed: a token carrying a role outside this set is malformed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Caller role carried in token claims.
///
/// # Invariants
/// - Variants are stable for permission-table membership and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access across all surfaces.
    Admin,
    /// Producer account managing directory and commerce listings.
    Farmer,
    /// Consumer account managing gardens and purchases.
    Gardener,
    /// Read-only account.
    Viewer,
}

impl Role {
    /// Returns a stable label for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Farmer => "farmer",
            Self::Gardener => "gardener",
            Self::Viewer => "viewer",
        }
    }
}

// ============================================================================
// SECTION: Locales
// ============================================================================

/// Response locale for localized payload messages.
///
/// # Invariants
/// - `Hr` is the product default; absent locales resolve to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Croatian (product default).
    #[default]
    Hr,
    /// English.
    En,
}

impl Locale {
    /// Returns a stable label for this locale.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::En => "en",
        }
    }

    /// Picks the localized variant of a message pair.
    #[must_use]
    pub const fn pick<'a>(self, hr: &'a str, en: &'a str) -> &'a str {
        match self {
            Self::Hr => hr,
            Self::En => en,
        }
    }

    /// Parses a locale label, falling back to the default for unknown input.
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("en") => Self::En,
            _ => Self::Hr,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
