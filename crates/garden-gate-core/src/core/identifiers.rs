// crates/garden-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Garden Gate Identifiers
// Description: Canonical opaque identifiers for Garden Gate records.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout Garden Gate.
//! Identifiers are opaque UTF-8 strings that serialize transparently on the
//! wire. No normalization or validation is applied by these types; store
//! implementations own the uniqueness guarantees.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Macro
// ============================================================================

/// Declares an opaque string identifier with the shared accessor surface.
macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        ///
        /// # Invariants
        /// - Opaque UTF-8 string; no normalization or validation is applied by this type.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

string_id! {
    /// User identifier carried in authenticated token claims.
    UserId
}

string_id! {
    /// Plant identifier in the directory catalog.
    PlantId
}

string_id! {
    /// Garden identifier owned by a user.
    GardenId
}

string_id! {
    /// Product identifier in the commerce catalog.
    ProductId
}

string_id! {
    /// Cart identifier scoped to a user.
    CartId
}

string_id! {
    /// Order identifier scoped to a user.
    OrderId
}

string_id! {
    /// Garden activity log entry identifier.
    ActivityId
}

// ============================================================================
// SECTION: Tests
// ============================================================================
