// crates/garden-gate-mcp/src/permissions.rs
// ============================================================================
// Module: Permission Registry
// Description: Immutable role-to-permission grant table.
// Purpose: Answer permission checks with an unknown-denies default.
// Dependencies: garden-gate-contract, garden-gate-core
// ============================================================================

//! ## Overview
//! Permissions are granted per role from an immutable table built at startup.
//! The registry is the only authority for grants: permission strings carried
//! inside tokens are informational and never widen access. Any lookup that
//! falls outside the table denies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use garden_gate_contract::surface::COMMERCE_READ;
use garden_gate_contract::surface::COMMERCE_WRITE;
use garden_gate_contract::surface::DIRECTORIES_READ;
use garden_gate_contract::surface::GARDENS_READ;
use garden_gate_contract::surface::GARDENS_WRITE;
use garden_gate_core::Role;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Immutable role-to-permission grant table.
///
/// # Invariants
/// - Grants never change after construction.
/// - Unknown role/permission pairs deny.
#[derive(Debug)]
pub struct PermissionRegistry {
    /// Granted permissions per role.
    grants: BTreeMap<Role, BTreeSet<&'static str>>,
}

impl PermissionRegistry {
    /// Builds the default product grant table.
    ///
    /// Admins and farmers hold every permission; gardeners hold read/write on
    /// their own data; viewers are read-only everywhere.
    #[must_use]
    pub fn default_table() -> Self {
        let full: BTreeSet<&'static str> = [
            DIRECTORIES_READ,
            GARDENS_READ,
            GARDENS_WRITE,
            COMMERCE_READ,
            COMMERCE_WRITE,
        ]
        .into_iter()
        .collect();
        let read_only: BTreeSet<&'static str> =
            [DIRECTORIES_READ, GARDENS_READ, COMMERCE_READ].into_iter().collect();
        let mut grants = BTreeMap::new();
        grants.insert(Role::Admin, full.clone());
        grants.insert(Role::Farmer, full.clone());
        grants.insert(Role::Gardener, full);
        grants.insert(Role::Viewer, read_only);
        Self {
            grants,
        }
    }

    /// Returns whether the role holds the permission.
    #[must_use]
    pub fn is_allowed(&self, role: Role, permission: &str) -> bool {
        self.grants.get(&role).is_some_and(|granted| granted.contains(permission))
    }

    /// Returns the granted permissions for a role in stable order.
    #[must_use]
    pub fn granted(&self, role: Role) -> Vec<&'static str> {
        self.grants
            .get(&role)
            .map(|granted| granted.iter().copied().collect())
            .unwrap_or_default()
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

    use garden_gate_contract::ToolName;
    use garden_gate_contract::surface::GARDENS_WRITE;
    use garden_gate_core::Role;

    use super::PermissionRegistry;

    #[test]
    fn viewer_is_read_only() {
        let registry = PermissionRegistry::default_table();
        assert!(registry.is_allowed(Role::Viewer, "gardens:read"));
        assert!(!registry.is_allowed(Role::Viewer, GARDENS_WRITE));
        assert!(!registry.is_allowed(Role::Viewer, "commerce:write"));
    }

    #[test]
    fn gardener_holds_write_permissions() {
        let registry = PermissionRegistry::default_table();
        assert!(registry.is_allowed(Role::Gardener, GARDENS_WRITE));
        assert!(registry.is_allowed(Role::Gardener, "commerce:write"));
    }

    #[test]
    fn unknown_permission_denies() {
        let registry = PermissionRegistry::default_table();
        assert!(!registry.is_allowed(Role::Admin, "weather:read"));
        assert!(!registry.is_allowed(Role::Admin, ""));
    }

    #[test]
    fn every_tool_permission_is_grantable_by_admins() {
        let registry = PermissionRegistry::default_table();
        for tool in ToolName::ALL {
            assert!(
                registry.is_allowed(Role::Admin, tool.required_permission()),
                "tool {} permission not granted to admin",
                tool.canonical_name()
            );
        }
    }
}
