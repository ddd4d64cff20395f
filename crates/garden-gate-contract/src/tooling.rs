// crates/garden-gate-contract/src/tooling.rs
// ============================================================================
// Module: Gateway Tool Contracts
// Description: Canonical tool names, aliases, and input schemas per surface.
// Purpose: Drive tool listing, alias resolution, and argument validation.
// Dependencies: garden-gate-core, serde_json, crate::schema, crate::surface
// ============================================================================

//! ## Overview
//! This module defines the canonical tool surface of the gateway. Each tool
//! carries a primary name, its naming aliases, a required permission, and a
//! declarative input schema. The product historically exposed both
//! hyphenated and slash-separated forms of the same tool name; alias
//! normalization is a pure step run before lookup so neither form ever leaks
//! into branching logic.
//!
//! The order of tools within a surface is intentional: it is preserved in
//! `tools/list` output to keep client diffs stable. Append new tools at the
//! end of their surface.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::schema::FieldSpec;
use crate::schema::InputSchema;
use crate::surface::COMMERCE_READ;
use crate::surface::COMMERCE_WRITE;
use crate::surface::DIRECTORIES_READ;
use crate::surface::GARDENS_READ;
use crate::surface::GARDENS_WRITE;
use crate::surface::Surface;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Locale values accepted by every tool.
const LOCALE_VALUES: &[&str] = &["hr", "en"];
/// Entity kinds accepted by the directory search tool.
const ENTITY_KIND_VALUES: &[&str] = &["plant", "pest", "guide"];

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Canonical tool names across all surfaces.
///
/// # Invariants
/// - Variants are stable for dispatch and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolName {
    /// List plants from the directory catalog.
    DirectoriesGetPlants,
    /// Fetch one plant by identifier.
    DirectoriesGetPlant,
    /// Search entities across the directory catalogs.
    DirectoriesSearchEntities,
    /// List the caller's gardens.
    GardensGetGardens,
    /// Fetch one of the caller's gardens.
    GardensGetGarden,
    /// Create a garden for the caller.
    GardensCreateGarden,
    /// Assign a plant to a raised bed.
    GardensAddPlantToGarden,
    /// List activity log entries for a garden.
    GardensGetGardenActivities,
    /// Record an activity against a garden.
    GardensLogGardenActivity,
    /// List products from the commerce catalog.
    CommerceGetProducts,
    /// Fetch one product by identifier.
    CommerceGetProduct,
    /// Search products by name and category.
    CommerceSearchProducts,
    /// Fetch the caller's cart.
    CommerceGetCart,
    /// Add a product to the caller's cart.
    CommerceAddToCart,
    /// Update a cart line item.
    CommerceUpdateCartItem,
    /// Create an order from the caller's cart.
    CommerceCreateOrder,
    /// List the caller's orders.
    CommerceGetOrders,
}

impl ToolName {
    /// All tools in catalog order.
    pub const ALL: [Self; 17] = [
        Self::DirectoriesGetPlants,
        Self::DirectoriesGetPlant,
        Self::DirectoriesSearchEntities,
        Self::GardensGetGardens,
        Self::GardensGetGarden,
        Self::GardensCreateGarden,
        Self::GardensAddPlantToGarden,
        Self::GardensGetGardenActivities,
        Self::GardensLogGardenActivity,
        Self::CommerceGetProducts,
        Self::CommerceGetProduct,
        Self::CommerceSearchProducts,
        Self::CommerceGetCart,
        Self::CommerceAddToCart,
        Self::CommerceUpdateCartItem,
        Self::CommerceCreateOrder,
        Self::CommerceGetOrders,
    ];

    /// Returns the surface this tool belongs to.
    #[must_use]
    pub const fn surface(self) -> Surface {
        match self {
            Self::DirectoriesGetPlants
            | Self::DirectoriesGetPlant
            | Self::DirectoriesSearchEntities => Surface::Directories,
            Self::GardensGetGardens
            | Self::GardensGetGarden
            | Self::GardensCreateGarden
            | Self::GardensAddPlantToGarden
            | Self::GardensGetGardenActivities
            | Self::GardensLogGardenActivity => Surface::Gardens,
            Self::CommerceGetProducts
            | Self::CommerceGetProduct
            | Self::CommerceSearchProducts
            | Self::CommerceGetCart
            | Self::CommerceAddToCart
            | Self::CommerceUpdateCartItem
            | Self::CommerceCreateOrder
            | Self::CommerceGetOrders => Surface::Commerce,
        }
    }

    /// Returns the canonical published name for this tool.
    ///
    /// Directory tools publish the hyphenated form; garden and commerce
    /// tools publish the slash form. Both forms resolve through
    /// [`normalize_tool_name`].
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::DirectoriesGetPlants => "directories-get-plants",
            Self::DirectoriesGetPlant => "directories-get-plant",
            Self::DirectoriesSearchEntities => "directories-search-entities",
            Self::GardensGetGardens => "gardens/get-gardens",
            Self::GardensGetGarden => "gardens/get-garden",
            Self::GardensCreateGarden => "gardens/create-garden",
            Self::GardensAddPlantToGarden => "gardens/add-plant-to-garden",
            Self::GardensGetGardenActivities => "gardens/get-garden-activities",
            Self::GardensLogGardenActivity => "gardens/log-garden-activity",
            Self::CommerceGetProducts => "commerce/get-products",
            Self::CommerceGetProduct => "commerce/get-product",
            Self::CommerceSearchProducts => "commerce/search-products",
            Self::CommerceGetCart => "commerce/get-cart",
            Self::CommerceAddToCart => "commerce/add-to-cart",
            Self::CommerceUpdateCartItem => "commerce/update-cart-item",
            Self::CommerceCreateOrder => "commerce/create-order",
            Self::CommerceGetOrders => "commerce/get-orders",
        }
    }

    /// Returns the normalized lookup key (`surface/rest`) for this tool.
    #[must_use]
    pub const fn lookup_key(self) -> &'static str {
        match self {
            Self::DirectoriesGetPlants => "directories/get-plants",
            Self::DirectoriesGetPlant => "directories/get-plant",
            Self::DirectoriesSearchEntities => "directories/search-entities",
            other => other.canonical_name(),
        }
    }

    /// Resolves a raw tool name within a surface, honoring aliases.
    #[must_use]
    pub fn resolve(surface: Surface, raw: &str) -> Option<Self> {
        let (parsed_surface, key) = normalize_tool_name(raw)?;
        if parsed_surface != surface {
            return None;
        }
        Self::ALL.into_iter().find(|tool| tool.lookup_key() == key)
    }

    /// Returns the permission required to call this tool.
    #[must_use]
    pub const fn required_permission(self) -> &'static str {
        match self {
            Self::DirectoriesGetPlants
            | Self::DirectoriesGetPlant
            | Self::DirectoriesSearchEntities => DIRECTORIES_READ,
            Self::GardensGetGardens
            | Self::GardensGetGarden
            | Self::GardensGetGardenActivities => GARDENS_READ,
            Self::GardensCreateGarden
            | Self::GardensAddPlantToGarden
            | Self::GardensLogGardenActivity => GARDENS_WRITE,
            Self::CommerceGetProducts
            | Self::CommerceGetProduct
            | Self::CommerceSearchProducts
            | Self::CommerceGetCart
            | Self::CommerceGetOrders => COMMERCE_READ,
            Self::CommerceAddToCart | Self::CommerceUpdateCartItem | Self::CommerceCreateOrder => {
                COMMERCE_WRITE
            }
        }
    }

    /// Returns the tool description shown in `tools/list`.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DirectoriesGetPlants => "List plants from the directory catalog.",
            Self::DirectoriesGetPlant => "Fetch a single plant by identifier.",
            Self::DirectoriesSearchEntities => {
                "Search plants, pests, and guides across the directory."
            }
            Self::GardensGetGardens => "List the caller's gardens.",
            Self::GardensGetGarden => "Fetch one of the caller's gardens with its raised beds.",
            Self::GardensCreateGarden => "Create a garden with a raised-bed layout.",
            Self::GardensAddPlantToGarden => "Assign a plant to a raised bed in a garden.",
            Self::GardensGetGardenActivities => "List activity log entries for a garden.",
            Self::GardensLogGardenActivity => "Record an activity against a garden.",
            Self::CommerceGetProducts => "List products from the commerce catalog.",
            Self::CommerceGetProduct => "Fetch a single product by identifier.",
            Self::CommerceSearchProducts => "Search products by name and category.",
            Self::CommerceGetCart => "Fetch the caller's shopping cart.",
            Self::CommerceAddToCart => "Add a product to the caller's cart.",
            Self::CommerceUpdateCartItem => "Update a cart line item; zero quantity removes it.",
            Self::CommerceCreateOrder => "Create an order from the caller's cart.",
            Self::CommerceGetOrders => "List the caller's orders, newest first.",
        }
    }

    /// Builds the declarative input schema for this tool.
    #[must_use]
    pub fn input_schema(self) -> InputSchema {
        match self {
            Self::DirectoriesGetPlants => paged_schema(),
            Self::DirectoriesGetPlant => InputSchema::new(vec![
                FieldSpec::string("plant_id", "plant identifier").required().max_len(100),
                locale_field(),
            ]),
            Self::DirectoriesSearchEntities => InputSchema::new(vec![
                FieldSpec::string("query", "free-text search query").required().max_len(200),
                FieldSpec::enumeration("kind", ENTITY_KIND_VALUES, "entity kind filter"),
                limit_field(),
                locale_field(),
            ]),
            Self::GardensGetGardens => InputSchema::new(vec![locale_field()]),
            Self::GardensGetGarden => InputSchema::new(vec![
                FieldSpec::string("garden_id", "garden identifier").required().max_len(100),
                locale_field(),
            ]),
            Self::GardensCreateGarden => InputSchema::new(vec![
                FieldSpec::string("name", "garden display name").required().max_len(100),
                FieldSpec::integer("bed_count", "number of raised beds")
                    .bounds(1, 24)
                    .default_int(3),
                locale_field(),
            ]),
            Self::GardensAddPlantToGarden => InputSchema::new(vec![
                FieldSpec::string("garden_id", "garden identifier").required().max_len(100),
                FieldSpec::string("plant_id", "plant identifier").required().max_len(100),
                FieldSpec::integer("bed_index", "target raised-bed index")
                    .bounds(0, 23)
                    .default_int(0),
                locale_field(),
            ]),
            Self::GardensGetGardenActivities => InputSchema::new(vec![
                FieldSpec::string("garden_id", "garden identifier").required().max_len(100),
                limit_field(),
                locale_field(),
            ]),
            Self::GardensLogGardenActivity => InputSchema::new(vec![
                FieldSpec::string("garden_id", "garden identifier").required().max_len(100),
                FieldSpec::string("kind", "activity kind label").required().max_len(50),
                FieldSpec::string("note", "free-form note").max_len(500).default_str(""),
                FieldSpec::integer("recorded_at", "unix seconds; defaults to now"),
                locale_field(),
            ]),
            Self::CommerceGetProducts => paged_schema(),
            Self::CommerceGetProduct => InputSchema::new(vec![
                FieldSpec::string("product_id", "product identifier").required().max_len(100),
                locale_field(),
            ]),
            Self::CommerceSearchProducts => InputSchema::new(vec![
                FieldSpec::string("query", "free-text search query").required().max_len(200),
                FieldSpec::string("category", "category filter").max_len(50),
                limit_field(),
                locale_field(),
            ]),
            Self::CommerceGetCart => InputSchema::new(vec![locale_field()]),
            Self::CommerceAddToCart => InputSchema::new(vec![
                FieldSpec::string("product_id", "product identifier").required().max_len(100),
                FieldSpec::integer("quantity", "units to add").bounds(1, 99).default_int(1),
                locale_field(),
            ]),
            Self::CommerceUpdateCartItem => InputSchema::new(vec![
                FieldSpec::string("product_id", "product identifier").required().max_len(100),
                FieldSpec::integer("quantity", "new quantity; zero removes the item")
                    .bounds(0, 99)
                    .required(),
                locale_field(),
            ]),
            Self::CommerceCreateOrder => InputSchema::new(vec![locale_field()]),
            Self::CommerceGetOrders => InputSchema::new(vec![limit_field(), locale_field()]),
        }
    }
}

// ============================================================================
// SECTION: Shared Fields
// ============================================================================

/// Response-locale field shared by every tool.
fn locale_field() -> FieldSpec {
    FieldSpec::enumeration("locale", LOCALE_VALUES, "response locale").default_str("hr")
}

/// Page-size field shared by list-style tools.
fn limit_field() -> FieldSpec {
    FieldSpec::integer("limit", "maximum number of results").bounds(1, 100).default_int(20)
}

/// Schema for plain paged listings.
fn paged_schema() -> InputSchema {
    InputSchema::new(vec![
        limit_field(),
        FieldSpec::integer("offset", "number of results to skip").bounds(0, 10_000).default_int(0),
        locale_field(),
    ])
}

// ============================================================================
// SECTION: Alias Normalization
// ============================================================================

/// Normalizes a raw tool name into its surface and lookup key.
///
/// Accepts both the hyphenated (`directories-get-plants`) and the
/// slash-separated (`directories/get-plants`) form of every tool name and
/// returns the canonical `surface/rest` lookup key. Returns `None` when the
/// name does not start with a known surface prefix or has an empty rest.
#[must_use]
pub fn normalize_tool_name(raw: &str) -> Option<(Surface, String)> {
    for surface in Surface::ALL {
        let prefix = surface.as_str();
        if let Some(rest) = raw.strip_prefix(prefix) {
            let mut chars = rest.chars();
            let separator = chars.next()?;
            if separator != '-' && separator != '/' {
                continue;
            }
            let tail = chars.as_str();
            if tail.is_empty() {
                return None;
            }
            return Some((surface, format!("{prefix}/{tail}")));
        }
    }
    None
}

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Tool definition shape used by `tools/list`.
///
/// # Invariants
/// - `name` is the canonical published tool name.
/// - `input_schema` is a JSON Schema payload for the tool input shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    /// Canonical published tool name.
    pub name: &'static str,
    /// Tool description for clients.
    pub description: &'static str,
    /// JSON schema for tool input.
    pub input_schema: Value,
}

/// Returns the tools belonging to a surface in catalog order.
#[must_use]
pub fn surface_tools(surface: Surface) -> Vec<ToolName> {
    ToolName::ALL.into_iter().filter(|tool| tool.surface() == surface).collect()
}

/// Returns the `tools/list` definitions for a surface in catalog order.
#[must_use]
pub fn tool_definitions(surface: Surface) -> Vec<ToolDefinition> {
    surface_tools(surface)
        .into_iter()
        .map(|tool| ToolDefinition {
            name: tool.canonical_name(),
            description: tool.description(),
            input_schema: tool.input_schema().to_json_schema(),
        })
        .collect()
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

    use super::ToolName;
    use super::normalize_tool_name;
    use super::surface_tools;
    use super::tool_definitions;
    use crate::surface::Surface;

    #[test]
    fn both_naming_forms_resolve_to_the_same_tool() {
        let hyphen = ToolName::resolve(Surface::Directories, "directories-get-plants");
        let slash = ToolName::resolve(Surface::Directories, "directories/get-plants");
        assert_eq!(hyphen, Some(ToolName::DirectoriesGetPlants));
        assert_eq!(slash, Some(ToolName::DirectoriesGetPlants));
    }

    #[test]
    fn every_tool_resolves_from_its_canonical_name() {
        for tool in ToolName::ALL {
            let resolved = ToolName::resolve(tool.surface(), tool.canonical_name());
            assert_eq!(resolved, Some(tool), "tool {}", tool.canonical_name());
        }
    }

    #[test]
    fn resolution_is_scoped_to_the_surface() {
        assert_eq!(ToolName::resolve(Surface::Gardens, "commerce/get-cart"), None);
    }

    #[test]
    fn unknown_and_malformed_names_do_not_resolve() {
        assert_eq!(ToolName::resolve(Surface::Gardens, "gardens/irrigate"), None);
        assert_eq!(normalize_tool_name("gardens"), None);
        assert_eq!(normalize_tool_name("gardens/"), None);
        assert_eq!(normalize_tool_name("weather/get-forecast"), None);
    }

    #[test]
    fn surfaces_partition_the_tool_catalog() {
        let total: usize =
            Surface::ALL.iter().map(|surface| surface_tools(*surface).len()).sum();
        assert_eq!(total, ToolName::ALL.len());
        assert_eq!(surface_tools(Surface::Directories).len(), 3);
        assert_eq!(surface_tools(Surface::Gardens).len(), 6);
        assert_eq!(surface_tools(Surface::Commerce).len(), 8);
    }

    #[test]
    fn definitions_carry_schemas_and_descriptions() {
        for surface in Surface::ALL {
            for definition in tool_definitions(surface) {
                assert!(!definition.description.is_empty());
                assert!(definition.input_schema.is_object());
            }
        }
    }

    #[test]
    fn every_rendered_schema_is_valid_json_schema() {
        for tool in ToolName::ALL {
            let schema = tool.input_schema().to_json_schema();
            assert!(
                jsonschema::validator_for(&schema).is_ok(),
                "tool {} schema rejected",
                tool.canonical_name()
            );
        }
    }

    #[test]
    fn every_required_permission_is_surface_scoped() {
        for tool in ToolName::ALL {
            let permission = tool.required_permission();
            assert!(
                permission.starts_with(tool.surface().as_str()),
                "tool {} permission {permission}",
                tool.canonical_name()
            );
        }
    }
}
