// crates/garden-gate-mcp/src/tools.rs
// ============================================================================
// Module: Tool Invoker
// Description: Resolve, validate, authorize, and dispatch tool calls.
// Purpose: Route tool calls to the store collaborators with fail-closed checks.
// Dependencies: garden-gate-contract, garden-gate-core, serde_json
// ============================================================================

//! ## Overview
//! The invoker runs the per-call pipeline: alias resolution, declarative
//! argument validation, permission check, then store dispatch. Expected
//! business rejections come back inside the result payload as
//! `{"success": false, "error": ...}` in the caller's locale; only unexpected
//! store faults become protocol errors. Handlers never see unvalidated
//! arguments.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use garden_gate_contract::Surface;
use garden_gate_contract::ToolName;
use garden_gate_contract::ValidatedArgs;
use garden_gate_core::ActivityDraft;
use garden_gate_core::CartItemUpdate;
use garden_gate_core::CommerceStore;
use garden_gate_core::DirectoryStore;
use garden_gate_core::EntityKind;
use garden_gate_core::EntitySearch;
use garden_gate_core::GardenDraft;
use garden_gate_core::GardenId;
use garden_gate_core::GardenStore;
use garden_gate_core::Locale;
use garden_gate_core::PlantId;
use garden_gate_core::PlantingDraft;
use garden_gate_core::ProductId;
use garden_gate_core::ProductSearch;
use garden_gate_core::Rejection;
use garden_gate_core::StoreOutcome;
use garden_gate_core::Timestamp;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::auth::Identity;
use crate::errors::GatewayFault;
use crate::permissions::PermissionRegistry;

// ============================================================================
// SECTION: Invoker
// ============================================================================

/// Tool call dispatcher over the three store collaborators.
pub struct ToolInvoker {
    /// Directory catalog store.
    directories: Arc<dyn DirectoryStore>,
    /// Garden store.
    gardens: Arc<dyn GardenStore>,
    /// Commerce store.
    commerce: Arc<dyn CommerceStore>,
    /// Immutable role grant table.
    permissions: Arc<PermissionRegistry>,
}

impl ToolInvoker {
    /// Builds an invoker over the given collaborators.
    #[must_use]
    pub fn new(
        directories: Arc<dyn DirectoryStore>,
        gardens: Arc<dyn GardenStore>,
        commerce: Arc<dyn CommerceStore>,
        permissions: Arc<PermissionRegistry>,
    ) -> Self {
        Self {
            directories,
            gardens,
            commerce,
            permissions,
        }
    }

    /// Returns the grant table shared with the server.
    #[must_use]
    pub fn permissions(&self) -> &PermissionRegistry {
        &self.permissions
    }

    /// Handles a `tools/call` for one surface.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayFault`] for unknown tools, missing permissions,
    /// argument violations, and unexpected store faults.
    pub async fn handle_call(
        &self,
        surface: Surface,
        identity: &Identity,
        raw_name: &str,
        arguments: &Value,
    ) -> Result<Value, GatewayFault> {
        let Some(tool) = ToolName::resolve(surface, raw_name) else {
            return Err(GatewayFault::MethodNotFound);
        };
        let args = tool.input_schema().validate(arguments).map_err(|violations| {
            GatewayFault::InvalidParams {
                violations,
            }
        })?;
        if !self.permissions.is_allowed(identity.role, tool.required_permission()) {
            return Err(GatewayFault::Forbidden);
        }
        let locale = arg_locale(&args, identity);
        self.dispatch(tool, identity, &args, locale).await
    }

    /// Dispatches a resolved, validated call to its store operation.
    async fn dispatch(
        &self,
        tool: ToolName,
        identity: &Identity,
        args: &ValidatedArgs,
        locale: Locale,
    ) -> Result<Value, GatewayFault> {
        match tool {
            ToolName::DirectoriesGetPlants => {
                let plants = self.directories.list_plants(limit_arg(args), offset_arg(args)).await?;
                listing("plants", &plants)
            }
            ToolName::DirectoriesGetPlant => {
                let id = PlantId::new(required_str(args, "plant_id")?);
                let outcome = self.directories.get_plant(&id).await?;
                entity("plant", outcome, locale)
            }
            ToolName::DirectoriesSearchEntities => {
                let search = EntitySearch {
                    query: required_str(args, "query")?.to_string(),
                    kind: args.get("kind").and_then(Value::as_str).and_then(parse_entity_kind),
                    limit: limit_arg(args),
                };
                let results = self.directories.search_entities(&search).await?;
                listing("results", &results)
            }
            ToolName::GardensGetGardens => {
                let gardens = self.gardens.list_gardens(&identity.user_id).await?;
                listing("gardens", &gardens)
            }
            ToolName::GardensGetGarden => {
                let id = GardenId::new(required_str(args, "garden_id")?);
                let outcome = self.gardens.get_garden(&identity.user_id, &id).await?;
                entity("garden", outcome, locale)
            }
            ToolName::GardensCreateGarden => {
                let draft = GardenDraft {
                    name: required_str(args, "name")?.to_string(),
                    bed_count: small_int_arg(args, "bed_count", 3)?,
                };
                let outcome = self.gardens.create_garden(&identity.user_id, draft).await?;
                entity("garden", outcome, locale)
            }
            ToolName::GardensAddPlantToGarden => {
                let id = GardenId::new(required_str(args, "garden_id")?);
                let draft = PlantingDraft {
                    plant_id: PlantId::new(required_str(args, "plant_id")?),
                    bed_index: small_int_arg(args, "bed_index", 0)?,
                };
                let outcome = self.gardens.add_plant(&identity.user_id, &id, draft).await?;
                entity("garden", outcome, locale)
            }
            ToolName::GardensGetGardenActivities => {
                let id = GardenId::new(required_str(args, "garden_id")?);
                let outcome =
                    self.gardens.list_activities(&identity.user_id, &id, limit_arg(args)).await?;
                match outcome {
                    StoreOutcome::Ok(activities) => listing("activities", &activities),
                    StoreOutcome::Rejected(rejection) => Ok(rejected(&rejection, locale)),
                }
            }
            ToolName::GardensLogGardenActivity => {
                let id = GardenId::new(required_str(args, "garden_id")?);
                let draft = ActivityDraft {
                    kind: required_str(args, "kind")?.to_string(),
                    note: args
                        .get("note")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    recorded_at: args
                        .get("recorded_at")
                        .and_then(Value::as_i64)
                        .map_or_else(Timestamp::now, Timestamp::from_unix_seconds),
                };
                let outcome = self.gardens.log_activity(&identity.user_id, &id, draft).await?;
                entity("activity", outcome, locale)
            }
            ToolName::CommerceGetProducts => {
                let products = self.commerce.list_products(limit_arg(args), offset_arg(args)).await?;
                listing("products", &products)
            }
            ToolName::CommerceGetProduct => {
                let id = ProductId::new(required_str(args, "product_id")?);
                let outcome = self.commerce.get_product(&id).await?;
                entity("product", outcome, locale)
            }
            ToolName::CommerceSearchProducts => {
                let search = ProductSearch {
                    query: required_str(args, "query")?.to_string(),
                    category: args
                        .get("category")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    limit: limit_arg(args),
                };
                let products = self.commerce.search_products(&search).await?;
                listing("products", &products)
            }
            ToolName::CommerceGetCart => {
                let outcome = self.commerce.get_cart(&identity.user_id).await?;
                cart_payload(outcome, locale)
            }
            ToolName::CommerceAddToCart => {
                let id = ProductId::new(required_str(args, "product_id")?);
                let quantity = small_int_arg(args, "quantity", 1)?;
                let outcome =
                    self.commerce.add_to_cart(&identity.user_id, &id, u32::from(quantity)).await?;
                cart_payload(outcome, locale)
            }
            ToolName::CommerceUpdateCartItem => {
                let update = CartItemUpdate {
                    product_id: ProductId::new(required_str(args, "product_id")?),
                    quantity: u32::from(small_int_arg(args, "quantity", 0)?),
                };
                let outcome = self.commerce.update_cart_item(&identity.user_id, update).await?;
                cart_payload(outcome, locale)
            }
            ToolName::CommerceCreateOrder => {
                let outcome = self.commerce.create_order(&identity.user_id).await?;
                entity("order", outcome, locale)
            }
            ToolName::CommerceGetOrders => {
                let orders =
                    self.commerce.list_orders(&identity.user_id, limit_arg(args)).await?;
                listing("orders", &orders)
            }
        }
    }
}

// ============================================================================
// SECTION: Argument Helpers
// ============================================================================

/// Reads the response locale, preferring an explicit argument.
fn arg_locale(args: &ValidatedArgs, identity: &Identity) -> Locale {
    match args.get("locale").and_then(Value::as_str) {
        Some(label) => Locale::parse_or_default(Some(label)),
        None => identity.locale,
    }
}

/// Reads a required string argument guaranteed present by validation.
fn required_str<'a>(args: &'a ValidatedArgs, name: &str) -> Result<&'a str, GatewayFault> {
    args.get(name).and_then(Value::as_str).ok_or(GatewayFault::Internal)
}

/// Reads the validated page-size argument.
fn limit_arg(args: &ValidatedArgs) -> usize {
    args.get("limit")
        .and_then(Value::as_i64)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(20)
}

/// Reads the validated offset argument.
fn offset_arg(args: &ValidatedArgs) -> usize {
    args.get("offset")
        .and_then(Value::as_i64)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(0)
}

/// Reads a small bounded integer argument into `u16`.
fn small_int_arg(args: &ValidatedArgs, name: &str, default: u16) -> Result<u16, GatewayFault> {
    match args.get(name).and_then(Value::as_i64) {
        Some(value) => u16::try_from(value).map_err(|_| GatewayFault::Internal),
        None => Ok(default),
    }
}

/// Parses an entity kind filter label.
fn parse_entity_kind(label: &str) -> Option<EntityKind> {
    match label {
        "plant" => Some(EntityKind::Plant),
        "pest" => Some(EntityKind::Pest),
        "guide" => Some(EntityKind::Guide),
        _ => None,
    }
}

// ============================================================================
// SECTION: Payload Helpers
// ============================================================================

/// Renders a collection payload with its count.
fn listing<T: Serialize>(key: &str, items: &[T]) -> Result<Value, GatewayFault> {
    let rendered = serde_json::to_value(items).map_err(|_| GatewayFault::Internal)?;
    Ok(json!({
        key: rendered,
        "count": items.len(),
    }))
}

/// Renders a single-entity outcome payload.
fn entity<T: Serialize>(
    key: &str,
    outcome: StoreOutcome<T>,
    locale: Locale,
) -> Result<Value, GatewayFault> {
    match outcome {
        StoreOutcome::Ok(record) => {
            let rendered = serde_json::to_value(&record).map_err(|_| GatewayFault::Internal)?;
            Ok(json!({
                "success": true,
                key: rendered,
            }))
        }
        StoreOutcome::Rejected(rejection) => Ok(rejected(&rejection, locale)),
    }
}

/// Renders a cart outcome payload with its total.
fn cart_payload(
    outcome: StoreOutcome<garden_gate_core::CartRecord>,
    locale: Locale,
) -> Result<Value, GatewayFault> {
    match outcome {
        StoreOutcome::Ok(cart) => {
            let total = cart.total_cents();
            let rendered = serde_json::to_value(&cart).map_err(|_| GatewayFault::Internal)?;
            Ok(json!({
                "success": true,
                "cart": rendered,
                "total_cents": total,
            }))
        }
        StoreOutcome::Rejected(rejection) => Ok(rejected(&rejection, locale)),
    }
}

/// Renders an expected business rejection payload.
fn rejected(rejection: &Rejection, locale: Locale) -> Value {
    json!({
        "success": false,
        "error": rejection.message(locale),
        "kind": rejection.kind.as_str(),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
