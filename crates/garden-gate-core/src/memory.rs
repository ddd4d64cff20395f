// crates/garden-gate-core/src/memory.rs
// ============================================================================
// Module: In-Memory Stores
// Description: Reference in-memory implementations of the store contracts.
// Purpose: Back tests and the default binary with seeded collaborator stores.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The in-memory stores are the reference implementations of the collaborator
//! contracts. The directory and product catalogs are seeded at construction
//! and read-only afterwards; gardens, carts, and orders mutate behind a
//! `RwLock`. Poisoned locks surface as [`StoreError::Corrupted`] rather than
//! panicking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use crate::core::identifiers::ActivityId;
use crate::core::identifiers::CartId;
use crate::core::identifiers::GardenId;
use crate::core::identifiers::OrderId;
use crate::core::identifiers::PlantId;
use crate::core::identifiers::ProductId;
use crate::core::identifiers::UserId;
use crate::core::records::CartItem;
use crate::core::records::CartRecord;
use crate::core::records::DirectoryEntity;
use crate::core::records::EntityKind;
use crate::core::records::GardenActivityRecord;
use crate::core::records::GardenRecord;
use crate::core::records::OrderRecord;
use crate::core::records::OrderStatus;
use crate::core::records::PlantRecord;
use crate::core::records::ProductRecord;
use crate::core::records::RaisedBed;
use crate::core::time::Timestamp;
use crate::interfaces::ActivityDraft;
use crate::interfaces::CartItemUpdate;
use crate::interfaces::CommerceStore;
use crate::interfaces::DirectoryStore;
use crate::interfaces::EntitySearch;
use crate::interfaces::GardenDraft;
use crate::interfaces::GardenStore;
use crate::interfaces::PlantingDraft;
use crate::interfaces::ProductSearch;
use crate::interfaces::Rejection;
use crate::interfaces::RejectionKind;
use crate::interfaces::StoreError;
use crate::interfaces::StoreOutcome;

// ============================================================================
// SECTION: Lock Helpers
// ============================================================================

/// Maps a poisoned lock into a store corruption error.
fn poisoned() -> StoreError {
    StoreError::Corrupted("store lock poisoned".to_string())
}

// ============================================================================
// SECTION: Directory Store
// ============================================================================

/// Seeded, read-only in-memory directory catalog.
pub struct InMemoryDirectoryStore {
    /// Plant catalog in seed order.
    plants: Vec<PlantRecord>,
    /// Searchable entities across all catalogs.
    entities: Vec<DirectoryEntity>,
}

impl InMemoryDirectoryStore {
    /// Creates a directory store with the default seed catalog.
    #[must_use]
    pub fn seeded() -> Self {
        let plants = seed_plants();
        let mut entities: Vec<DirectoryEntity> = plants
            .iter()
            .map(|plant| DirectoryEntity {
                id: plant.id.as_str().to_string(),
                kind: EntityKind::Plant,
                name_hr: plant.name_hr.clone(),
                name_en: plant.name_en.clone(),
                summary: plant.latin_name.clone(),
            })
            .collect();
        entities.extend(seed_extra_entities());
        Self {
            plants,
            entities,
        }
    }

    /// Creates a directory store with an explicit catalog.
    #[must_use]
    pub fn with_catalog(plants: Vec<PlantRecord>, entities: Vec<DirectoryEntity>) -> Self {
        Self {
            plants,
            entities,
        }
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn list_plants(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PlantRecord>, StoreError> {
        Ok(self.plants.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn get_plant(&self, id: &PlantId) -> Result<StoreOutcome<PlantRecord>, StoreError> {
        match self.plants.iter().find(|plant| &plant.id == id) {
            Some(plant) => Ok(StoreOutcome::Ok(plant.clone())),
            None => Ok(StoreOutcome::Rejected(Rejection::new(
                RejectionKind::NotFound,
                "biljka nije pronađena",
                "plant not found",
            ))),
        }
    }

    async fn search_entities(
        &self,
        search: &EntitySearch,
    ) -> Result<Vec<DirectoryEntity>, StoreError> {
        let needle = search.query.to_lowercase();
        Ok(self
            .entities
            .iter()
            .filter(|entity| search.kind.is_none_or(|kind| entity.kind == kind))
            .filter(|entity| {
                entity.name_hr.to_lowercase().contains(&needle)
                    || entity.name_en.to_lowercase().contains(&needle)
                    || entity.summary.to_lowercase().contains(&needle)
            })
            .take(search.limit)
            .cloned()
            .collect())
    }
}

// ============================================================================
// SECTION: Garden Store
// ============================================================================

/// Mutable in-memory garden store.
pub struct InMemoryGardenStore {
    /// Gardens keyed by identifier.
    gardens: RwLock<BTreeMap<GardenId, GardenRecord>>,
    /// Activity log entries keyed by garden.
    activities: RwLock<BTreeMap<GardenId, Vec<GardenActivityRecord>>>,
    /// Monotonic id counter.
    counter: AtomicU64,
}

impl InMemoryGardenStore {
    /// Creates an empty garden store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gardens: RwLock::new(BTreeMap::new()),
            activities: RwLock::new(BTreeMap::new()),
            counter: AtomicU64::new(1),
        }
    }

    /// Issues the next sequential identifier with the given prefix.
    fn next_id(&self, prefix: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{seq}")
    }

    /// Rejection for a garden owned by another user.
    fn not_owned() -> Rejection {
        Rejection::new(RejectionKind::NotOwned, "vrt nije vaš", "not your garden")
    }

    /// Rejection for a missing garden.
    fn not_found() -> Rejection {
        Rejection::new(RejectionKind::NotFound, "vrt nije pronađen", "garden not found")
    }
}

impl Default for InMemoryGardenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GardenStore for InMemoryGardenStore {
    async fn list_gardens(&self, owner: &UserId) -> Result<Vec<GardenRecord>, StoreError> {
        let gardens = self.gardens.read().map_err(|_| poisoned())?;
        Ok(gardens.values().filter(|garden| &garden.owner == owner).cloned().collect())
    }

    async fn get_garden(
        &self,
        owner: &UserId,
        id: &GardenId,
    ) -> Result<StoreOutcome<GardenRecord>, StoreError> {
        let gardens = self.gardens.read().map_err(|_| poisoned())?;
        match gardens.get(id) {
            None => Ok(StoreOutcome::Rejected(Self::not_found())),
            Some(garden) if &garden.owner != owner => {
                Ok(StoreOutcome::Rejected(Self::not_owned()))
            }
            Some(garden) => Ok(StoreOutcome::Ok(garden.clone())),
        }
    }

    async fn create_garden(
        &self,
        owner: &UserId,
        draft: GardenDraft,
    ) -> Result<StoreOutcome<GardenRecord>, StoreError> {
        let garden = GardenRecord {
            id: GardenId::new(self.next_id("garden")),
            owner: owner.clone(),
            name: draft.name,
            beds: (0..draft.bed_count)
                .map(|index| RaisedBed {
                    index,
                    plants: Vec::new(),
                })
                .collect(),
            created_at: Timestamp::now(),
        };
        let mut gardens = self.gardens.write().map_err(|_| poisoned())?;
        gardens.insert(garden.id.clone(), garden.clone());
        Ok(StoreOutcome::Ok(garden))
    }

    async fn add_plant(
        &self,
        owner: &UserId,
        id: &GardenId,
        draft: PlantingDraft,
    ) -> Result<StoreOutcome<GardenRecord>, StoreError> {
        let mut gardens = self.gardens.write().map_err(|_| poisoned())?;
        let Some(garden) = gardens.get_mut(id) else {
            return Ok(StoreOutcome::Rejected(Self::not_found()));
        };
        if &garden.owner != owner {
            return Ok(StoreOutcome::Rejected(Self::not_owned()));
        }
        let Some(bed) = garden.beds.iter_mut().find(|bed| bed.index == draft.bed_index) else {
            return Ok(StoreOutcome::Rejected(Rejection::new(
                RejectionKind::Invalid,
                "gredica ne postoji",
                "raised bed does not exist",
            )));
        };
        bed.plants.push(draft.plant_id);
        Ok(StoreOutcome::Ok(garden.clone()))
    }

    async fn list_activities(
        &self,
        owner: &UserId,
        id: &GardenId,
        limit: usize,
    ) -> Result<StoreOutcome<Vec<GardenActivityRecord>>, StoreError> {
        {
            let gardens = self.gardens.read().map_err(|_| poisoned())?;
            match gardens.get(id) {
                None => return Ok(StoreOutcome::Rejected(Self::not_found())),
                Some(garden) if &garden.owner != owner => {
                    return Ok(StoreOutcome::Rejected(Self::not_owned()));
                }
                Some(_) => {}
            }
        }
        let activities = self.activities.read().map_err(|_| poisoned())?;
        let mut entries = activities.get(id).cloned().unwrap_or_default();
        entries.reverse();
        entries.truncate(limit);
        Ok(StoreOutcome::Ok(entries))
    }

    async fn log_activity(
        &self,
        owner: &UserId,
        id: &GardenId,
        draft: ActivityDraft,
    ) -> Result<StoreOutcome<GardenActivityRecord>, StoreError> {
        {
            let gardens = self.gardens.read().map_err(|_| poisoned())?;
            match gardens.get(id) {
                None => return Ok(StoreOutcome::Rejected(Self::not_found())),
                Some(garden) if &garden.owner != owner => {
                    return Ok(StoreOutcome::Rejected(Self::not_owned()));
                }
                Some(_) => {}
            }
        }
        let record = GardenActivityRecord {
            id: ActivityId::new(self.next_id("activity")),
            garden_id: id.clone(),
            kind: draft.kind,
            note: draft.note,
            recorded_at: draft.recorded_at,
        };
        let mut activities = self.activities.write().map_err(|_| poisoned())?;
        activities.entry(id.clone()).or_default().push(record.clone());
        Ok(StoreOutcome::Ok(record))
    }
}

// ============================================================================
// SECTION: Commerce Store
// ============================================================================

/// Mutable in-memory commerce store with a seeded product catalog.
pub struct InMemoryCommerceStore {
    /// Product catalog in seed order.
    products: Vec<ProductRecord>,
    /// Carts keyed by owning user.
    carts: RwLock<BTreeMap<UserId, CartRecord>>,
    /// Orders keyed by owning user, oldest first.
    orders: RwLock<BTreeMap<UserId, Vec<OrderRecord>>>,
    /// Monotonic id counter.
    counter: AtomicU64,
}

impl InMemoryCommerceStore {
    /// Creates a commerce store with the default seed catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_catalog(seed_products())
    }

    /// Creates a commerce store with an explicit product catalog.
    #[must_use]
    pub fn with_catalog(products: Vec<ProductRecord>) -> Self {
        Self {
            products,
            carts: RwLock::new(BTreeMap::new()),
            orders: RwLock::new(BTreeMap::new()),
            counter: AtomicU64::new(1),
        }
    }

    /// Issues the next sequential identifier with the given prefix.
    fn next_id(&self, prefix: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{seq}")
    }

    /// Rejection for a missing product.
    fn product_not_found() -> Rejection {
        Rejection::new(RejectionKind::NotFound, "proizvod nije pronađen", "product not found")
    }

    /// Rejection for a missing cart.
    fn cart_not_found() -> Rejection {
        Rejection::new(RejectionKind::NotFound, "košarica nije pronađena", "cart not found")
    }
}

#[async_trait]
impl CommerceStore for InMemoryCommerceStore {
    async fn list_products(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        Ok(self.products.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn get_product(
        &self,
        id: &ProductId,
    ) -> Result<StoreOutcome<ProductRecord>, StoreError> {
        match self.products.iter().find(|product| &product.id == id) {
            Some(product) => Ok(StoreOutcome::Ok(product.clone())),
            None => Ok(StoreOutcome::Rejected(Self::product_not_found())),
        }
    }

    async fn search_products(
        &self,
        search: &ProductSearch,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let needle = search.query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|product| {
                search.category.as_ref().is_none_or(|category| &product.category == category)
            })
            .filter(|product| {
                product.name_hr.to_lowercase().contains(&needle)
                    || product.name_en.to_lowercase().contains(&needle)
            })
            .take(search.limit)
            .cloned()
            .collect())
    }

    async fn get_cart(&self, owner: &UserId) -> Result<StoreOutcome<CartRecord>, StoreError> {
        let carts = self.carts.read().map_err(|_| poisoned())?;
        match carts.get(owner) {
            Some(cart) => Ok(StoreOutcome::Ok(cart.clone())),
            None => Ok(StoreOutcome::Rejected(Self::cart_not_found())),
        }
    }

    async fn add_to_cart(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<StoreOutcome<CartRecord>, StoreError> {
        let Some(product) = self.products.iter().find(|product| &product.id == product_id) else {
            return Ok(StoreOutcome::Rejected(Self::product_not_found()));
        };
        let mut carts = self.carts.write().map_err(|_| poisoned())?;
        let cart = carts.entry(owner.clone()).or_insert_with(|| CartRecord {
            id: CartId::new(self.next_id("cart")),
            owner: owner.clone(),
            items: Vec::new(),
        });
        // Units already in the cart count against stock.
        let reserved = cart
            .items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map_or(0, |item| item.quantity);
        if reserved.saturating_add(quantity) > product.stock {
            return Ok(StoreOutcome::Rejected(Rejection::new(
                RejectionKind::OutOfStock,
                "nema dovoljno zaliha",
                "not enough stock",
            )));
        }
        match cart.items.iter_mut().find(|item| &item.product_id == product_id) {
            Some(item) => item.quantity += quantity,
            None => cart.items.push(CartItem {
                product_id: product_id.clone(),
                quantity,
                unit_price_cents: product.price_cents,
            }),
        }
        Ok(StoreOutcome::Ok(cart.clone()))
    }

    async fn update_cart_item(
        &self,
        owner: &UserId,
        update: CartItemUpdate,
    ) -> Result<StoreOutcome<CartRecord>, StoreError> {
        let mut carts = self.carts.write().map_err(|_| poisoned())?;
        let Some(cart) = carts.get_mut(owner) else {
            return Ok(StoreOutcome::Rejected(Self::cart_not_found()));
        };
        let Some(position) =
            cart.items.iter().position(|item| item.product_id == update.product_id)
        else {
            return Ok(StoreOutcome::Rejected(Rejection::new(
                RejectionKind::NotFound,
                "stavka nije u košarici",
                "item not in cart",
            )));
        };
        if update.quantity == 0 {
            cart.items.remove(position);
        } else {
            cart.items[position].quantity = update.quantity;
        }
        Ok(StoreOutcome::Ok(cart.clone()))
    }

    async fn create_order(&self, owner: &UserId) -> Result<StoreOutcome<OrderRecord>, StoreError> {
        let mut carts = self.carts.write().map_err(|_| poisoned())?;
        let Some(cart) = carts.get_mut(owner) else {
            return Ok(StoreOutcome::Rejected(Self::cart_not_found()));
        };
        if cart.items.is_empty() {
            return Ok(StoreOutcome::Rejected(Rejection::new(
                RejectionKind::Invalid,
                "košarica je prazna",
                "cart is empty",
            )));
        }
        let items = std::mem::take(&mut cart.items);
        let total_cents = items
            .iter()
            .map(|item| u64::from(item.quantity) * u64::from(item.unit_price_cents))
            .sum();
        let order = OrderRecord {
            id: OrderId::new(self.next_id("order")),
            owner: owner.clone(),
            items,
            total_cents,
            status: OrderStatus::Pending,
            created_at: Timestamp::now(),
        };
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        orders.entry(owner.clone()).or_default().push(order.clone());
        Ok(StoreOutcome::Ok(order))
    }

    async fn list_orders(
        &self,
        owner: &UserId,
        limit: usize,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        let mut entries = orders.get(owner).cloned().unwrap_or_default();
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }
}

// ============================================================================
// SECTION: Seed Data
// ============================================================================

/// Default plant catalog seed.
fn seed_plants() -> Vec<PlantRecord> {
    vec![
        PlantRecord {
            id: PlantId::new("plant-tomato"),
            name_hr: "Rajčica".to_string(),
            name_en: "Tomato".to_string(),
            latin_name: "Solanum lycopersicum".to_string(),
            sowing_months: vec![3, 4, 5],
            days_to_harvest: 80,
            companions: vec![PlantId::new("plant-basil")],
        },
        PlantRecord {
            id: PlantId::new("plant-basil"),
            name_hr: "Bosiljak".to_string(),
            name_en: "Basil".to_string(),
            latin_name: "Ocimum basilicum".to_string(),
            sowing_months: vec![4, 5, 6],
            days_to_harvest: 60,
            companions: vec![PlantId::new("plant-tomato")],
        },
        PlantRecord {
            id: PlantId::new("plant-carrot"),
            name_hr: "Mrkva".to_string(),
            name_en: "Carrot".to_string(),
            latin_name: "Daucus carota".to_string(),
            sowing_months: vec![3, 4, 5, 6],
            days_to_harvest: 70,
            companions: Vec::new(),
        },
        PlantRecord {
            id: PlantId::new("plant-lettuce"),
            name_hr: "Salata".to_string(),
            name_en: "Lettuce".to_string(),
            latin_name: "Lactuca sativa".to_string(),
            sowing_months: vec![2, 3, 4, 8, 9],
            days_to_harvest: 45,
            companions: vec![PlantId::new("plant-carrot")],
        },
    ]
}

/// Non-plant directory entities included in the search seed.
fn seed_extra_entities() -> Vec<DirectoryEntity> {
    vec![
        DirectoryEntity {
            id: "pest-aphid".to_string(),
            kind: EntityKind::Pest,
            name_hr: "Lisna uš".to_string(),
            name_en: "Aphid".to_string(),
            summary: "Sap-sucking pest common on tomatoes".to_string(),
        },
        DirectoryEntity {
            id: "guide-raised-beds".to_string(),
            kind: EntityKind::Guide,
            name_hr: "Povišene gredice".to_string(),
            name_en: "Raised beds".to_string(),
            summary: "Planning and filling raised beds".to_string(),
        },
    ]
}

/// Default product catalog seed.
fn seed_products() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            id: ProductId::new("product-tomato-seeds"),
            name_hr: "Sjeme rajčice".to_string(),
            name_en: "Tomato seeds".to_string(),
            category: "seeds".to_string(),
            price_cents: 349,
            stock: 120,
        },
        ProductRecord {
            id: ProductId::new("product-compost-10l"),
            name_hr: "Kompost 10 l".to_string(),
            name_en: "Compost 10 l".to_string(),
            category: "soil".to_string(),
            price_cents: 799,
            stock: 40,
        },
        ProductRecord {
            id: ProductId::new("product-hand-trowel"),
            name_hr: "Lopatica".to_string(),
            name_en: "Hand trowel".to_string(),
            category: "tools".to_string(),
            price_cents: 1_250,
            stock: 15,
        },
    ]
}

// ============================================================================
// SECTION: Tests
// ============================================================================
