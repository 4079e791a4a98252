//! In-memory mock data layer.
//!
//! Stands in for a backend API. The store is seeded at startup, shared
//! behind a `tokio::sync::RwLock`, and reset on restart. Every call first
//! waits an artificial delay so pages feel like they talk to a server:
//!
//! | Kind              | Base delay |
//! |-------------------|------------|
//! | reads             | 300 ms     |
//! | small writes      | 200 ms     |
//! | auth/admin forms  | 500 ms     |
//!
//! The delay is scaled by [`Latency`]; tests run with [`Latency::NONE`].

mod seed;
pub mod types;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use thiserror::Error;
use tokio::sync::RwLock;

use furnicraft_core::{
    AddressId, CategoryId, DeliveryPersonId, Email, ItemId, OrderStatus, Role, SubcategoryId,
};

pub use types::{
    Address, AddressFields, CartLine, Category, DeliveryPerson, Item, NewItem, Order, OrderLine,
    PLACEHOLDER_IMAGE, Subcategory, User,
};

/// Errors returned by the mock data layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A record with the same key already exists.
    #[error("{0} already exists")]
    Duplicate(String),
}

// =============================================================================
// Latency
// =============================================================================

/// Kind of mock call, which decides its base delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    Read,
    Write,
    Submit,
}

impl Delay {
    const fn base_millis(self) -> u64 {
        match self {
            Self::Read => 300,
            Self::Write => 200,
            Self::Submit => 500,
        }
    }
}

/// Scale applied to the artificial delays, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency(u32);

impl Latency {
    /// No delays at all.
    pub const NONE: Self = Self(0);
    /// Delays as listed in the module docs.
    pub const REALISTIC: Self = Self(100);

    #[must_use]
    pub const fn percent(percent: u32) -> Self {
        Self(percent)
    }

    /// The scaled delay for one call.
    #[must_use]
    pub fn duration(self, delay: Delay) -> Duration {
        Duration::from_millis(delay.base_millis() * u64::from(self.0) / 100)
    }

    async fn wait(self, delay: Delay) {
        let duration = self.duration(delay);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

// =============================================================================
// Store
// =============================================================================

struct Store {
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    items: Vec<Item>,
    users: Vec<User>,
    addresses: Vec<Address>,
    orders: Vec<Order>,
    delivery_people: Vec<DeliveryPerson>,
    default_cart: Vec<CartLine>,
    default_wishlist: BTreeSet<ItemId>,
}

impl Store {
    fn seeded() -> Self {
        let addresses = seed::addresses();
        Self {
            categories: seed::categories(),
            subcategories: seed::subcategories(),
            items: seed::items(),
            users: seed::users(),
            orders: seed::orders(&addresses),
            addresses,
            delivery_people: seed::delivery_people(),
            default_cart: seed::default_cart(),
            default_wishlist: seed::default_wishlist(),
        }
    }

    fn order_mut(&mut self, id: &str) -> Result<&mut Order, DataError> {
        self.orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| DataError::NotFound(format!("order {id}")))
    }

    /// A random `ORD-NNNNNN` id not used by any existing order.
    fn fresh_order_id(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let id = format!("ORD-{:06}", rng.random_range(0..1_000_000));
            if !self.orders.iter().any(|o| o.id == id) {
                return id;
            }
        }
    }
}

/// One past the largest existing ID, or 1 for an empty list.
fn next_id<T>(records: &[T], id: impl Fn(&T) -> u32) -> u32 {
    records.iter().map(id).max().map_or(1, |max| max.saturating_add(1))
}

/// Phone numbers compared by their digits, ignoring spaces and punctuation.
fn same_phone(a: &str, b: &str) -> bool {
    let digits = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();
    let a = digits(a);
    !a.is_empty() && a == digits(b)
}

// =============================================================================
// MockBackend
// =============================================================================

/// Handle to the shared mock store. Cheap to clone.
#[derive(Clone)]
pub struct MockBackend {
    store: Arc<RwLock<Store>>,
    latency: Latency,
}

impl MockBackend {
    /// Create a backend over freshly seeded data.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::seeded())),
            latency,
        }
    }

    #[must_use]
    pub const fn latency(&self) -> Latency {
        self.latency
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    pub async fn categories(&self) -> Vec<Category> {
        self.latency.wait(Delay::Read).await;
        self.store.read().await.categories.clone()
    }

    /// Subcategories whose parent is exactly `category`.
    pub async fn subcategories_of(&self, category: &str) -> Vec<Subcategory> {
        self.latency.wait(Delay::Read).await;
        self.store
            .read()
            .await
            .subcategories
            .iter()
            .filter(|s| s.parent == category)
            .cloned()
            .collect()
    }

    pub async fn all_subcategories(&self) -> Vec<Subcategory> {
        self.latency.wait(Delay::Read).await;
        self.store.read().await.subcategories.clone()
    }

    pub async fn items(&self) -> Vec<Item> {
        self.latency.wait(Delay::Read).await;
        self.store.read().await.items.clone()
    }

    /// Items whose category name is exactly `category`.
    pub async fn items_in_category(&self, category: &str) -> Vec<Item> {
        self.latency.wait(Delay::Read).await;
        self.store
            .read()
            .await
            .items
            .iter()
            .filter(|i| i.category == category)
            .cloned()
            .collect()
    }

    /// Items whose subcategory name is exactly `subcategory`.
    pub async fn items_in_subcategory(&self, subcategory: &str) -> Vec<Item> {
        self.latency.wait(Delay::Read).await;
        self.store
            .read()
            .await
            .items
            .iter()
            .filter(|i| i.subcategory == subcategory)
            .cloned()
            .collect()
    }

    pub async fn item(&self, id: ItemId) -> Option<Item> {
        self.latency.wait(Delay::Read).await;
        self.store
            .read()
            .await
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    /// Look up several items at once, keeping the order of `ids` and
    /// skipping unknown ones.
    pub async fn items_by_id(&self, ids: impl IntoIterator<Item = ItemId>) -> Vec<Item> {
        self.latency.wait(Delay::Read).await;
        let store = self.store.read().await;
        ids.into_iter()
            .filter_map(|id| store.items.iter().find(|i| i.id == id).cloned())
            .collect()
    }

    /// The cart a visitor starts with.
    pub async fn default_cart(&self) -> Vec<CartLine> {
        self.latency.wait(Delay::Read).await;
        self.store.read().await.default_cart.clone()
    }

    /// The wishlist a visitor starts with.
    pub async fn default_wishlist(&self) -> BTreeSet<ItemId> {
        self.latency.wait(Delay::Read).await;
        self.store.read().await.default_wishlist.clone()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    pub async fn find_user(&self, email: &Email) -> Option<User> {
        self.latency.wait(Delay::Submit).await;
        self.store
            .read()
            .await
            .users
            .iter()
            .find(|u| &u.email == email)
            .cloned()
    }

    /// Add a user to the directory.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Duplicate` if the email is already registered.
    pub async fn register_user(&self, email: Email, role: Role) -> Result<User, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        if store.users.iter().any(|u| u.email == email) {
            return Err(DataError::Duplicate(format!("user {email}")));
        }
        let user = User { email, role };
        store.users.push(user.clone());
        Ok(user)
    }

    // -------------------------------------------------------------------------
    // Addresses
    // -------------------------------------------------------------------------

    pub async fn addresses(&self) -> Vec<Address> {
        self.latency.wait(Delay::Read).await;
        self.store.read().await.addresses.clone()
    }

    pub async fn address(&self, id: AddressId) -> Option<Address> {
        self.latency.wait(Delay::Read).await;
        self.store
            .read()
            .await
            .addresses
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub async fn add_address(&self, fields: AddressFields) -> Address {
        self.latency.wait(Delay::Write).await;
        let mut store = self.store.write().await;
        let id = AddressId::new(next_id(&store.addresses, |a| a.id.get()));
        let address = fields.into_address(id);
        store.addresses.push(address.clone());
        address
    }

    /// # Errors
    ///
    /// Returns `DataError::NotFound` if no address has this ID.
    pub async fn update_address(
        &self,
        id: AddressId,
        fields: AddressFields,
    ) -> Result<Address, DataError> {
        self.latency.wait(Delay::Write).await;
        let mut store = self.store.write().await;
        let slot = store
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DataError::NotFound(format!("address {id}")))?;
        *slot = fields.into_address(id);
        Ok(slot.clone())
    }

    /// # Errors
    ///
    /// Returns `DataError::NotFound` if no address has this ID.
    pub async fn delete_address(&self, id: AddressId) -> Result<(), DataError> {
        self.latency.wait(Delay::Write).await;
        let mut store = self.store.write().await;
        let before = store.addresses.len();
        store.addresses.retain(|a| a.id != id);
        if store.addresses.len() == before {
            return Err(DataError::NotFound(format!("address {id}")));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Every order, newest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.latency.wait(Delay::Read).await;
        newest_first(self.store.read().await.orders.iter())
    }

    /// Orders placed by `customer`, newest first.
    pub async fn orders_for(&self, customer: &Email) -> Vec<Order> {
        self.latency.wait(Delay::Read).await;
        newest_first(
            self.store
                .read()
                .await
                .orders
                .iter()
                .filter(|o| &o.customer == customer),
        )
    }

    /// Orders assigned to the delivery person registered under `email`,
    /// newest first.
    pub async fn orders_assigned_to(&self, email: &Email) -> Vec<Order> {
        self.latency.wait(Delay::Read).await;
        let store = self.store.read().await;
        let Some(person) = store.delivery_people.iter().find(|p| &p.email == email) else {
            return Vec::new();
        };
        newest_first(
            store
                .orders
                .iter()
                .filter(|o| o.delivery_person == Some(person.id)),
        )
    }

    pub async fn order(&self, id: &str) -> Option<Order> {
        self.latency.wait(Delay::Read).await;
        self.store
            .read()
            .await
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    /// Record a new order with status CREATED.
    pub async fn place_order(
        &self,
        customer: Email,
        lines: &[CartLine],
        address: Option<Address>,
    ) -> Order {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let order = Order {
            id: store.fresh_order_id(),
            date: Utc::now().date_naive(),
            status: OrderStatus::Created,
            customer,
            lines: lines.iter().map(OrderLine::from).collect(),
            address,
            delivery_person: None,
        };
        store.orders.push(order.clone());
        order
    }

    /// # Errors
    ///
    /// Returns `DataError::NotFound` if no order has this ID.
    pub async fn set_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let order = store.order_mut(id)?;
        order.status = status;
        Ok(order.clone())
    }

    /// Hand an order to a delivery person, marking it OUT_FOR_DELIVERY.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if the order or the delivery person
    /// does not exist.
    pub async fn assign_order(
        &self,
        id: &str,
        person: DeliveryPersonId,
    ) -> Result<Order, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        if !store.delivery_people.iter().any(|p| p.id == person) {
            return Err(DataError::NotFound(format!("delivery person {person}")));
        }
        let order = store.order_mut(id)?;
        order.delivery_person = Some(person);
        order.status = OrderStatus::OutForDelivery;
        Ok(order.clone())
    }

    // -------------------------------------------------------------------------
    // Delivery people
    // -------------------------------------------------------------------------

    pub async fn delivery_people(&self) -> Vec<DeliveryPerson> {
        self.latency.wait(Delay::Read).await;
        self.store.read().await.delivery_people.clone()
    }

    /// Register a delivery person and give them a DELIVERY_MAN login.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Duplicate` if the email is already registered or
    /// another delivery person has the same phone number.
    pub async fn register_delivery_person(
        &self,
        name: String,
        phone: String,
        email: Email,
    ) -> Result<DeliveryPerson, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        if store.users.iter().any(|u| u.email == email)
            || store.delivery_people.iter().any(|p| p.email == email)
        {
            return Err(DataError::Duplicate(format!("account {email}")));
        }
        if store
            .delivery_people
            .iter()
            .any(|p| same_phone(&p.phone, &phone))
        {
            return Err(DataError::Duplicate(format!("phone {phone}")));
        }
        let person = DeliveryPerson {
            id: DeliveryPersonId::new(next_id(&store.delivery_people, |p| p.id.get())),
            name,
            phone,
            email: email.clone(),
        };
        store.users.push(User {
            email,
            role: Role::DeliveryMan,
        });
        store.delivery_people.push(person.clone());
        Ok(person)
    }

    // -------------------------------------------------------------------------
    // Catalog management
    // -------------------------------------------------------------------------

    pub async fn add_category(&self, name: String, image: String) -> Category {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let category = Category {
            id: CategoryId::new(next_id(&store.categories, |c| c.id.get())),
            name,
            image,
        };
        store.categories.push(category.clone());
        category
    }

    /// Rename a category, optionally replacing its image. Subcategories and
    /// items that named the old category follow the rename.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if no category has this ID.
    pub async fn update_category(
        &self,
        id: CategoryId,
        name: String,
        image: Option<String>,
    ) -> Result<Category, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let category = store
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DataError::NotFound(format!("category {id}")))?;
        let old = std::mem::replace(&mut category.name, name.clone());
        if let Some(image) = image {
            category.image = image;
        }
        let updated = category.clone();

        for sub in store.subcategories.iter_mut().filter(|s| s.parent == old) {
            sub.parent.clone_from(&name);
        }
        for item in store.items.iter_mut().filter(|i| i.category == old) {
            item.category.clone_from(&name);
        }
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `DataError::NotFound` if no category has this ID.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let before = store.categories.len();
        store.categories.retain(|c| c.id != id);
        if store.categories.len() == before {
            return Err(DataError::NotFound(format!("category {id}")));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DataError::NotFound` if the parent category does not exist.
    pub async fn add_subcategory(
        &self,
        name: String,
        parent: String,
        image: String,
    ) -> Result<Subcategory, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        if !store.categories.iter().any(|c| c.name == parent) {
            return Err(DataError::NotFound(format!("category {parent}")));
        }
        let subcategory = Subcategory {
            id: SubcategoryId::new(next_id(&store.subcategories, |s| s.id.get())),
            name,
            parent,
            image,
        };
        store.subcategories.push(subcategory.clone());
        Ok(subcategory)
    }

    /// Rename a subcategory, optionally replacing its image. Items follow
    /// the rename.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if no subcategory has this ID.
    pub async fn update_subcategory(
        &self,
        id: SubcategoryId,
        name: String,
        image: Option<String>,
    ) -> Result<Subcategory, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let subcategory = store
            .subcategories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DataError::NotFound(format!("subcategory {id}")))?;
        let old = std::mem::replace(&mut subcategory.name, name.clone());
        if let Some(image) = image {
            subcategory.image = image;
        }
        let updated = subcategory.clone();

        for item in store.items.iter_mut().filter(|i| i.subcategory == old) {
            item.subcategory.clone_from(&name);
        }
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `DataError::NotFound` if no subcategory has this ID.
    pub async fn delete_subcategory(&self, id: SubcategoryId) -> Result<(), DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let before = store.subcategories.len();
        store.subcategories.retain(|s| s.id != id);
        if store.subcategories.len() == before {
            return Err(DataError::NotFound(format!("subcategory {id}")));
        }
        Ok(())
    }

    /// Add an item under the named subcategory; its category is the
    /// subcategory's parent.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if the subcategory does not exist.
    pub async fn add_item(&self, new: NewItem) -> Result<Item, DataError> {
        self.latency.wait(Delay::Submit).await;
        let mut store = self.store.write().await;
        let category = store
            .subcategories
            .iter()
            .find(|s| s.name == new.subcategory)
            .map(|s| s.parent.clone())
            .ok_or_else(|| DataError::NotFound(format!("subcategory {}", new.subcategory)))?;
        let item = Item {
            id: ItemId::new(next_id(&store.items, |i| i.id.get())),
            name: new.name,
            price: new.price,
            description: new.description,
            photos: new.photo.into_iter().collect(),
            category,
            subcategory: new.subcategory,
        };
        store.items.push(item.clone());
        Ok(item)
    }
}

/// Sort by date descending; among equal dates the later-inserted order
/// comes first.
fn newest_first<'a>(orders: impl DoubleEndedIterator<Item = &'a Order>) -> Vec<Order> {
    let mut out: Vec<Order> = orders.rev().cloned().collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furnicraft_core::Price;

    use super::*;

    fn backend() -> MockBackend {
        MockBackend::new(Latency::NONE)
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_latency_scales_base_delay() {
        assert_eq!(
            Latency::REALISTIC.duration(Delay::Read),
            Duration::from_millis(300)
        );
        assert_eq!(
            Latency::percent(50).duration(Delay::Submit),
            Duration::from_millis(250)
        );
        assert!(Latency::NONE.duration(Delay::Write).is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_wait_for_delay() {
        let backend = MockBackend::new(Latency::REALISTIC);
        let start = tokio::time::Instant::now();
        backend.categories().await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_lookups_are_exact_name_matches() {
        let backend = backend();
        let subs = backend.subcategories_of("Sofa").await;
        assert_eq!(subs.len(), 3);
        assert!(backend.subcategories_of("sofa").await.is_empty());

        let dining = backend.items_in_subcategory("Dining Chair").await;
        assert_eq!(dining.len(), 1);
        assert_eq!(dining[0].id, ItemId::new(11));

        let tables = backend.items_in_category("Table").await;
        assert!(tables.iter().all(|i| i.category == "Table"));
    }

    #[tokio::test]
    async fn test_defaults_resolve_to_items() {
        let backend = backend();
        let wishlist = backend.default_wishlist().await;
        let items = backend.items_by_id(wishlist.iter().copied()).await;
        assert_eq!(items.len(), wishlist.len());

        let cart = backend.default_cart().await;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].line_total(), Price::from_rupees(12_000));
    }

    #[tokio::test]
    async fn test_register_user_rejects_duplicate() {
        let backend = backend();
        let err = backend
            .register_user(email("Rajesh@example.com"), Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Duplicate(_)));

        backend
            .register_user(email("new@example.com"), Role::User)
            .await
            .unwrap();
        let found = backend.find_user(&email("new@example.com")).await.unwrap();
        assert_eq!(found.role, Role::User);
    }

    #[tokio::test]
    async fn test_address_crud() {
        let backend = backend();
        let added = backend
            .add_address(AddressFields {
                full_name: "Anita Rao".to_string(),
                city: "Pune".to_string(),
                ..AddressFields::default()
            })
            .await;
        assert_eq!(added.id, AddressId::new(3));

        let updated = backend
            .update_address(
                added.id,
                AddressFields {
                    full_name: "Anita Rao".to_string(),
                    city: "Nagpur".to_string(),
                    ..AddressFields::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.city, "Nagpur");

        backend.delete_address(added.id).await.unwrap();
        assert!(backend.address(added.id).await.is_none());
        assert!(backend.delete_address(added.id).await.is_err());
    }

    #[tokio::test]
    async fn test_place_order_generates_id() {
        let backend = backend();
        let cart = backend.default_cart().await;
        let order = backend
            .place_order(email("rajesh@example.com"), &cart, None)
            .await;

        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.id.len(), "ORD-".len() + 6);
        assert!(order.id["ORD-".len()..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(order.total(), Price::from_rupees(12_000));

        let mine = backend.orders_for(&email("rajesh@example.com")).await;
        assert_eq!(mine.first().map(|o| o.id.as_str()), Some(order.id.as_str()));
    }

    #[tokio::test]
    async fn test_orders_newest_first() {
        let backend = backend();
        let ids: Vec<String> = backend.orders().await.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, ["ORD-002", "ORD-001", "ORD-003"]);
    }

    #[tokio::test]
    async fn test_assign_order_marks_out_for_delivery() {
        let backend = backend();
        let order = backend
            .assign_order("ORD-002", DeliveryPersonId::new(2))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::OutForDelivery);
        assert_eq!(order.delivery_person, Some(DeliveryPersonId::new(2)));

        let priya = backend.orders_assigned_to(&email("priya@example.com")).await;
        assert_eq!(priya.len(), 1);

        assert!(
            backend
                .assign_order("ORD-002", DeliveryPersonId::new(99))
                .await
                .is_err()
        );
        assert!(
            backend
                .assign_order("ORD-999", DeliveryPersonId::new(1))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_register_delivery_person_creates_login() {
        let backend = backend();
        let person = backend
            .register_delivery_person(
                "Amit Shah".to_string(),
                "+91 9000000000".to_string(),
                email("amit@example.com"),
            )
            .await
            .unwrap();
        assert_eq!(person.id, DeliveryPersonId::new(3));

        let user = backend.find_user(&email("amit@example.com")).await.unwrap();
        assert_eq!(user.role, Role::DeliveryMan);

        let err = backend
            .register_delivery_person(
                "Again".to_string(),
                "1".to_string(),
                email("amit@example.com"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Duplicate(_)));
    }

    #[test]
    fn test_same_phone_ignores_formatting() {
        assert!(same_phone("+91 98765-43210", "+919876543210"));
        assert!(!same_phone("+91 9876543210", "+91 9876543211"));
        assert!(!same_phone("", " "));
    }

    #[tokio::test]
    async fn test_register_delivery_person_rejects_taken_phone() {
        let backend = backend();
        let err = backend
            .register_delivery_person(
                "Raj Again".to_string(),
                "+919876543210".to_string(),
                email("raj.two@example.com"),
            )
            .await
            .unwrap_err();
        assert_eq!(err, DataError::Duplicate("phone +919876543210".to_string()));
        assert!(backend.find_user(&email("raj.two@example.com")).await.is_none());
    }

    #[tokio::test]
    async fn test_category_rename_follows_through() {
        let backend = backend();
        backend
            .update_category(CategoryId::new(4), "Tables".to_string(), None)
            .await
            .unwrap();

        assert_eq!(backend.subcategories_of("Tables").await.len(), 2);
        assert!(backend.items_in_category("Table").await.is_empty());
        assert_eq!(backend.items_in_category("Tables").await.len(), 3);
    }

    #[tokio::test]
    async fn test_add_item_derives_category() {
        let backend = backend();
        let item = backend
            .add_item(NewItem {
                name: "Recliner".to_string(),
                price: Price::from_rupees(22_000),
                description: "Power recliner".to_string(),
                photo: None,
                subcategory: "Armchair".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(item.category, "Chair");
        assert_eq!(item.id, ItemId::new(13));
        assert_eq!(item.photo(), PLACEHOLDER_IMAGE);

        let err = backend
            .add_item(NewItem {
                name: "Ghost".to_string(),
                price: Price::from_rupees(1),
                description: String::new(),
                photo: None,
                subcategory: "Nope".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_subcategory_crud() {
        let backend = backend();
        let sub = backend
            .add_subcategory("Bar Stool".to_string(), "Chair".to_string(), String::new())
            .await
            .unwrap();
        assert_eq!(sub.id, SubcategoryId::new(11));

        assert!(
            backend
                .add_subcategory("Bunk".to_string(), "Bed".to_string(), String::new())
                .await
                .is_err()
        );

        backend
            .update_subcategory(SubcategoryId::new(4), "Dining Chairs".to_string(), None)
            .await
            .unwrap();
        assert_eq!(backend.items_in_subcategory("Dining Chairs").await.len(), 1);

        backend.delete_subcategory(sub.id).await.unwrap();
        assert!(backend.delete_subcategory(sub.id).await.is_err());
    }
}
