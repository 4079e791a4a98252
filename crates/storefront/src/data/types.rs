//! Records served by the mock data layer.
//!
//! Catalog records reference each other by name (a subcategory names its
//! parent category, an item names both), never by ID.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use furnicraft_core::{
    AddressId, CategoryId, DeliveryPersonId, Email, ItemId, OrderStatus, Price, Role,
    SubcategoryId,
};

/// Image shown when an item has no photos.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    /// Name of the parent category.
    pub parent: String,
    pub image: String,
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub photos: Vec<String>,
    pub category: String,
    pub subcategory: String,
}

impl Item {
    /// The first photo, or the placeholder image.
    #[must_use]
    pub fn photo(&self) -> &str {
        self.photos.first().map_or(PLACEHOLDER_IMAGE, String::as_str)
    }
}

/// One line of a cart, denormalized from the item so the cart renders
/// without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub photo: String,
}

impl CartLine {
    /// A new line for `item`.
    #[must_use]
    pub fn for_item(item: &Item, quantity: u32) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity,
            photo: item.photo().to_string(),
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A delivery address in the address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub full_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Address fields without an ID, for adds and updates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressFields {
    pub full_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressFields {
    pub(crate) fn into_address(self, id: AddressId) -> Address {
        Address {
            id,
            full_name: self.full_name,
            phone: self.phone,
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// `ORD-` followed by digits.
    pub id: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub customer: Email,
    pub lines: Vec<OrderLine>,
    pub address: Option<Address>,
    pub delivery_person: Option<DeliveryPersonId>,
}

impl Order {
    /// Sum of the line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
    pub image: String,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id,
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price,
            image: line.photo.clone(),
        }
    }
}

/// An entry in the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: Email,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPerson {
    pub id: DeliveryPersonId,
    pub name: String,
    pub phone: String,
    pub email: Email,
}

/// Fields for a new catalog item. The category is derived from the subcategory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub photo: Option<String>,
    pub subcategory: String,
}
