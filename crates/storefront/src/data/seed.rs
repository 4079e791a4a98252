//! Seed records loaded into the mock store at startup.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use furnicraft_core::{
    AddressId, CategoryId, DeliveryPersonId, Email, ItemId, OrderStatus, Price, Role,
    SubcategoryId,
};

use super::types::{
    Address, CartLine, Category, DeliveryPerson, Item, Order, OrderLine, Subcategory, User,
};

const SOFA_PHOTO: &str = "https://pelicanessentials.com/cdn/shop/files/three_seater_grey_0002Photoroom.jpg?v=1751589493&width=2048";
const SOFA_THUMB: &str = "https://pelicanessentials.com/cdn/shop/files/three_seater_grey_0002Photoroom.jpg?v=1751589493&width=300";
const DINING_CHAIRS_PHOTO: &str =
    "https://ganpatiarts.com/cdn/shop/files/Dining_6_natural_8.jpg?v=1765796531&width=400";

fn image(n: u32) -> String {
    format!("/static/images/furniture-{n}.svg")
}

/// Seed emails are literals known to be valid.
fn email(s: &str) -> Email {
    Email::parse(s).unwrap_or_else(|e| unreachable!("invalid seed email {s}: {e}"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub(super) fn categories() -> Vec<Category> {
    [(1, "Sofa", 1), (2, "Chair", 8), (3, "TV Stand", 2), (4, "Table", 4)]
        .into_iter()
        .map(|(id, name, img)| Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            image: image(img),
        })
        .collect()
}

pub(super) fn subcategories() -> Vec<Subcategory> {
    [
        (1, "3-Seater Sofa", "Sofa", 6),
        (2, "Sectional Sofa", "Sofa", 3),
        (3, "Corner Sofa", "Sofa", 5),
        (4, "Dining Chair", "Chair", 10),
        (5, "Office Chair", "Chair", 8),
        (6, "Armchair", "Chair", 9),
        (7, "Wooden Stand", "TV Stand", 11),
        (8, "Steel Stand", "TV Stand", 12),
        (9, "Coffee Table", "Table", 13),
        (10, "Dining Table", "Table", 14),
    ]
    .into_iter()
    .map(|(id, name, parent, img)| Subcategory {
        id: SubcategoryId::new(id),
        name: name.to_string(),
        parent: parent.to_string(),
        image: image(img),
    })
    .collect()
}

pub(super) fn items() -> Vec<Item> {
    let rows: [(u32, &str, i64, &str, String, &str, &str); 12] = [
        (
            1,
            "Premium 3-Seater Sofa",
            35_000,
            "High-quality grey fabric sofa with superior comfort",
            SOFA_PHOTO.to_string(),
            "Sofa",
            "3-Seater Sofa",
        ),
        (
            2,
            "L-Shaped Sectional Sofa",
            58_000,
            "Spacious sectional with a reversible chaise and deep seating",
            image(3),
            "Sofa",
            "Sectional Sofa",
        ),
        (
            3,
            "Compact Corner Sofa",
            42_000,
            "Space-saving corner sofa in durable linen upholstery",
            image(5),
            "Sofa",
            "Corner Sofa",
        ),
        (
            4,
            "Velvet 3-Seater Sofa",
            39_500,
            "Plush velvet sofa with solid wood legs",
            image(6),
            "Sofa",
            "3-Seater Sofa",
        ),
        (
            5,
            "Ergonomic Mesh Office Chair",
            8_500,
            "Breathable mesh back with adjustable lumbar support",
            image(8),
            "Chair",
            "Office Chair",
        ),
        (
            6,
            "Wingback Armchair",
            15_500,
            "Classic wingback armchair with button tufting",
            image(9),
            "Chair",
            "Armchair",
        ),
        (
            7,
            "Sheesham Wood TV Unit",
            18_000,
            "Solid sheesham TV unit with two drawers and open shelving",
            image(11),
            "TV Stand",
            "Wooden Stand",
        ),
        (
            8,
            "Industrial Steel TV Stand",
            11_000,
            "Powder-coated steel frame with tempered glass shelves",
            image(12),
            "TV Stand",
            "Steel Stand",
        ),
        (
            9,
            "Round Glass Coffee Table",
            9_500,
            "Tempered glass top on a brushed brass base",
            image(13),
            "Table",
            "Coffee Table",
        ),
        (
            10,
            "6-Seater Dining Table",
            32_000,
            "Mango wood dining table that seats six",
            image(14),
            "Table",
            "Dining Table",
        ),
        (
            11,
            "Wooden Dining Chairs (Set of 4)",
            12_000,
            "Natural finish dining chairs with cushioned seats",
            DINING_CHAIRS_PHOTO.to_string(),
            "Chair",
            "Dining Chair",
        ),
        (
            12,
            "Marble Top Coffee Table",
            14_500,
            "White marble top with a matte black metal frame",
            image(13),
            "Table",
            "Coffee Table",
        ),
    ];

    rows.into_iter()
        .map(
            |(id, name, price, description, photo, category, subcategory)| Item {
                id: ItemId::new(id),
                name: name.to_string(),
                price: Price::from_rupees(price),
                description: description.to_string(),
                photos: vec![photo],
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            },
        )
        .collect()
}

pub(super) fn default_cart() -> Vec<CartLine> {
    vec![CartLine {
        item_id: ItemId::new(11),
        name: "Wooden Dining Chairs (Set of 4)".to_string(),
        price: Price::from_rupees(12_000),
        quantity: 1,
        photo: DINING_CHAIRS_PHOTO.to_string(),
    }]
}

pub(super) fn default_wishlist() -> BTreeSet<ItemId> {
    BTreeSet::from([ItemId::new(2), ItemId::new(12)])
}

pub(super) fn users() -> Vec<User> {
    vec![
        User {
            email: email("rajesh@example.com"),
            role: Role::User,
        },
        User {
            email: email("admin@example.com"),
            role: Role::Admin,
        },
        User {
            email: email("raj@example.com"),
            role: Role::DeliveryMan,
        },
        User {
            email: email("priya@example.com"),
            role: Role::DeliveryMan,
        },
    ]
}

pub(super) fn addresses() -> Vec<Address> {
    vec![
        Address {
            id: AddressId::new(1),
            full_name: "Rajesh Kumar".to_string(),
            phone: "+91 9876543210".to_string(),
            street: "Flat 4B, Emerald Heights, Park Road, Andheri East".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            postal_code: "400069".to_string(),
            country: "India".to_string(),
        },
        Address {
            id: AddressId::new(2),
            full_name: "Rajesh Kumar".to_string(),
            phone: "+91 9876543210".to_string(),
            street: "Plot 56, New Delhi Nagar, Near Metro Station".to_string(),
            city: "Delhi".to_string(),
            state: "Delhi".to_string(),
            postal_code: "110001".to_string(),
            country: "India".to_string(),
        },
    ]
}

pub(super) fn delivery_people() -> Vec<DeliveryPerson> {
    vec![
        DeliveryPerson {
            id: DeliveryPersonId::new(1),
            name: "Raj Kumar".to_string(),
            phone: "+91 9876543210".to_string(),
            email: email("raj@example.com"),
        },
        DeliveryPerson {
            id: DeliveryPersonId::new(2),
            name: "Priya Singh".to_string(),
            phone: "+91 9876543211".to_string(),
            email: email("priya@example.com"),
        },
    ]
}

pub(super) fn orders(addresses: &[Address]) -> Vec<Order> {
    let rajesh = email("rajesh@example.com");
    let home = addresses.first().cloned();
    let office = addresses.get(1).cloned();

    vec![
        Order {
            id: "ORD-001".to_string(),
            date: date(2026, 1, 20),
            status: OrderStatus::ReadyForDelivery,
            customer: rajesh.clone(),
            lines: vec![OrderLine {
                item_id: ItemId::new(1),
                name: "Premium 3-Seater Sofa".to_string(),
                quantity: 1,
                price: Price::from_rupees(35_000),
                image: SOFA_THUMB.to_string(),
            }],
            address: home.clone(),
            delivery_person: Some(DeliveryPersonId::new(1)),
        },
        Order {
            id: "ORD-002".to_string(),
            date: date(2026, 1, 24),
            status: OrderStatus::Paid,
            customer: rajesh.clone(),
            lines: vec![
                OrderLine {
                    item_id: ItemId::new(11),
                    name: "Wooden Dining Chairs (Set of 4)".to_string(),
                    quantity: 1,
                    price: Price::from_rupees(12_000),
                    image: DINING_CHAIRS_PHOTO.to_string(),
                },
                OrderLine {
                    item_id: ItemId::new(9),
                    name: "Round Glass Coffee Table".to_string(),
                    quantity: 1,
                    price: Price::from_rupees(9_500),
                    image: image(13),
                },
            ],
            address: office,
            delivery_person: None,
        },
        Order {
            id: "ORD-003".to_string(),
            date: date(2026, 1, 12),
            status: OrderStatus::Delivered,
            customer: rajesh,
            lines: vec![OrderLine {
                item_id: ItemId::new(6),
                name: "Wingback Armchair".to_string(),
                quantity: 2,
                price: Price::from_rupees(15_500),
                image: image(9),
            }],
            address: home,
            delivery_person: Some(DeliveryPersonId::new(1)),
        },
    ]
}
