//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /categories             - Category browser (view, category, subcategory, q, sort, layout)
//! GET  /items                  - Item listing (q, category, sort, page, size)
//! GET  /configurator           - Sofa configurator (leg, color)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Signup page
//! POST /auth/register          - Signup action
//! POST /auth/logout            - Logout action
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page with checkout
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Update quantity
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//! POST /cart/checkout          - Place an order
//!
//! # Wishlist (requires auth)
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Add or remove an item
//! POST /wishlist/remove        - Remove an item
//! POST /wishlist/move-to-cart  - Move an item into the cart
//!
//! # Account (requires auth)
//! GET  /orders                 - Order history
//! POST /orders/{id}/cancel     - Cancel an order
//! GET  /profile                - Profile and address book
//! POST /profile/addresses      - Add address
//! POST /profile/addresses/{id} - Update address
//! POST /profile/addresses/{id}/delete - Delete address
//!
//! # Admin (requires ADMIN)
//! GET  /admin/orders                   - All orders
//! POST /admin/orders/{id}/status       - Change status
//! POST /admin/orders/{id}/assign       - Assign to delivery person
//! POST /admin/delivery-people          - Register delivery person
//! GET  /admin/catalog                  - Catalog forms
//! POST /admin/categories[/update|/delete]
//! POST /admin/subcategories[/update|/delete]
//! POST /admin/items                    - Add item
//!
//! # Delivery (requires DELIVERY_MAN)
//! GET  /delivery                       - Dashboard (tab)
//! POST /delivery/orders/{id}/otp       - Request confirmation code
//! POST /delivery/orders/{id}/confirm   - Confirm with code
//! POST /delivery/status                - Toggle availability
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod configurator;
pub mod delivery;
pub mod home;
pub mod items;
pub mod orders;
pub mod profile;
pub mod wishlist;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::data::Item;
use crate::services::{cart::Cart, wishlist::Wishlist};
use crate::state::AppState;

// =============================================================================
// Shared Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Redirect to `path` with a banner message in the query string.
pub(crate) fn redirect_with(path: &str, kind: &str, message: &str) -> Redirect {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!(
        "{path}{separator}{kind}={}",
        urlencoding::encode(message)
    ))
}

pub(crate) fn redirect_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}

pub(crate) fn redirect_success(path: &str, message: &str) -> Redirect {
    redirect_with(path, "success", message)
}

/// `raw` if it is a path on this site, otherwise `fallback`.
#[must_use]
pub fn local_path(raw: Option<&str>, fallback: &str) -> String {
    match raw.map(str::trim) {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => {
            p.to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Item card shown in grids and lists.
#[derive(Clone)]
pub struct ItemCardView {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub description: String,
    pub photo: String,
    pub category: String,
    pub subcategory: String,
    pub in_wishlist: bool,
    pub in_cart: bool,
}

impl ItemCardView {
    /// Card for `item`, with toggle states from the visitor's lists.
    pub fn new(item: &Item, wishlist: Option<&Wishlist>, cart: Option<&Cart>) -> Self {
        Self {
            id: item.id.get(),
            name: item.name.clone(),
            price: item.price.display(),
            description: item.description.clone(),
            photo: item.photo().to_string(),
            category: item.category.clone(),
            subcategory: item.subcategory.clone(),
            in_wishlist: wishlist.is_some_and(|w| w.contains(item.id)),
            in_cart: cart.is_some_and(|c| c.contains(item.id)),
        }
    }
}

impl From<&Item> for ItemCardView {
    fn from(item: &Item) -> Self {
        Self::new(item, None, None)
    }
}

// =============================================================================
// Routers
// =============================================================================

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
        .route("/move-to-cart", post(wishlist::move_to_cart))
}

/// Create the order history routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}/cancel", post(orders::cancel))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/addresses", post(profile::create_address))
        .route("/addresses/{id}", post(profile::update_address))
        .route("/addresses/{id}/delete", post(profile::delete_address))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::orders::index))
        .route("/orders/{id}/status", post(admin::orders::update_status))
        .route("/orders/{id}/assign", post(admin::orders::assign))
        .route("/delivery-people", post(admin::orders::register_delivery_person))
        .route("/catalog", get(admin::catalog::show))
        .route("/categories", post(admin::catalog::add_category))
        .route("/categories/update", post(admin::catalog::update_category))
        .route("/categories/delete", post(admin::catalog::delete_category))
        .route("/subcategories", post(admin::catalog::add_subcategory))
        .route(
            "/subcategories/update",
            post(admin::catalog::update_subcategory),
        )
        .route(
            "/subcategories/delete",
            post(admin::catalog::delete_subcategory),
        )
        .route("/items", post(admin::catalog::add_item))
}

/// Create the delivery dashboard routes router.
pub fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(delivery::dashboard))
        .route("/orders/{id}/otp", post(delivery::request_otp))
        .route("/orders/{id}/confirm", post(delivery::confirm))
        .route("/status", post(delivery::toggle_status))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/categories", get(categories::browse))
        .route("/items", get(items::index))
        .route("/configurator", get(configurator::show))
        // Auth routes
        .nest("/auth", auth_routes())
        // Shopper routes
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/orders", order_routes())
        .nest("/profile", profile_routes())
        // Staff routes
        .nest("/admin", admin_routes())
        .nest("/delivery", delivery_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_rejects_offsite_targets() {
        assert_eq!(local_path(Some("/cart"), "/"), "/cart");
        assert_eq!(local_path(Some("/items?q=sofa"), "/"), "/items?q=sofa");
        assert_eq!(local_path(Some("//evil.example"), "/"), "/");
        assert_eq!(local_path(Some("https://evil.example"), "/"), "/");
        assert_eq!(local_path(Some("/\\evil"), "/"), "/");
        assert_eq!(local_path(None, "/orders"), "/orders");
    }
}
