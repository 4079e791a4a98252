//! Cart route handlers.
//!
//! The cart is stored in the session. Every mutation is a form post that
//! redirects back with a banner message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use furnicraft_core::ItemId;

use crate::data::{Address, CartLine};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::{Nav, OptionalAuth, RequireAuth};
use crate::services::cart::Cart;
use crate::services::orders::OrderService;
use crate::state::AppState;

use super::{MessageQuery, local_path, redirect_error, redirect_success};

const CART_PATH: &str = "/cart";

// =============================================================================
// Views
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub item_id: u32,
    pub name: String,
    pub photo: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id.get(),
            name: line.name.clone(),
            photo: line.photo.clone(),
            quantity: line.quantity,
            price: line.price.display(),
            line_total: line.line_total().display(),
        }
    }
}

/// Delivery address option at checkout.
#[derive(Clone)]
pub struct AddressOptionView {
    pub id: u32,
    pub label: String,
    pub selected: bool,
}

impl AddressOptionView {
    fn new(address: &Address, selected: bool) -> Self {
        Self {
            id: address.id.get(),
            label: format!(
                "{}, {}, {}, {} {}",
                address.full_name,
                address.street,
                address.city,
                address.state,
                address.postal_code
            ),
            selected,
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: Nav,
    pub lines: Vec<CartLineView>,
    pub line_count: usize,
    pub total: String,
    pub addresses: Vec<AddressOptionView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: String,
    pub quantity: Option<String>,
    /// Page the button was on.
    pub return_to: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: String,
    pub quantity: String,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: String,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub address_id: Option<String>,
}

fn parse_item_id(raw: &str) -> Option<ItemId> {
    raw.parse().ok()
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session, nav))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    mut nav: Nav,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let backend = state.backend();
    let cart = Cart::load(&session, backend).await?;
    let summary = cart.summary();
    nav.cart_count = summary.count;

    let addresses = backend.addresses().await;
    let addresses = addresses
        .iter()
        .enumerate()
        .map(|(i, a)| AddressOptionView::new(a, i == 0))
        .collect();

    Ok(CartShowTemplate {
        nav,
        lines: cart.lines().iter().map(CartLineView::from).collect(),
        line_count: summary.count,
        total: summary.total.display(),
        addresses,
        error: query.error,
        success: query.success,
    })
}

/// Add an item to the cart.
///
/// Anonymous visitors are sent to login and then back to the page they
/// were on.
#[instrument(skip(state, session, user))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let return_to = local_path(form.return_to.as_deref(), CART_PATH);
    if user.is_none() {
        return Ok(Redirect::to(&format!(
            "/auth/login?from={}",
            urlencoding::encode(&return_to)
        ))
        .into_response());
    }

    let backend = state.backend();
    let Some(item) = parse_item_id(&form.item_id) else {
        return Ok(redirect_error(&return_to, "Item not found").into_response());
    };
    let Some(item) = backend.item(item).await else {
        return Ok(redirect_error(&return_to, "Item not found").into_response());
    };
    let quantity = form
        .quantity
        .as_deref()
        .and_then(|q| q.trim().parse::<u32>().ok())
        .unwrap_or(1);

    let mut cart = Cart::load(&session, backend).await?;
    cart.add(&item, quantity);
    cart.save(&session).await?;

    let item_id = item.id.to_string();
    add_breadcrumb("cart", "Added item", Some(&[("item_id", item_id.as_str())]));
    Ok(redirect_success(&return_to, &format!("{} added to cart", item.name)).into_response())
}

/// Update a line's quantity; anything below 1 removes the line.
#[instrument(skip(state, session, _user))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let (Some(id), Ok(quantity)) = (
        parse_item_id(&form.item_id),
        form.quantity.trim().parse::<i64>(),
    ) else {
        return Ok(redirect_error(CART_PATH, "Invalid quantity").into_response());
    };

    let mut cart = Cart::load(&session, state.backend()).await?;
    if !cart.set_quantity(id, quantity) {
        return Ok(redirect_error(CART_PATH, "Item is not in your cart").into_response());
    }
    cart.save(&session).await?;
    Ok(Redirect::to(CART_PATH).into_response())
}

/// Remove a line.
#[instrument(skip(state, session, _user))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = Cart::load(&session, state.backend()).await?;
    let removed = parse_item_id(&form.item_id).is_some_and(|id| cart.remove(id));
    if !removed {
        return Ok(redirect_error(CART_PATH, "Item is not in your cart").into_response());
    }
    cart.save(&session).await?;
    Ok(redirect_success(CART_PATH, "Item removed").into_response())
}

/// Empty the cart.
#[instrument(skip(session, _user))]
pub async fn clear(session: Session, RequireAuth(_user): RequireAuth) -> Result<Response> {
    Cart::default().save(&session).await?;
    Ok(redirect_success(CART_PATH, "Cart cleared").into_response())
}

/// Place an order for the cart's contents.
#[instrument(skip(state, session, user))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let backend = state.backend();
    let mut cart = Cart::load(&session, backend).await?;

    match OrderService::new(backend)
        .checkout(user.email, &cart, form.address_id.as_deref())
        .await
    {
        Ok(order) => {
            cart.clear();
            cart.save(&session).await?;
            Ok(redirect_success(
                "/orders",
                &format!("Order {} placed successfully", order.id),
            )
            .into_response())
        }
        Err(e) => {
            tracing::warn!("Checkout rejected: {}", e);
            Ok(redirect_error(CART_PATH, &e.user_message()).into_response())
        }
    }
}
