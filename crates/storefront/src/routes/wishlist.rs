//! Wishlist route handlers.

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

use crate::error::Result;
use crate::middleware::{Nav, OptionalAuth, RequireAuth};
use crate::services::{cart::Cart, wishlist::Wishlist};
use crate::state::AppState;

use super::{ItemCardView, MessageQuery, local_path, redirect_error, redirect_success};

const WISHLIST_PATH: &str = "/wishlist";

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistTemplate {
    pub nav: Nav,
    pub items: Vec<ItemCardView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Form naming one item, with the page to come back to.
#[derive(Debug, Deserialize)]
pub struct WishlistItemForm {
    pub item_id: String,
    pub return_to: Option<String>,
}

impl WishlistItemForm {
    fn item_id(&self) -> Option<ItemId> {
        self.item_id.parse().ok()
    }
}

/// Display the wishlisted items.
#[instrument(skip(state, session, nav))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    mut nav: Nav,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let backend = state.backend();
    let wishlist = Wishlist::load(&session, backend).await?;
    let cart = Cart::peek(&session).await;
    nav.wishlist_count = wishlist.len();

    let items = backend.items_by_id(wishlist.ids()).await;
    Ok(WishlistTemplate {
        nav,
        items: items
            .iter()
            .map(|i| ItemCardView::new(i, Some(&wishlist), cart.as_ref()))
            .collect(),
        error: query.error,
        success: query.success,
    })
}

/// Add the item if absent, remove it if present.
///
/// Anonymous visitors are sent to login and back.
#[instrument(skip(state, session, user))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<WishlistItemForm>,
) -> Result<Response> {
    let return_to = local_path(form.return_to.as_deref(), WISHLIST_PATH);
    if user.is_none() {
        return Ok(Redirect::to(&format!(
            "/auth/login?from={}",
            urlencoding::encode(&return_to)
        ))
        .into_response());
    }

    let backend = state.backend();
    let Some(item) = form.item_id() else {
        return Ok(redirect_error(&return_to, "Item not found").into_response());
    };
    let Some(item) = backend.item(item).await else {
        return Ok(redirect_error(&return_to, "Item not found").into_response());
    };

    let mut wishlist = Wishlist::load(&session, backend).await?;
    let added = wishlist.toggle(item.id);
    wishlist.save(&session).await?;

    let message = if added {
        format!("{} added to wishlist", item.name)
    } else {
        format!("{} removed from wishlist", item.name)
    };
    Ok(redirect_success(&return_to, &message).into_response())
}

/// Remove an item from the wishlist.
#[instrument(skip(state, session, _user))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<WishlistItemForm>,
) -> Result<Response> {
    let mut wishlist = Wishlist::load(&session, state.backend()).await?;
    if !form.item_id().is_some_and(|id| wishlist.remove(id)) {
        return Ok(redirect_error(WISHLIST_PATH, "Item is not in your wishlist").into_response());
    }
    wishlist.save(&session).await?;
    Ok(redirect_success(WISHLIST_PATH, "Removed from wishlist").into_response())
}

/// Put the item in the cart and take it off the wishlist.
#[instrument(skip(state, session, _user))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<WishlistItemForm>,
) -> Result<Response> {
    let backend = state.backend();
    let mut wishlist = Wishlist::load(&session, backend).await?;
    let Some(id) = form.item_id().filter(|id| wishlist.contains(*id)) else {
        return Ok(redirect_error(WISHLIST_PATH, "Item is not in your wishlist").into_response());
    };
    let Some(item) = backend.item(id).await else {
        return Ok(redirect_error(WISHLIST_PATH, "Item not found").into_response());
    };

    let mut cart = Cart::load(&session, backend).await?;
    cart.add(&item, 1);
    cart.save(&session).await?;
    wishlist.remove(id);
    wishlist.save(&session).await?;

    Ok(redirect_success(WISHLIST_PATH, &format!("{} moved to cart", item.name)).into_response())
}
