//! Catalog browser route handler.
//!
//! The whole browser state (view, selected names, search, sort, layout)
//! travels in the query string, so every link on the page, breadcrumbs
//! included, restores an exact view.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{self, Breadcrumb, BrowseQuery, BrowseState, Layout, View};
use crate::data::{Category, Subcategory};
use crate::middleware::{Nav, OptionalAuth};
use crate::services::{cart::Cart, wishlist::Wishlist};
use crate::state::AppState;

use super::ItemCardView;

#[derive(Clone)]
pub struct CategoryCardView {
    pub name: String,
    pub image: String,
    pub href: String,
}

#[derive(Clone)]
pub struct SubcategoryCardView {
    pub name: String,
    pub parent: String,
    pub image: String,
    pub href: String,
}

/// Category browser template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/browse.html")]
pub struct BrowseTemplate {
    pub nav: Nav,
    pub title: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub back_href: Option<String>,
    pub is_root: bool,
    pub is_list: bool,
    // Search form state
    pub view_name: String,
    pub category: String,
    pub subcategory: String,
    pub search: String,
    pub sort: String,
    pub layout: String,
    pub sort_label: String,
    pub sort_toggle_href: String,
    pub layout_toggle_label: String,
    pub layout_toggle_href: String,
    /// Where cart and wishlist toggles come back to.
    pub return_to: String,
    pub categories: Vec<CategoryCardView>,
    pub subcategories: Vec<SubcategoryCardView>,
    pub items: Vec<ItemCardView>,
    /// Nothing in the current view matches the search.
    pub is_empty: bool,
}

fn category_card(state: &BrowseState, category: &Category) -> CategoryCardView {
    CategoryCardView {
        name: category.name.clone(),
        image: category.image.clone(),
        href: state.category_href(&category.name),
    }
}

fn subcategory_card(state: &BrowseState, subcategory: &Subcategory) -> SubcategoryCardView {
    SubcategoryCardView {
        name: subcategory.name.clone(),
        parent: subcategory.parent.clone(),
        image: subcategory.image.clone(),
        href: state.subcategory_href(subcategory),
    }
}

/// Display the catalog browser.
#[instrument(skip(state, session, nav, user))]
pub async fn browse(
    State(state): State<AppState>,
    session: Session,
    nav: Nav,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<BrowseQuery>,
) -> impl IntoResponse {
    let browse = BrowseState::from(query);
    let content = catalog::browser::load(state.backend(), &browse).await;

    // Toggle states only mean something to a logged-in visitor
    let (wishlist, cart) = if user.is_some() {
        (Wishlist::peek(&session).await, Cart::peek(&session).await)
    } else {
        (None, None)
    };

    let (title, category, subcategory) = match &browse.view {
        View::Categories => ("Categories".to_string(), String::new(), String::new()),
        View::Subcategories { category } => (category.clone(), category.clone(), String::new()),
        View::Items {
            category,
            subcategory,
        } => (subcategory.clone(), category.clone(), subcategory.clone()),
    };
    let view_name = match browse.view {
        View::Categories => "categories",
        View::Subcategories { .. } => "subcategories",
        View::Items { .. } => "items",
    };

    let is_empty = content.categories.is_empty()
        && content.subcategories.is_empty()
        && content.items.is_empty();

    BrowseTemplate {
        nav,
        title,
        breadcrumbs: browse.breadcrumbs(),
        back_href: browse.back_href(),
        is_root: browse.view == View::Categories,
        is_list: browse.layout == Layout::List,
        view_name: view_name.to_string(),
        category,
        subcategory,
        search: browse.search.clone(),
        sort: browse.sort.as_str().to_string(),
        layout: browse.layout.as_str().to_string(),
        sort_label: browse.sort.label().to_string(),
        sort_toggle_href: browse.sort_toggle_href(),
        layout_toggle_label: match browse.layout {
            Layout::Grid => "List view".to_string(),
            Layout::List => "Grid view".to_string(),
        },
        layout_toggle_href: browse.layout_toggle_href(),
        return_to: browse.href(),
        categories: content
            .categories
            .iter()
            .map(|c| category_card(&browse, c))
            .collect(),
        subcategories: content
            .subcategories
            .iter()
            .map(|s| subcategory_card(&browse, s))
            .collect(),
        items: content
            .items
            .iter()
            .map(|i| ItemCardView::new(i, wishlist.as_ref(), cart.as_ref()))
            .collect(),
        is_empty,
    }
}
