//! Item listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::listing::PAGE_SIZES;
use crate::catalog::{Listing, ListingQuery, ListingSort};
use crate::middleware::{Nav, OptionalAuth};
use crate::services::{cart::Cart, wishlist::Wishlist};
use crate::state::AppState;

use super::ItemCardView;

/// An entry of a `<select>`.
#[derive(Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A numbered page link.
#[derive(Clone)]
pub struct PageLinkView {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// Item listing template.
#[derive(Template, WebTemplate)]
#[template(path = "items/index.html")]
pub struct ItemsTemplate {
    pub nav: Nav,
    pub items: Vec<ItemCardView>,
    pub search: String,
    pub sort_options: Vec<OptionView>,
    pub category_options: Vec<OptionView>,
    pub size_options: Vec<OptionView>,
    pub total_entries: usize,
    /// e.g. `Showing 11-20 of 42`
    pub range_label: String,
    pub pages: Vec<PageLinkView>,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub return_to: String,
}

/// Display the item listing.
#[instrument(skip(state, session, nav, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    nav: Nav,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let listing = Listing::from(query);
    let backend = state.backend();
    let page = listing.apply(backend.items().await);
    let categories = backend.categories().await;

    let (wishlist, cart) = if user.is_some() {
        (Wishlist::peek(&session).await, Cart::peek(&session).await)
    } else {
        (None, None)
    };

    let range_label = if page.total_entries == 0 {
        "No items found".to_string()
    } else {
        let first = (page.number - 1) * page.size + 1;
        let last = first + page.entries.len() - 1;
        format!("Showing {first}-{last} of {}", page.total_entries)
    };

    let sort_options = ListingSort::OPTIONS
        .iter()
        .map(|(sort, label)| OptionView {
            value: sort.as_param(),
            label: (*label).to_string(),
            selected: *sort == listing.sort,
        })
        .collect();

    let mut category_options = vec![OptionView {
        value: String::new(),
        label: "All categories".to_string(),
        selected: listing.category.is_none(),
    }];
    category_options.extend(categories.iter().map(|c| OptionView {
        value: c.name.clone(),
        label: c.name.clone(),
        selected: listing.category.as_deref() == Some(c.name.as_str()),
    }));

    let size_options = PAGE_SIZES
        .iter()
        .map(|size| OptionView {
            value: size.to_string(),
            label: format!("{size} per page"),
            selected: *size == listing.size,
        })
        .collect();

    ItemsTemplate {
        nav,
        items: page
            .entries
            .iter()
            .map(|i| ItemCardView::new(i, wishlist.as_ref(), cart.as_ref()))
            .collect(),
        search: listing.search.clone(),
        sort_options,
        category_options,
        size_options,
        total_entries: page.total_entries,
        range_label,
        pages: page
            .window()
            .into_iter()
            .map(|number| PageLinkView {
                number,
                href: listing.page_href(number),
                current: number == page.number,
            })
            .collect(),
        previous_href: page
            .has_previous()
            .then(|| listing.page_href(page.number - 1)),
        next_href: page.has_next().then(|| listing.page_href(page.number + 1)),
        return_to: listing.page_href(page.number),
    }
}
