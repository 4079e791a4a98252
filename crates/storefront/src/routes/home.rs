//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{BrowseState, Layout, SortOrder, View};
use crate::data::Category;
use crate::middleware::Nav;
use crate::state::AppState;

use super::ItemCardView;

/// Number of featured items on the home page.
const FEATURED_ITEMS: usize = 6;

/// Subcategories previewed under the selected category.
const PREVIEW_SUBCATEGORIES: usize = 3;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub category: Option<String>,
}

/// Category tile in the strip.
#[derive(Clone)]
pub struct CategoryTileView {
    pub name: String,
    pub image: String,
    /// Selects this category's preview on the home page.
    pub preview_href: String,
    pub active: bool,
}

/// Subcategory preview under the selected category.
#[derive(Clone)]
pub struct SubcategoryPreviewView {
    pub name: String,
    pub image: String,
    pub href: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub categories: Vec<CategoryTileView>,
    /// Name of the previewed category, if one is selected.
    pub active_category: Option<String>,
    /// Catalog browser link for the previewed category.
    pub active_href: String,
    pub previews: Vec<SubcategoryPreviewView>,
    pub featured: Vec<ItemCardView>,
}

fn root_state() -> BrowseState {
    BrowseState {
        view: View::Categories,
        search: String::new(),
        sort: SortOrder::Asc,
        layout: Layout::Grid,
    }
}

fn tile(category: &Category, active: Option<&str>) -> CategoryTileView {
    CategoryTileView {
        name: category.name.clone(),
        image: category.image.clone(),
        preview_href: format!("/?category={}", urlencoding::encode(&category.name)),
        active: active == Some(category.name.as_str()),
    }
}

/// Display the home page.
#[instrument(skip(state, nav))]
pub async fn home(
    State(state): State<AppState>,
    nav: Nav,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let backend = state.backend();
    let categories = backend.categories().await;

    // Only a category that exists can be previewed
    let active = query
        .category
        .filter(|name| categories.iter().any(|c| &c.name == name));

    let root = root_state();
    let (previews, active_href) = match &active {
        Some(name) => {
            let previews = backend
                .subcategories_of(name)
                .await
                .iter()
                .take(PREVIEW_SUBCATEGORIES)
                .map(|s| SubcategoryPreviewView {
                    name: s.name.clone(),
                    image: s.image.clone(),
                    href: root.subcategory_href(s),
                })
                .collect();
            (previews, root.category_href(name))
        }
        None => (Vec::new(), root.href()),
    };

    let featured = backend
        .items()
        .await
        .iter()
        .take(FEATURED_ITEMS)
        .map(ItemCardView::from)
        .collect();

    HomeTemplate {
        nav,
        categories: categories
            .iter()
            .map(|c| tile(c, active.as_deref()))
            .collect(),
        active_category: active,
        active_href,
        previews,
        featured,
    }
}
