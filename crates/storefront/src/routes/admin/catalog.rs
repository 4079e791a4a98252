//! Admin catalog forms: categories, subcategories and items.
//!
//! Images are given as URLs; a blank image field keeps the current image on
//! update and uses the placeholder on add.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use furnicraft_core::{CategoryId, Price, SubcategoryId};

use crate::data::{DataError, NewItem, PLACEHOLDER_IMAGE};
use crate::middleware::{Nav, RequireAdmin};
use crate::routes::{MessageQuery, redirect_error, redirect_success};
use crate::services::validation::{ValidationError, non_blank, require_all};
use crate::state::AppState;

const CATALOG_PATH: &str = "/admin/catalog";

// =============================================================================
// Views
// =============================================================================

#[derive(Clone)]
pub struct CategoryRowView {
    pub id: u32,
    pub name: String,
    pub image: String,
}

#[derive(Clone)]
pub struct SubcategoryRowView {
    pub id: u32,
    pub name: String,
    pub parent: String,
    pub image: String,
}

/// Admin catalog template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/catalog.html")]
pub struct CatalogTemplate {
    pub nav: Nav,
    pub categories: Vec<CategoryRowView>,
    pub subcategories: Vec<SubcategoryRowView>,
    pub item_count: usize,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct SubcategoryForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub photo: String,
}

/// Parse a required numeric ID, failing with `message`.
fn parse_id<T: std::str::FromStr>(raw: &str, message: &'static str) -> Result<T, ValidationError> {
    raw.trim().parse().map_err(|_| ValidationError(message))
}

fn image_or_placeholder(raw: &str) -> String {
    non_blank(raw).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

/// Redirect for a data layer failure, logging it first.
fn data_failure(action: &str, e: &DataError, message: &str) -> Response {
    tracing::warn!("{action} failed: {e}");
    redirect_error(CATALOG_PATH, message).into_response()
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the catalog forms with the current categories and subcategories.
#[instrument(skip(state, nav, _admin))]
pub async fn show(
    State(state): State<AppState>,
    nav: Nav,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let backend = state.backend();
    let categories = backend.categories().await;
    let subcategories = backend.all_subcategories().await;
    let item_count = backend.items().await.len();

    CatalogTemplate {
        nav,
        categories: categories
            .iter()
            .map(|c| CategoryRowView {
                id: c.id.get(),
                name: c.name.clone(),
                image: c.image.clone(),
            })
            .collect(),
        subcategories: subcategories
            .iter()
            .map(|s| SubcategoryRowView {
                id: s.id.get(),
                name: s.name.clone(),
                parent: s.parent.clone(),
                image: s.image.clone(),
            })
            .collect(),
        item_count,
        error: query.error,
        success: query.success,
    }
}

// -----------------------------------------------------------------------------
// Categories
// -----------------------------------------------------------------------------

#[instrument(skip(state, _admin))]
pub async fn add_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<CategoryForm>,
) -> Response {
    let Some(name) = non_blank(&form.name) else {
        return redirect_error(CATALOG_PATH, "Category name is required.").into_response();
    };
    let category = state
        .backend()
        .add_category(name, image_or_placeholder(&form.image))
        .await;
    tracing::info!(category_id = %category.id, "Category added");
    redirect_success(CATALOG_PATH, "Category added successfully.").into_response()
}

#[instrument(skip(state, _admin))]
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<CategoryForm>,
) -> Response {
    const MISSING: &str = "Category ID and name are required.";
    let checked = require_all(&[&form.id, &form.name], MISSING)
        .and_then(|()| parse_id::<CategoryId>(&form.id, MISSING));
    let id = match checked {
        Ok(id) => id,
        Err(e) => return redirect_error(CATALOG_PATH, e.0).into_response(),
    };

    match state
        .backend()
        .update_category(id, form.name.trim().to_string(), non_blank(&form.image))
        .await
    {
        Ok(_) => redirect_success(CATALOG_PATH, "Category updated successfully.").into_response(),
        Err(e) => data_failure("Category update", &e, "Failed to update category"),
    }
}

#[instrument(skip(state, _admin))]
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<CategoryForm>,
) -> Response {
    let id = match parse_id::<CategoryId>(&form.id, "Category ID is required.") {
        Ok(id) => id,
        Err(e) => return redirect_error(CATALOG_PATH, e.0).into_response(),
    };
    match state.backend().delete_category(id).await {
        Ok(()) => redirect_success(CATALOG_PATH, "Category deleted successfully.").into_response(),
        Err(e) => data_failure("Category delete", &e, "Failed to delete category"),
    }
}

// -----------------------------------------------------------------------------
// Subcategories
// -----------------------------------------------------------------------------

#[instrument(skip(state, _admin))]
pub async fn add_subcategory(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<SubcategoryForm>,
) -> Response {
    if let Err(e) = require_all(&[&form.name, &form.category], "All fields are required.") {
        return redirect_error(CATALOG_PATH, e.0).into_response();
    }
    match state
        .backend()
        .add_subcategory(
            form.name.trim().to_string(),
            form.category.trim().to_string(),
            image_or_placeholder(&form.image),
        )
        .await
    {
        Ok(_) => {
            redirect_success(CATALOG_PATH, "Subcategory added successfully.").into_response()
        }
        Err(e) => data_failure("Subcategory add", &e, "Failed to add subcategory"),
    }
}

#[instrument(skip(state, _admin))]
pub async fn update_subcategory(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<SubcategoryForm>,
) -> Response {
    const MISSING: &str = "Subcategory ID and name are required.";
    let checked = require_all(&[&form.id, &form.name], MISSING)
        .and_then(|()| parse_id::<SubcategoryId>(&form.id, MISSING));
    let id = match checked {
        Ok(id) => id,
        Err(e) => return redirect_error(CATALOG_PATH, e.0).into_response(),
    };

    match state
        .backend()
        .update_subcategory(id, form.name.trim().to_string(), non_blank(&form.image))
        .await
    {
        Ok(_) => {
            redirect_success(CATALOG_PATH, "Subcategory updated successfully.").into_response()
        }
        Err(e) => data_failure("Subcategory update", &e, "Failed to update subcategory"),
    }
}

#[instrument(skip(state, _admin))]
pub async fn delete_subcategory(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<SubcategoryForm>,
) -> Response {
    let id = match parse_id::<SubcategoryId>(&form.id, "Subcategory ID is required.") {
        Ok(id) => id,
        Err(e) => return redirect_error(CATALOG_PATH, e.0).into_response(),
    };
    match state.backend().delete_subcategory(id).await {
        Ok(()) => {
            redirect_success(CATALOG_PATH, "Subcategory deleted successfully.").into_response()
        }
        Err(e) => data_failure("Subcategory delete", &e, "Failed to delete subcategory"),
    }
}

// -----------------------------------------------------------------------------
// Items
// -----------------------------------------------------------------------------

impl ItemForm {
    fn validate(&self) -> Result<NewItem, ValidationError> {
        const MISSING: &str = "Please fill in all required fields";
        require_all(
            &[&self.name, &self.price, &self.description, &self.subcategory],
            MISSING,
        )?;
        let price = Price::parse_positive(&self.price).map_err(|_| ValidationError(MISSING))?;
        Ok(NewItem {
            name: self.name.trim().to_string(),
            price,
            description: self.description.trim().to_string(),
            photo: non_blank(&self.photo),
            subcategory: self.subcategory.trim().to_string(),
        })
    }
}

#[instrument(skip(state, _admin))]
pub async fn add_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<ItemForm>,
) -> Response {
    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => return redirect_error(CATALOG_PATH, e.0).into_response(),
    };
    match state.backend().add_item(new).await {
        Ok(item) => {
            tracing::info!(item_id = %item.id, category = %item.category, "Item added");
            redirect_success(CATALOG_PATH, "Item added successfully!").into_response()
        }
        Err(e) => data_failure("Item add", &e, "Error adding item. Please try again."),
    }
}
