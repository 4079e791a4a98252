//! Profile and address book route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use furnicraft_core::AddressId;

use crate::data::{Address, AddressFields};
use crate::middleware::{Nav, RequireAuth};
use crate::services::validation::{ValidationError, require_all};
use crate::state::AppState;

use super::{MessageQuery, redirect_error, redirect_success};

const PROFILE_PATH: &str = "/profile";

/// Used when the form leaves the country blank.
const DEFAULT_COUNTRY: &str = "India";

/// Address display data for templates.
#[derive(Clone)]
pub struct AddressView {
    pub id: u32,
    pub full_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id.get(),
            full_name: address.full_name.clone(),
            phone: address.phone.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/show.html")]
pub struct ProfileTemplate {
    pub nav: Nav,
    pub email: String,
    pub role: String,
    pub addresses: Vec<AddressView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Address form data, used for both add and update.
#[derive(Debug, Deserialize)]
pub struct AddressForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl AddressForm {
    /// Check the required fields and trim everything.
    fn validate(self) -> Result<AddressFields, ValidationError> {
        require_all(
            &[
                &self.full_name,
                &self.phone,
                &self.street,
                &self.city,
                &self.state,
                &self.postal_code,
            ],
            "Please fill all required fields",
        )?;
        let country = self.country.trim();
        Ok(AddressFields {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: if country.is_empty() {
                DEFAULT_COUNTRY.to_string()
            } else {
                country.to_string()
            },
        })
    }
}

/// Display the profile with the address book.
#[instrument(skip(state, nav))]
pub async fn show(
    State(state): State<AppState>,
    nav: Nav,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let addresses = state.backend().addresses().await;
    ProfileTemplate {
        nav,
        email: user.email.to_string(),
        role: user.role.label().to_string(),
        addresses: addresses.iter().map(AddressView::from).collect(),
        error: query.error,
        success: query.success,
    }
}

/// Add an address.
#[instrument(skip(state, _user, form))]
pub async fn create_address(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<AddressForm>,
) -> Response {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return redirect_error(PROFILE_PATH, e.0).into_response(),
    };
    let address = state.backend().add_address(fields).await;
    tracing::info!(address_id = %address.id, "Address added");
    redirect_success(PROFILE_PATH, "Address added").into_response()
}

/// Replace an address.
#[instrument(skip(state, _user, form))]
pub async fn update_address(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<AddressId>,
    Form(form): Form<AddressForm>,
) -> Response {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return redirect_error(PROFILE_PATH, e.0).into_response(),
    };
    match state.backend().update_address(id, fields).await {
        Ok(_) => redirect_success(PROFILE_PATH, "Address updated").into_response(),
        Err(e) => {
            tracing::warn!("Address update failed: {}", e);
            redirect_error(PROFILE_PATH, "Failed to update address. Please try again.")
                .into_response()
        }
    }
}

/// Delete an address.
#[instrument(skip(state, _user))]
pub async fn delete_address(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<AddressId>,
) -> Response {
    match state.backend().delete_address(id).await {
        Ok(()) => redirect_success(PROFILE_PATH, "Address deleted").into_response(),
        Err(e) => {
            tracing::warn!("Address delete failed: {}", e);
            redirect_error(PROFILE_PATH, "Failed to delete address. Please try again.")
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddressForm {
        AddressForm {
            full_name: " Rajesh Kumar ".to_string(),
            phone: "+91 9876543210".to_string(),
            street: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            postal_code: "560001".to_string(),
            country: String::new(),
        }
    }

    #[test]
    fn test_validate_trims_and_defaults_country() {
        let fields = form().validate().unwrap_or_default();
        assert_eq!(fields.full_name, "Rajesh Kumar");
        assert_eq!(fields.country, "India");
    }

    #[test]
    fn test_validate_requires_fields() {
        let mut missing = form();
        missing.city = "  ".to_string();
        assert_eq!(
            missing.validate(),
            Err(ValidationError("Please fill all required fields"))
        );
    }
}
