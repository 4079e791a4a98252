//! Delivery dashboard route handlers.
//!
//! A delivery person sees the orders assigned to them, split into pending and
//! completed tabs, and closes an order by entering the customer's code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{Nav, RequireDelivery};
use crate::services::delivery::{self, DeliveryService, DeliveryStats, OTP_LENGTH};
use crate::state::AppState;

use super::orders::OrderView;
use super::{redirect_error, redirect_success};

const DASHBOARD_PATH: &str = "/delivery";

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Pending,
    Completed,
}

impl Tab {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("completed") => Self::Completed,
            _ => Self::Pending,
        }
    }

    const fn shows_closed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "delivery/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Nav,
    pub stats: DeliveryStats,
    pub availability: String,
    pub is_active: bool,
    pub pending_tab: bool,
    pub orders: Vec<OrderView>,
    pub otp_length: usize,
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub otp: String,
}

/// Display the assigned orders for the selected tab.
#[instrument(skip(state, session, nav, courier))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    nav: Nav,
    RequireDelivery(courier): RequireDelivery,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let tab = Tab::parse(query.tab.as_deref());
    let assigned = state.backend().orders_assigned_to(&courier.email).await;
    let stats = DeliveryStats::of(&assigned);
    let availability = delivery::availability(&session).await;

    DashboardTemplate {
        nav,
        stats,
        availability: availability.as_str().to_string(),
        is_active: availability == furnicraft_core::Availability::Active,
        pending_tab: !tab.shows_closed(),
        orders: assigned
            .iter()
            .filter(|o| o.status.is_closed() == tab.shows_closed())
            .map(OrderView::from)
            .collect(),
        otp_length: OTP_LENGTH,
        error: query.error,
        success: query.success,
    }
}

/// Ask for the customer's confirmation code.
#[instrument(skip(state, courier))]
pub async fn request_otp(
    State(state): State<AppState>,
    RequireDelivery(courier): RequireDelivery,
    Path(id): Path<String>,
) -> Response {
    match DeliveryService::new(state.backend())
        .request_otp(&courier.email, &id)
        .await
    {
        Ok(_) => redirect_success(
            DASHBOARD_PATH,
            "OTP has been sent to the customer. Please ask the customer for the OTP.",
        )
        .into_response(),
        Err(e) => {
            tracing::warn!("OTP request rejected: {}", e);
            redirect_error(DASHBOARD_PATH, &e.user_message()).into_response()
        }
    }
}

/// Close an order with the code the customer read out.
#[instrument(skip(state, courier, form))]
pub async fn confirm(
    State(state): State<AppState>,
    RequireDelivery(courier): RequireDelivery,
    Path(id): Path<String>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    match DeliveryService::new(state.backend())
        .confirm(&courier.email, &id, &form.otp)
        .await
    {
        Ok(_) => redirect_success(DASHBOARD_PATH, "Delivery confirmed successfully!").into_response(),
        Err(e) => {
            tracing::warn!("Delivery confirmation rejected: {}", e);
            redirect_error(DASHBOARD_PATH, &e.user_message()).into_response()
        }
    }
}

/// Flip between ACTIVE and INACTIVE.
#[instrument(skip(session, _courier))]
pub async fn toggle_status(
    session: Session,
    RequireDelivery(_courier): RequireDelivery,
) -> Result<Response> {
    let next = delivery::toggle_availability(&session).await?;
    Ok(redirect_success(
        DASHBOARD_PATH,
        &format!("Delivery status changed to {}", next.as_str()),
    )
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_parse() {
        assert_eq!(Tab::parse(None), Tab::Pending);
        assert_eq!(Tab::parse(Some("completed")), Tab::Completed);
        assert_eq!(Tab::parse(Some("bogus")), Tab::Pending);
    }
}
