//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::data::{Address, Order, OrderLine};
use crate::middleware::{Nav, RequireAuth};
use crate::services::orders::OrderService;
use crate::state::AppState;

use super::{MessageQuery, redirect_error, redirect_success};

// =============================================================================
// Views
// =============================================================================

#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&OrderLine> for OrderLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: line.price.display(),
            line_total: line.line_total().display(),
        }
    }
}

/// Order display data, shared by the customer, admin and delivery pages.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub date: String,
    pub status: String,
    pub status_value: String,
    pub status_class: String,
    pub customer: String,
    pub lines: Vec<OrderLineView>,
    pub unit_count: u32,
    pub total: String,
    pub ship_to: Option<String>,
    pub phone: Option<String>,
    pub cancellable: bool,
    pub closed: bool,
}

fn ship_to(address: &Address) -> String {
    format!(
        "{}, {}, {}, {} {}, {}",
        address.full_name,
        address.street,
        address.city,
        address.state,
        address.postal_code,
        address.country
    )
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            date: order.date.format("%d %b %Y").to_string(),
            status: order.status.label().to_string(),
            status_value: order.status.as_str().to_string(),
            status_class: order.status.badge_class().to_string(),
            customer: order.customer.to_string(),
            lines: order.lines.iter().map(OrderLineView::from).collect(),
            unit_count: order.unit_count(),
            total: order.total().display(),
            ship_to: order.address.as_ref().map(ship_to),
            phone: order.address.as_ref().map(|a| a.phone.clone()),
            cancellable: order.status.is_cancellable(),
            closed: order.status.is_closed(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub nav: Nav,
    pub orders: Vec<OrderView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the logged-in customer's orders, newest first.
#[instrument(skip(state, nav))]
pub async fn index(
    State(state): State<AppState>,
    nav: Nav,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let orders = state.backend().orders_for(&user.email).await;
    OrdersTemplate {
        nav,
        orders: orders.iter().map(OrderView::from).collect(),
        error: query.error,
        success: query.success,
    }
}

/// Cancel one of the customer's orders.
#[instrument(skip(state, user))]
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    match OrderService::new(state.backend())
        .cancel(&user.email, &id)
        .await
    {
        Ok(order) => {
            redirect_success("/orders", &format!("Order {} cancelled", order.id)).into_response()
        }
        Err(e) => {
            tracing::warn!("Cancel rejected: {}", e);
            redirect_error("/orders", &e.user_message()).into_response()
        }
    }
}
