//! Admin order management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use furnicraft_core::{DeliveryPersonId, Email, OrderStatus};

use crate::catalog::Needle;
use crate::data::{DataError, DeliveryPerson, Order};
use crate::middleware::{Nav, RequireAdmin};
use crate::routes::orders::OrderView;
use crate::routes::{redirect_error, redirect_success};
use crate::services::validation::require_all;
use crate::state::AppState;

const ADMIN_ORDERS_PATH: &str = "/admin/orders";

// =============================================================================
// Filtering
// =============================================================================

/// Status filter of the order table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// Parse the `status` query value. Missing or unknown values show PAID
    /// orders.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("all") => Self::All,
            Some(v) => v
                .parse()
                .map_or(Self::Only(OrderStatus::Paid), Self::Only),
            None => Self::Only(OrderStatus::Paid),
        }
    }

    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Only(status) => status.as_str(),
        }
    }

    fn matches(self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => order.status == status,
        }
    }
}

/// Orders matching the status filter whose ID or customer email contains
/// the search text.
#[must_use]
pub fn filter_orders(orders: &[Order], status: StatusFilter, search: &str) -> Vec<Order> {
    let needle = Needle::new(search);
    orders
        .iter()
        .filter(|o| status.matches(o))
        .filter(|o| needle.found_in(&[o.id.as_str(), o.customer.as_str()]))
        .cloned()
        .collect()
}

/// Counts over every order, regardless of the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub paid: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl OrderStats {
    #[must_use]
    pub fn of(orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            total: orders.len(),
            paid: count(OrderStatus::Paid),
            shipped: count(OrderStatus::Shipped),
            delivered: count(OrderStatus::Delivered),
            cancelled: count(OrderStatus::Cancelled),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Clone)]
pub struct StatusTabView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Clone)]
pub struct StatusOptionView {
    pub value: String,
    pub label: String,
}

#[derive(Clone)]
pub struct DeliveryPersonView {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<&DeliveryPerson> for DeliveryPersonView {
    fn from(person: &DeliveryPerson) -> Self {
        Self {
            id: person.id.get(),
            name: person.name.clone(),
            phone: person.phone.clone(),
            email: person.email.to_string(),
        }
    }
}

/// Order row with the admin's per-order choices.
#[derive(Clone)]
pub struct AdminOrderView {
    pub order: OrderView,
    /// Every status except the current one.
    pub next_statuses: Vec<StatusOptionView>,
    pub assigned_to: Option<String>,
}

/// Admin orders template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct AdminOrdersTemplate {
    pub nav: Nav,
    pub stats: OrderStats,
    pub tabs: Vec<StatusTabView>,
    pub status: String,
    pub search: String,
    pub orders: Vec<AdminOrderView>,
    pub delivery_people: Vec<DeliveryPersonView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

fn tab_href(filter: StatusFilter) -> String {
    format!("{ADMIN_ORDERS_PATH}?status={}", filter.as_param())
}

/// The order table as the admin left it: same status tab and search.
fn return_href(filter: Option<&str>, search: Option<&str>) -> String {
    let href = tab_href(StatusFilter::parse(filter));
    match search.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => format!("{href}&q={}", urlencoding::encode(q)),
        None => href,
    }
}

fn admin_row(order: &Order, people: &[DeliveryPerson]) -> AdminOrderView {
    AdminOrderView {
        order: OrderView::from(order),
        next_statuses: OrderStatus::ALL
            .iter()
            .filter(|s| **s != order.status)
            .map(|s| StatusOptionView {
                value: s.as_str().to_string(),
                label: s.label().to_string(),
            })
            .collect(),
        assigned_to: order
            .delivery_person
            .and_then(|id| people.iter().find(|p| p.id == id))
            .map(|p| p.name.clone()),
    }
}

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AdminOrdersQuery {
    pub status: Option<String>,
    pub q: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Status change. `filter` and `q` carry the table state back.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
    pub filter: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignForm {
    #[serde(default)]
    pub delivery_person_id: String,
    pub filter: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryPersonForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Required by the form, not stored.
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display all orders with filters and statistics.
#[instrument(skip(state, nav, _admin))]
pub async fn index(
    State(state): State<AppState>,
    nav: Nav,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AdminOrdersQuery>,
) -> impl IntoResponse {
    let backend = state.backend();
    let all = backend.orders().await;
    let people = backend.delivery_people().await;

    let filter = StatusFilter::parse(query.status.as_deref());
    let search = query.q.unwrap_or_default();
    let shown = filter_orders(&all, filter, &search);

    let mut tabs = vec![StatusTabView {
        label: "All".to_string(),
        href: tab_href(StatusFilter::All),
        active: filter == StatusFilter::All,
    }];
    tabs.extend(OrderStatus::ALL.iter().map(|s| StatusTabView {
        label: s.label().to_string(),
        href: tab_href(StatusFilter::Only(*s)),
        active: filter == StatusFilter::Only(*s),
    }));

    AdminOrdersTemplate {
        nav,
        stats: OrderStats::of(&all),
        tabs,
        status: filter.as_param().to_string(),
        search,
        orders: shown.iter().map(|o| admin_row(o, &people)).collect(),
        delivery_people: people.iter().map(DeliveryPersonView::from).collect(),
        error: query.error,
        success: query.success,
    }
}

/// Change an order's status.
#[instrument(skip(state, _admin))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let back = return_href(form.filter.as_deref(), form.q.as_deref());
    let Ok(status) = form.status.parse::<OrderStatus>() else {
        return redirect_error(&back, "Please choose a valid status.").into_response();
    };
    match state.backend().set_order_status(&id, status).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id, status = %status.as_str(), "Order status updated");
            redirect_success(
                &back,
                &format!("Order #{} status updated to {}", order.id, status.as_str()),
            )
            .into_response()
        }
        Err(e) => {
            tracing::warn!("Status update failed: {}", e);
            redirect_error(&back, "Failed to update order status. Please try again.")
                .into_response()
        }
    }
}

/// Assign an order to a delivery person.
#[instrument(skip(state, _admin))]
pub async fn assign(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<AssignForm>,
) -> Response {
    let back = return_href(form.filter.as_deref(), form.q.as_deref());
    let Ok(person) = form.delivery_person_id.parse::<DeliveryPersonId>() else {
        return redirect_error(&back, "Please choose a delivery person.").into_response();
    };
    match state.backend().assign_order(&id, person).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id, delivery_person = %person, "Order assigned");
            redirect_success(
                &back,
                &format!("Order #{} assigned to delivery personnel", order.id),
            )
            .into_response()
        }
        Err(e) => {
            tracing::warn!("Assignment failed: {}", e);
            redirect_error(&back, "Failed to assign order. Please try again.").into_response()
        }
    }
}

/// Register a delivery person with a DELIVERY_MAN login.
#[instrument(skip(state, _admin, form), fields(email = %form.email))]
pub async fn register_delivery_person(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<DeliveryPersonForm>,
) -> Response {
    if let Err(e) = require_all(
        &[&form.name, &form.phone, &form.email, &form.password],
        "Please fill all required fields",
    ) {
        return redirect_error(ADMIN_ORDERS_PATH, e.0).into_response();
    }
    let Ok(email) = Email::parse(&form.email) else {
        return redirect_error(
            ADMIN_ORDERS_PATH,
            "Invalid data. Please check the form fields.",
        )
        .into_response();
    };

    match state
        .backend()
        .register_delivery_person(
            form.name.trim().to_string(),
            form.phone.trim().to_string(),
            email,
        )
        .await
    {
        Ok(person) => {
            tracing::info!(delivery_person = %person.id, "Delivery person registered");
            redirect_success(
                ADMIN_ORDERS_PATH,
                "Delivery personnel registered successfully!",
            )
            .into_response()
        }
        Err(DataError::Duplicate(_)) => redirect_error(
            ADMIN_ORDERS_PATH,
            "Delivery personnel with this email or phone already exists.",
        )
        .into_response(),
        Err(e) => {
            tracing::error!("Delivery person registration failed: {}", e);
            redirect_error(
                ADMIN_ORDERS_PATH,
                "Failed to register delivery personnel. Please try again.",
            )
            .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::data::{Latency, MockBackend};

    use super::*;

    #[test]
    fn test_status_filter_defaults_to_paid() {
        assert_eq!(
            StatusFilter::parse(None),
            StatusFilter::Only(OrderStatus::Paid)
        );
        assert_eq!(
            StatusFilter::parse(Some("bogus")),
            StatusFilter::Only(OrderStatus::Paid)
        );
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("Ready for Delivery")),
            StatusFilter::Only(OrderStatus::ReadyForDelivery)
        );
    }

    #[test]
    fn test_return_href_keeps_tab_and_search() {
        assert_eq!(return_href(None, None), "/admin/orders?status=PAID");
        assert_eq!(
            return_href(Some("SHIPPED"), Some("  ")),
            "/admin/orders?status=SHIPPED"
        );
        assert_eq!(
            return_href(Some("ALL"), Some("rajesh@example.com")),
            "/admin/orders?status=ALL&q=rajesh%40example.com"
        );
    }

    #[tokio::test]
    async fn test_filter_and_search() {
        let orders = MockBackend::new(Latency::NONE).orders().await;

        let paid = filter_orders(&orders, StatusFilter::parse(None), "");
        assert!(paid.iter().all(|o| o.status == OrderStatus::Paid));

        let found = filter_orders(&orders, StatusFilter::All, "ord-003");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ORD-003");

        let by_email = filter_orders(&orders, StatusFilter::All, "RAJESH@");
        assert_eq!(by_email.len(), orders.len());

        assert!(filter_orders(&orders, StatusFilter::All, "nobody").is_empty());
    }

    #[tokio::test]
    async fn test_stats_count_every_order() {
        let orders = MockBackend::new(Latency::NONE).orders().await;
        let stats = OrderStats::of(&orders);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.paid, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.cancelled, 0);
    }
}
