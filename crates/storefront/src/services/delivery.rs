//! Delivery dashboard actions: confirmation codes, confirming delivery and
//! the delivery person's availability.

use thiserror::Error;
use tower_sessions::Session;

use furnicraft_core::{Availability, Email, OrderStatus};

use crate::data::{DataError, MockBackend, Order};
use crate::models::session_keys;

/// Length of a delivery confirmation code.
pub const OTP_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("malformed confirmation code")]
    InvalidOtp,

    #[error("order {0} is already closed")]
    AlreadyClosed(String),

    /// Not one of this delivery person's orders.
    #[error("order {0} not assigned")]
    NotAssigned(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl DeliveryError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidOtp => "Please enter a valid 6-digit OTP".to_string(),
            Self::AlreadyClosed(_) => {
                "This order has already been delivered or cancelled.".to_string()
            }
            Self::NotAssigned(_) | Self::Data(DataError::NotFound(_)) => {
                "Order not found.".to_string()
            }
            Self::Data(_) => "Failed to confirm delivery. Please try again.".to_string(),
        }
    }
}

/// Any string of exactly six ASCII digits is a valid code.
#[must_use]
pub fn is_valid_otp(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Counts shown above the dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: usize,
    pub pending: usize,
    pub total: usize,
}

impl DeliveryStats {
    #[must_use]
    pub fn of(orders: &[Order]) -> Self {
        let delivered = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .count();
        let pending = orders.iter().filter(|o| !o.status.is_closed()).count();
        Self {
            delivered,
            pending,
            total: orders.len(),
        }
    }
}

pub struct DeliveryService<'a> {
    backend: &'a MockBackend,
}

impl<'a> DeliveryService<'a> {
    #[must_use]
    pub const fn new(backend: &'a MockBackend) -> Self {
        Self { backend }
    }

    async fn assigned(&self, courier: &Email, id: &str) -> Result<Order, DeliveryError> {
        let order = self
            .backend
            .orders_assigned_to(courier)
            .await
            .into_iter()
            .find(|o| o.id == id)
            .ok_or_else(|| DeliveryError::NotAssigned(id.to_string()))?;
        if order.status.is_closed() {
            return Err(DeliveryError::AlreadyClosed(order.id));
        }
        Ok(order)
    }

    /// Ask for a confirmation code to be sent to the customer. Nothing is
    /// actually sent; the request is only logged.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::NotAssigned` for someone else's order and
    /// `DeliveryError::AlreadyClosed` for a delivered or cancelled one.
    pub async fn request_otp(&self, courier: &Email, id: &str) -> Result<Order, DeliveryError> {
        let order = self.assigned(courier, id).await?;
        tracing::info!(order_id = %order.id, customer = %order.customer, "Delivery code requested");
        Ok(order)
    }

    /// Mark an order delivered after checking the code's shape.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::InvalidOtp` unless the code is six digits,
    /// plus the errors of [`Self::request_otp`].
    pub async fn confirm(
        &self,
        courier: &Email,
        id: &str,
        code: &str,
    ) -> Result<Order, DeliveryError> {
        if !is_valid_otp(code.trim()) {
            return Err(DeliveryError::InvalidOtp);
        }
        self.assigned(courier, id).await?;
        let order = self
            .backend
            .set_order_status(id, OrderStatus::Delivered)
            .await?;
        tracing::info!(order_id = %order.id, "Delivery confirmed");
        Ok(order)
    }
}

/// The delivery person's availability, ACTIVE until toggled.
pub async fn availability(session: &Session) -> Availability {
    session
        .get::<Availability>(session_keys::DELIVERY_STATUS)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to read delivery status from session: {}", e);
            None
        })
        .unwrap_or_default()
}

/// Flip the availability and return the new value.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn toggle_availability(
    session: &Session,
) -> Result<Availability, tower_sessions::session::Error> {
    let next = availability(session).await.toggled();
    session.insert(session_keys::DELIVERY_STATUS, next).await?;
    Ok(next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::data::Latency;

    use super::*;

    fn raj() -> Email {
        Email::parse("raj@example.com").unwrap()
    }

    #[test]
    fn test_otp_must_be_six_digits() {
        assert!(is_valid_otp("123456"));
        assert!(is_valid_otp("000000"));
        for bad in ["", "12345", "1234567", "12a456", "12 456", "١٢٣٤٥٦"] {
            assert!(!is_valid_otp(bad), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn test_confirm_marks_delivered() {
        let backend = MockBackend::new(Latency::NONE);
        let delivery = DeliveryService::new(&backend);

        let err = delivery.confirm(&raj(), "ORD-001", "12345").await.unwrap_err();
        assert_eq!(err.user_message(), "Please enter a valid 6-digit OTP");

        let order = delivery.confirm(&raj(), "ORD-001", "654321").await.unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);

        let err = delivery.confirm(&raj(), "ORD-001", "654321").await.unwrap_err();
        assert!(matches!(err, DeliveryError::AlreadyClosed(_)));
    }

    #[tokio::test]
    async fn test_otp_request_rejects_closed_and_foreign_orders() {
        let backend = MockBackend::new(Latency::NONE);
        let delivery = DeliveryService::new(&backend);

        let err = delivery.request_otp(&raj(), "ORD-003").await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "This order has already been delivered or cancelled."
        );

        let priya = Email::parse("priya@example.com").unwrap();
        let err = delivery.request_otp(&priya, "ORD-001").await.unwrap_err();
        assert!(matches!(err, DeliveryError::NotAssigned(_)));

        assert!(delivery.request_otp(&raj(), "ORD-001").await.is_ok());
    }

    #[tokio::test]
    async fn test_stats() {
        let backend = MockBackend::new(Latency::NONE);
        let orders = backend.orders_assigned_to(&raj()).await;
        let stats = DeliveryStats::of(&orders);
        assert_eq!(
            stats,
            DeliveryStats {
                delivered: 1,
                pending: 1,
                total: 2
            }
        );
    }

    #[tokio::test]
    async fn test_unreadable_session_reads_as_active() {
        let session = crate::services::test_support::broken_session();
        assert_eq!(availability(&session).await, Availability::Active);
        assert!(toggle_availability(&session).await.is_err());
    }
}
