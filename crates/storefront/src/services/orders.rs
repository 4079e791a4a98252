//! Checkout and customer order actions.

use thiserror::Error;

use furnicraft_core::{AddressId, Email, OrderStatus};

use crate::data::{DataError, MockBackend, Order};
use crate::services::cart::Cart;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("no delivery address selected")]
    MissingAddress,

    #[error("order {0} cannot be cancelled while {1}")]
    NotCancellable(String, OrderStatus),

    /// The order belongs to another customer. Reported like a missing order.
    #[error("order {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl OrderError {
    /// Banner text for the cart and order pages.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Your cart is empty. Add items before checking out.".to_string(),
            Self::MissingAddress => "Please select a delivery address.".to_string(),
            Self::NotCancellable(_, status) => {
                format!("Orders that are {} cannot be cancelled.", status.label())
            }
            Self::NotFound(_) | Self::Data(DataError::NotFound(_)) => {
                "Order not found.".to_string()
            }
            Self::Data(_) => "Failed to update order. Please try again.".to_string(),
        }
    }
}

pub struct OrderService<'a> {
    backend: &'a MockBackend,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(backend: &'a MockBackend) -> Self {
        Self { backend }
    }

    /// Place an order for the cart's lines, delivered to the chosen address.
    ///
    /// The caller clears the cart after a successful checkout.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` for an empty cart and
    /// `OrderError::MissingAddress` when the address is blank, malformed
    /// or not in the address book.
    pub async fn checkout(
        &self,
        customer: Email,
        cart: &Cart,
        address_id: Option<&str>,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let id: AddressId = address_id
            .and_then(|raw| raw.parse().ok())
            .ok_or(OrderError::MissingAddress)?;
        let address = self
            .backend
            .address(id)
            .await
            .ok_or(OrderError::MissingAddress)?;

        let order = self
            .backend
            .place_order(customer, cart.lines(), Some(address))
            .await;
        tracing::info!(order_id = %order.id, total = %order.total(), "Order placed");
        Ok(order)
    }

    /// Cancel one of `customer`'s orders.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if the order does not exist or
    /// belongs to someone else, and `OrderError::NotCancellable` if its
    /// status does not allow cancelling.
    pub async fn cancel(&self, customer: &Email, id: &str) -> Result<Order, OrderError> {
        let order = self
            .backend
            .order(id)
            .await
            .filter(|o| &o.customer == customer)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        if !order.status.is_cancellable() {
            return Err(OrderError::NotCancellable(order.id, order.status));
        }
        let order = self
            .backend
            .set_order_status(id, OrderStatus::Cancelled)
            .await?;
        tracing::info!(order_id = %order.id, "Order cancelled");
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furnicraft_core::ItemId;

    use crate::data::Latency;

    use super::*;

    fn rajesh() -> Email {
        Email::parse("rajesh@example.com").unwrap()
    }

    async fn cart_with_item(backend: &MockBackend) -> Cart {
        let mut cart = Cart::default();
        let item = backend.item(ItemId::new(1)).await.unwrap();
        cart.add(&item, 2);
        cart
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() {
        let backend = MockBackend::new(Latency::NONE);
        let err = OrderService::new(&backend)
            .checkout(rajesh(), &Cart::default(), Some("1"))
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Your cart is empty. Add items before checking out."
        );
    }

    #[tokio::test]
    async fn test_checkout_requires_known_address() {
        let backend = MockBackend::new(Latency::NONE);
        let cart = cart_with_item(&backend).await;
        let orders = OrderService::new(&backend);

        for address in [None, Some(""), Some("abc"), Some("99")] {
            let err = orders.checkout(rajesh(), &cart, address).await.unwrap_err();
            assert!(matches!(err, OrderError::MissingAddress), "{address:?}");
        }
    }

    #[tokio::test]
    async fn test_checkout_creates_order() {
        let backend = MockBackend::new(Latency::NONE);
        let cart = cart_with_item(&backend).await;
        let order = OrderService::new(&backend)
            .checkout(rajesh(), &cart, Some("2"))
            .await
            .unwrap();

        assert!(order.id.starts_with("ORD-"));
        assert_eq!(order.id.len(), 10);
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.total(), cart.summary().total);
        assert!(backend.order(&order.id).await.is_some());
    }

    #[tokio::test]
    async fn test_cancel_follows_status_rule() {
        let backend = MockBackend::new(Latency::NONE);
        let orders = OrderService::new(&backend);

        // ORD-001 is ready for delivery, ORD-003 is delivered.
        let cancelled = orders.cancel(&rajesh(), "ORD-001").await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let err = orders.cancel(&rajesh(), "ORD-003").await.unwrap_err();
        assert!(matches!(err, OrderError::NotCancellable(_, OrderStatus::Delivered)));
    }

    #[tokio::test]
    async fn test_cancel_hides_other_customers_orders() {
        let backend = MockBackend::new(Latency::NONE);
        let stranger = Email::parse("someone@example.com").unwrap();
        let err = OrderService::new(&backend)
            .cancel(&stranger, "ORD-001")
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }
}
