//! Role and status enums.

use serde::{Deserialize, Serialize};

/// Error returned when a role or status string is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Canonical form used when matching free-text spellings:
/// uppercase with spaces and dashes folded into underscores.
fn canonical(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// A user's role, stored in the session next to the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// A shopper: cart, wishlist, own orders.
    #[default]
    User,
    /// Store staff: all orders and catalog management.
    Admin,
    /// Delivery staff: the delivery dashboard.
    DeliveryMan,
}

impl Role {
    /// The session string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::DeliveryMan => "DELIVERY_MAN",
        }
    }

    /// Human-readable label for the navigation bar.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::User => "Customer",
            Self::Admin => "Admin",
            Self::DeliveryMan => "Delivery",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            "DELIVERY_MAN" => Ok(Self::DeliveryMan),
            _ => Err(UnknownVariant::new("role", s)),
        }
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed from the cart, not yet paid.
    #[default]
    Created,
    Paid,
    Processing,
    ReadyForDelivery,
    Shipped,
    /// Handed to a delivery person.
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Created,
        Self::Paid,
        Self::Processing,
        Self::ReadyForDelivery,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The wire/form value, e.g. `READY_FOR_DELIVERY`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Paid => "PAID",
            Self::Processing => "PROCESSING",
            Self::ReadyForDelivery => "READY_FOR_DELIVERY",
            Self::Shipped => "SHIPPED",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label, e.g. `Ready for Delivery`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Paid => "Paid",
            Self::Processing => "Processing",
            Self::ReadyForDelivery => "Ready for Delivery",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Badge colour classes for templates.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Created | Self::ReadyForDelivery => "bg-blue-100 text-blue-800",
            Self::Paid => "bg-green-100 text-green-800",
            Self::Processing => "bg-yellow-100 text-yellow-800",
            Self::Shipped | Self::OutForDelivery => "bg-purple-100 text-purple-800",
            Self::Delivered => "bg-emerald-100 text-emerald-800",
            Self::Cancelled => "bg-red-100 text-red-800",
        }
    }

    /// Whether a customer may still cancel the order.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        matches!(
            self,
            Self::ReadyForDelivery | Self::Processing | Self::Shipped
        )
    }

    /// Delivered or cancelled: nothing left for a delivery person to do.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = UnknownVariant;

    /// Accepts both the wire form and free-text labels, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical(s);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| UnknownVariant::new("order status", s))
    }
}

/// Whether a delivery person is currently taking orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    #[default]
    Active,
    Inactive,
}

impl Availability {
    /// The other state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrips_session_string() {
        for role in [Role::User, Role::Admin, Role::DeliveryMan] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("SUPERUSER".parse::<Role>().is_err());
    }

    #[test]
    fn test_order_status_accepts_free_text() {
        assert_eq!(
            "Ready for Delivery".parse::<OrderStatus>().unwrap(),
            OrderStatus::ReadyForDelivery
        );
        assert_eq!(
            "out-for-delivery".parse::<OrderStatus>().unwrap(),
            OrderStatus::OutForDelivery
        );
        assert_eq!("PAID".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert!("lost in transit".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_cancellable_statuses() {
        let cancellable: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(OrderStatus::is_cancellable)
            .collect();
        assert_eq!(
            cancellable,
            vec![
                OrderStatus::Processing,
                OrderStatus::ReadyForDelivery,
                OrderStatus::Shipped
            ]
        );
    }

    #[test]
    fn test_closed_statuses() {
        assert!(OrderStatus::Delivered.is_closed());
        assert!(OrderStatus::Cancelled.is_closed());
        assert!(!OrderStatus::OutForDelivery.is_closed());
    }

    #[test]
    fn test_availability_toggle_is_involution() {
        assert_eq!(Availability::Active.toggled(), Availability::Inactive);
        assert_eq!(Availability::Active.toggled().toggled(), Availability::Active);
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Role::DeliveryMan).unwrap();
        assert_eq!(json, "\"DELIVERY_MAN\"");
        let json = serde_json::to_string(&OrderStatus::ReadyForDelivery).unwrap();
        assert_eq!(json, "\"READY_FOR_DELIVERY\"");
    }
}
