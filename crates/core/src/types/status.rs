//! Order status enum.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Matches the values stored in the `orders.status` column. Only `pending`
/// and `completed` may be set through the admin status-update endpoint;
/// `cancelled` and `reviewed` are written by their dedicated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    Reviewed,
}

impl OrderStatus {
    /// Whether the status-update endpoint accepts this value.
    #[must_use]
    pub const fn admin_settable(self) -> bool {
        matches!(self, Self::Pending | Self::Completed)
    }

    /// The string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Reviewed => "reviewed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "reviewed" => Ok(Self::Reviewed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_admin_settable() {
        assert!(OrderStatus::Pending.admin_settable());
        assert!(OrderStatus::Completed.admin_settable());
        assert!(!OrderStatus::Cancelled.admin_settable());
        assert!(!OrderStatus::Reviewed.admin_settable());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
            OrderStatus::Reviewed,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(OrderStatus::from_str("shipped").is_err());
        assert!(OrderStatus::from_str("PENDING").is_err());
        assert!(OrderStatus::from_str("").is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"completed\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }
}
