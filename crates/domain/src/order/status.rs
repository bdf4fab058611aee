//! Order status values.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The status string attached to an order.
///
/// Stores feed free-form status strings, so anything outside the known set
/// is kept verbatim as [`OrderStatus::Other`] rather than rejected.
///
/// Typical lifecycle:
/// ```text
/// pending ──► in_progress / processing ──► completed / shipped ──► delivered
///    │                 │                          │
///    └─────────────────┴──────────────────────────┴──► cancelled
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Processing,
    Completed,
    Shipped,
    Delivered,
    Cancelled,
    /// A status string outside the known set, kept as received.
    Other(String),
}

impl OrderStatus {
    /// Returns the status as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    /// Returns true if the status belongs to the known set.
    pub fn is_known(&self) -> bool {
        !matches!(self, OrderStatus::Other(_))
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "pending" => OrderStatus::Pending,
            "in_progress" => OrderStatus::InProgress,
            "processing" => OrderStatus::Processing,
            "completed" => OrderStatus::Completed,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        })
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(OrderStatus::Other(_)) => OrderStatus::Other(s),
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_known_statuses_parse() {
        assert_eq!(OrderStatus::from("pending"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from("in_progress"), OrderStatus::InProgress);
        assert_eq!(OrderStatus::from("processing"), OrderStatus::Processing);
        assert_eq!(OrderStatus::from("completed"), OrderStatus::Completed);
        assert_eq!(OrderStatus::from("shipped"), OrderStatus::Shipped);
        assert_eq!(OrderStatus::from("delivered"), OrderStatus::Delivered);
        assert_eq!(OrderStatus::from("cancelled"), OrderStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_is_kept_verbatim() {
        let status = OrderStatus::from("on_hold");
        assert_eq!(status, OrderStatus::Other("on_hold".to_string()));
        assert_eq!(status.as_str(), "on_hold");
        assert!(!status.is_known());
    }

    #[test]
    fn test_status_matching_is_case_sensitive() {
        assert!(!OrderStatus::from("Completed").is_known());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let other: OrderStatus = serde_json::from_str("\"returned\"").unwrap();
        assert_eq!(other.to_string(), "returned");
    }
}
