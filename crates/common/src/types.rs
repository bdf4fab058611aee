use serde::{Deserialize, Serialize};

/// Unique identifier for an order record.
///
/// Order rows come from an external store that hands out opaque string keys,
/// so the identifier wraps a `String` rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an order ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_preserves_value() {
        let id = OrderId::new("order-1");
        assert_eq!(id.as_str(), "order-1");
        assert_eq!(id.to_string(), "order-1");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_order_id_conversions_agree() {
        let a: OrderId = "order-2".into();
        let b: OrderId = String::from("order-2").into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_id_serializes_as_plain_string() {
        let id = OrderId::new("order-3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"order-3\"");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
