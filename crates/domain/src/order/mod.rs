//! Order records and validation.

mod record;
mod service;
mod status;
mod validation;
mod value_objects;

pub use record::{Order, OrderItem, parse_timestamp};
pub use service::OrdersService;
pub use status::OrderStatus;
pub use validation::{
    ItemRule, UnknownItemRule, ValidationPolicy, validate_order, validate_order_item,
};
pub use value_objects::{CustomerId, ItemId, ProductId};

use thiserror::Error;

/// Why a single record was excluded.
///
/// Rejections are per record and never fail a whole batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderRejection {
    /// The record is not a JSON object.
    #[error("Record is not an object")]
    NotAnObject,

    /// A required field is absent or null.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A field is present but has the wrong JSON type.
    #[error("Field {field} must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// A required identifier is the empty string.
    #[error("Field {field} must not be empty")]
    EmptyField { field: &'static str },

    /// The order total is below zero.
    #[error("Invalid total amount: {total} (must not be negative)")]
    NegativeTotal { total: f64 },

    /// The status is outside the known set.
    #[error("Unknown order status: {status}")]
    UnknownStatus { status: String },
}
