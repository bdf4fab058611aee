//! Domain error types.

use common::ErrorCode;
use thiserror::Error;

use crate::order::OrderRejection;
use crate::source::SourceError;

/// Errors that can occur while loading orders.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The order source failed.
    #[error("Failed to fetch orders: {0}")]
    Source(#[from] SourceError),

    /// A stored order row did not pass validation.
    #[error("Order {id} is invalid: {reason}")]
    Rejected { id: String, reason: OrderRejection },
}

impl ErrorCode for DomainError {
    fn code(&self) -> &'static str {
        match self {
            DomainError::Source(_) => "FETCH_ORDERS_ERROR",
            DomainError::Rejected { .. } => "INVALID_ORDER",
        }
    }
}
