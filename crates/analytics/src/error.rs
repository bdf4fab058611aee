//! Analytics error types.

use common::ErrorCode;
use thiserror::Error;

pub(crate) const ORDERS_REQUIRED: &str = "Orders data is required";
pub(crate) const ORDERS_NOT_ARRAY: &str = "Orders must be an array";

/// Batch-level failures.
///
/// The display text is the bare message, as it is shown to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The batch itself is missing or is not a list.
    #[error("{0}")]
    InvalidInput(String),

    /// The aggregation produced an unusable result.
    #[error("{0}")]
    Calculation(String),
}

impl AnalyticsError {
    pub(crate) fn orders_required() -> Self {
        AnalyticsError::InvalidInput(ORDERS_REQUIRED.to_string())
    }

    pub(crate) fn orders_not_array() -> Self {
        AnalyticsError::InvalidInput(ORDERS_NOT_ARRAY.to_string())
    }
}

impl ErrorCode for AnalyticsError {
    fn code(&self) -> &'static str {
        match self {
            AnalyticsError::InvalidInput(_) => "INVALID_INPUT",
            AnalyticsError::Calculation(_) => "CALCULATION_ERROR",
        }
    }
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
