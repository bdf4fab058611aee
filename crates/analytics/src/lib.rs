//! Order analytics over in-memory order batches.
//!
//! This crate turns a batch of order records into summary figures:
//! - [`OrderAnalyticsService`] computes totals, status statistics and
//!   revenue bucketed by [`Period`]
//! - [`AnalyticsConfig`] selects the counting policies
//! - [`AnalyticsError`] reports batch-level failures with stable codes
//!
//! Malformed individual records are excluded from the figures, never
//! reported as errors. Only a missing or non-array batch is an error.

pub mod config;
pub mod error;
pub mod period;
pub mod report;
pub mod service;

pub use config::{AnalyticsConfig, ItemCountMode, UnknownItemCountMode};
pub use error::{AnalyticsError, Result};
pub use period::Period;
pub use report::{OrderStatistics, OrderTotals, RevenueByPeriod};
pub use service::OrderAnalyticsService;
