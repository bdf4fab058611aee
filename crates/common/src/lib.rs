//! Shared types for the order analytics workspace.
//!
//! - [`OrderId`] identifies an order record across crates
//! - [`ServiceResponse`] is the JSON envelope handed to callers
//! - [`ErrorCode`] gives errors a stable machine-readable code

pub mod response;
pub mod types;

pub use response::{ErrorCode, ServiceResponse};
pub use types::OrderId;
