//! Domain layer for order analytics.
//!
//! This crate provides the order record types and everything needed to get
//! them out of untrusted input:
//! - [`Order`] / [`OrderItem`] records with [`OrderStatus`]
//! - [`ValidationPolicy`] and per-record parsing into a tagged result
//! - [`OrderSource`] data-source seam with an in-memory implementation
//! - [`OrdersService`] for loading validated orders from a source

pub mod error;
pub mod order;
pub mod source;

pub use error::DomainError;
pub use order::{
    CustomerId, ItemId, ItemRule, Order, OrderItem, OrderRejection, OrderStatus, OrdersService,
    ProductId, UnknownItemRule, ValidationPolicy, parse_timestamp, validate_order,
    validate_order_item,
};
pub use source::{InMemoryOrderSource, OrderSource, SourceError};
