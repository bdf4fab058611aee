//! Service for loading validated orders from a source.

use common::ServiceResponse;

use crate::error::DomainError;
use crate::source::OrderSource;

use super::{Order, ValidationPolicy};

/// Loads order rows from an [`OrderSource`] and keeps only the valid ones.
///
/// The infallible methods never surface source failures: they log them and
/// return an empty result. Use [`OrdersService::try_get_orders`] when the
/// caller needs to tell "no orders" apart from "store unavailable".
pub struct OrdersService<S: OrderSource> {
    source: S,
    policy: ValidationPolicy,
}

impl<S: OrderSource> OrdersService<S> {
    /// Creates a service using [`ValidationPolicy::records`].
    pub fn new(source: S) -> Self {
        Self::with_policy(source, ValidationPolicy::records())
    }

    /// Creates a service with an explicit validation policy.
    pub fn with_policy(source: S, policy: ValidationPolicy) -> Self {
        Self { source, policy }
    }

    /// Returns all valid orders, newest first.
    ///
    /// Never fails; a source error yields an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn get_orders(&self) -> Vec<Order> {
        match self.try_get_orders().await {
            Ok(orders) => orders,
            Err(e) => {
                tracing::warn!(error = %e, "order fetch failed, returning no orders");
                Vec::new()
            }
        }
    }

    /// Returns all valid orders, newest first, or the source error.
    #[tracing::instrument(skip(self))]
    pub async fn try_get_orders(&self) -> Result<Vec<Order>, DomainError> {
        let rows = self.source.fetch_orders().await?;
        let total = rows.len();

        let mut orders: Vec<Order> = rows
            .iter()
            .filter_map(|row| match Order::from_value(row, &self.policy) {
                Ok(order) => Some(order),
                Err(reason) => {
                    tracing::debug!(%reason, "skipping invalid order row");
                    metrics::counter!("orders_rows_rejected_total").increment(1);
                    None
                }
            })
            .collect();

        // Unparseable timestamps sort last.
        orders.sort_by_key(|order| std::cmp::Reverse(order.created_at_utc()));

        tracing::debug!(total, valid = orders.len(), "loaded orders");
        Ok(orders)
    }

    /// Returns [`OrdersService::try_get_orders`] wrapped in the response envelope.
    pub async fn get_orders_response(&self) -> ServiceResponse<Vec<Order>> {
        self.try_get_orders().await.into()
    }

    /// Returns the order with `id` if it exists and is valid.
    ///
    /// An empty id, a missing or invalid row, and source failures all yield `None`.
    #[tracing::instrument(skip(self))]
    pub async fn get_order_by_id(&self, id: &str) -> Option<Order> {
        match self.try_get_order_by_id(id).await {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(error = %e, "order lookup failed");
                None
            }
        }
    }

    /// Fallible form of [`OrdersService::get_order_by_id`].
    ///
    /// An empty id or a missing row is `Ok(None)`; an invalid row is
    /// [`DomainError::Rejected`].
    pub async fn try_get_order_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        if id.is_empty() {
            return Ok(None);
        }

        let Some(row) = self.source.fetch_order(id).await? else {
            return Ok(None);
        };

        Order::from_value(&row, &self.policy)
            .map(Some)
            .map_err(|reason| DomainError::Rejected {
                id: id.to_string(),
                reason,
            })
    }
}
