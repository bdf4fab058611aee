//! Order analytics service.

use common::ErrorCode;
use domain::{Order, ValidationPolicy};
use serde_json::Value;

use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, Result};
use crate::period::Period;
use crate::report::{OrderStatistics, OrderTotals, RevenueByPeriod};

/// A stateless calculator for order summary figures.
///
/// Every operation comes in two forms. The `Value` form accepts the batch as
/// received from upstream, which may be absent, not a list, or contain
/// malformed records. The typed `*_for` form works on orders that were
/// already parsed. Both apply the same item rule and counting policy.
#[derive(Debug, Clone)]
pub struct OrderAnalyticsService {
    config: AnalyticsConfig,
    policy: ValidationPolicy,
}

impl Default for OrderAnalyticsService {
    fn default() -> Self {
        Self::with_config(AnalyticsConfig::default())
    }
}

impl OrderAnalyticsService {
    /// Creates a service with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with an explicit configuration.
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self {
            policy: config.policy(),
            config,
        }
    }

    /// Calculates revenue, average order value and item volume.
    ///
    /// Fails with [`AnalyticsError::InvalidInput`] if `orders` is absent or
    /// not an array. Invalid orders and items are left out of every figure.
    #[tracing::instrument(skip(self, orders))]
    pub fn calculate_order_totals(&self, orders: Option<&Value>) -> Result<OrderTotals> {
        self.run("totals", orders, |orders| self.totals_for(&orders))
    }

    /// Calculates the status histogram and average basket size.
    #[tracing::instrument(skip(self, orders))]
    pub fn get_order_statistics(&self, orders: Option<&Value>) -> Result<OrderStatistics> {
        self.run("statistics", orders, |orders| self.statistics_for(&orders))
    }

    /// Sums item revenue per calendar bucket of each order's `created_at`.
    #[tracing::instrument(skip(self, orders))]
    pub fn revenue_by_period(
        &self,
        orders: Option<&Value>,
        period: Period,
    ) -> Result<RevenueByPeriod> {
        self.run("revenue_by_period", orders, |orders| {
            self.revenue_for(&orders, period)
        })
    }

    /// Totals over already-parsed orders.
    pub fn totals_for(&self, orders: &[Order]) -> Result<OrderTotals> {
        let rule = self.config.item_rule;
        let mut totals = OrderTotals::default();

        for order in orders.iter().filter(|order| self.is_counted(order)) {
            for item in order.countable_items(rule) {
                totals.total_revenue += item.line_total();
                totals.total_items += self.config.item_count.weight(item);
            }
            totals.order_count += 1;
        }

        totals.average_order_value = average(totals.total_revenue, totals.order_count);

        ensure_finite("totalRevenue", totals.total_revenue)?;
        ensure_finite("totalItems", totals.total_items)?;
        ensure_finite("averageOrderValue", totals.average_order_value)?;
        Ok(totals)
    }

    /// Statistics over already-parsed orders.
    pub fn statistics_for(&self, orders: &[Order]) -> Result<OrderStatistics> {
        let rule = self.config.item_rule;
        let mut stats = OrderStatistics::default();
        let mut item_volume = 0.0;

        for order in orders.iter().filter(|order| self.is_counted(order)) {
            stats.total_orders += 1;
            *stats
                .status_counts
                .entry(order.status_key().to_string())
                .or_insert(0) += 1;
            item_volume += order
                .countable_items(rule)
                .map(|item| self.config.item_count.weight(item))
                .sum::<f64>();
        }

        stats.average_items_per_order = average(item_volume, stats.total_orders);

        ensure_finite("averageItemsPerOrder", stats.average_items_per_order)?;
        Ok(stats)
    }

    /// Revenue buckets over already-parsed orders.
    ///
    /// Orders whose `created_at` is empty or not a recognizable timestamp are
    /// skipped and counted in [`RevenueByPeriod::skipped_orders`].
    pub fn revenue_for(&self, orders: &[Order], period: Period) -> Result<RevenueByPeriod> {
        let rule = self.config.item_rule;
        let mut report = RevenueByPeriod::new(period);

        for order in orders.iter().filter(|order| self.is_counted(order)) {
            let Some(key) = order.created_at_utc().and_then(|at| period.key(at)) else {
                tracing::debug!(
                    order_id = %order.id,
                    created_at = %order.created_at,
                    "skipping order without usable timestamp"
                );
                report.skipped_orders += 1;
                continue;
            };
            *report.buckets.entry(key).or_insert(0.0) += order.revenue(rule);
        }

        for (key, revenue) in &report.buckets {
            ensure_finite(key, *revenue)?;
        }
        Ok(report)
    }

    /// Validates the batch, parses its records and applies `compute`.
    fn run<T>(
        &self,
        operation: &'static str,
        orders: Option<&Value>,
        compute: impl FnOnce(Vec<Order>) -> Result<T>,
    ) -> Result<T> {
        metrics::counter!("analytics_calculations_total", "operation" => operation).increment(1);

        let result = batch(orders)
            .map(|records| self.parse_batch(records))
            .and_then(compute);

        if let Err(e) = &result {
            match e {
                AnalyticsError::InvalidInput(_) => {
                    tracing::debug!(operation, error = %e, "rejected order batch")
                }
                AnalyticsError::Calculation(_) => {
                    tracing::warn!(operation, error = %e, "order aggregation failed")
                }
            }
            metrics::counter!("analytics_errors_total", "code" => e.code()).increment(1);
        }
        result
    }

    /// Parses each record, dropping the ones that fail validation.
    fn parse_batch(&self, records: &[Value]) -> Vec<Order> {
        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match Order::from_value(record, &self.policy) {
                Ok(order) => Some(order),
                Err(reason) => {
                    tracing::debug!(index, %reason, "skipping invalid order");
                    metrics::counter!("analytics_orders_skipped_total").increment(1);
                    None
                }
            })
            .collect()
    }

    fn is_counted(&self, order: &Order) -> bool {
        self.config.count_empty_orders
            || order.countable_items(self.config.item_rule).next().is_some()
    }
}

/// Extracts the record list, mirroring the upstream falsy/array checks.
fn batch(orders: Option<&Value>) -> Result<&[Value]> {
    match orders {
        None => Err(AnalyticsError::orders_required()),
        Some(value) if is_falsy(value) => Err(AnalyticsError::orders_required()),
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(AnalyticsError::orders_not_array()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn average(sum: f64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalyticsError::Calculation(format!(
            "{field} is not a finite number"
        )))
    }
}
