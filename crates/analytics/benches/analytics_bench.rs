use analytics::{OrderAnalyticsService, Period};
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};

/// Builds a batch of `n` orders with three items each, every tenth one malformed.
fn make_batch(n: usize) -> Value {
    let orders: Vec<Value> = (0..n)
        .map(|i| {
            let day = (i % 28) + 1;
            let mut order = json!({
                "id": format!("order-{i}"),
                "customer_id": format!("customer-{}", i % 50),
                "total_amount": 100.0,
                "status": if i % 3 == 0 { "completed" } else { "pending" },
                "items": [
                    { "id": "a", "product_id": "SKU-001", "quantity": 2, "price": 10.0 },
                    { "id": "b", "product_id": "SKU-002", "quantity": 1, "price": 25.5 },
                    { "id": "c", "product_id": "SKU-003", "quantity": 0, "price": 99.0 }
                ],
                "created_at": format!("2024-01-{day:02}T12:00:00Z"),
                "updated_at": format!("2024-01-{day:02}T12:00:00Z")
            });
            if i % 10 == 0 {
                order["total_amount"] = json!("invalid");
            }
            order
        })
        .collect();
    Value::Array(orders)
}

fn bench_totals(c: &mut Criterion) {
    let service = OrderAnalyticsService::new();
    let batch = make_batch(1000);

    c.bench_function("analytics/totals_1000_orders", |b| {
        b.iter(|| service.calculate_order_totals(Some(&batch)).unwrap());
    });
}

fn bench_statistics(c: &mut Criterion) {
    let service = OrderAnalyticsService::new();
    let batch = make_batch(1000);

    c.bench_function("analytics/statistics_1000_orders", |b| {
        b.iter(|| service.get_order_statistics(Some(&batch)).unwrap());
    });
}

fn bench_revenue_by_week(c: &mut Criterion) {
    let service = OrderAnalyticsService::new();
    let batch = make_batch(1000);

    c.bench_function("analytics/revenue_by_week_1000_orders", |b| {
        b.iter(|| service.revenue_by_period(Some(&batch), Period::Week).unwrap());
    });
}

criterion_group!(benches, bench_totals, bench_statistics, bench_revenue_by_week);
criterion_main!(benches);
