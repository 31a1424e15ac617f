// Mapping benchmarks
// Author: Gabriel Demetrios Lafis

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use ticket_analytics_mapper::{data::AnalyticsResult, mapping::map_analytics};

fn city_payload(rows: usize) -> serde_json::Value {
    let data: Vec<serde_json::Value> = (0..rows)
        .map(|i| json!({"city": format!("City {}", i), "ticket_type": "Complaint", "tickets": i.to_string()}))
        .collect();

    json!({
        "request_id": "bench",
        "dsl": {"dimensions": ["city", "ticket_type"], "metrics": [{"field": "*", "as": "tickets"}]},
        "sql": "SELECT city, ticket_type, count(*) AS tickets FROM tickets GROUP BY 1, 2",
        "data": data,
        "chart_spec": {"mark": {"type": "bar"}, "encoding": {"x": {"field": "city,ticket_type"}}},
        "summary": "Tickets by city and type"
    })
}

fn bench_mapping(c: &mut Criterion) {
    let payload = city_payload(500);

    c.bench_function("parse_payload_500_rows", |b| {
        b.iter(|| AnalyticsResult::from_json(black_box(&payload)))
    });

    let result = AnalyticsResult::from_json(&payload);
    c.bench_function("map_analytics_500_rows", |b| {
        b.iter(|| map_analytics(black_box(&result)))
    });
}

criterion_group!(benches, bench_mapping);
criterion_main!(benches);
