use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use medledger_api::entities::transaction::TransactionType;
use medledger_api::handlers::common::PageMeta;
use medledger_api::rate_limiter::{RateLimitConfig, RateLimiter};
use medledger_api::services::ledger::compute_new_stock;
use medledger_api::ApiResponse;

// Benchmark for the ledger stock arithmetic
fn stock_math_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_math");

    for quantity in [1, 10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(quantity),
            quantity,
            |b, &quantity| {
                b.iter(|| {
                    let checkout = compute_new_stock(
                        black_box(100_000),
                        TransactionType::Checkout,
                        black_box(quantity),
                    );
                    let ret = compute_new_stock(
                        black_box(100_000),
                        TransactionType::Return,
                        black_box(quantity),
                    );
                    let waste = compute_new_stock(
                        black_box(100_000),
                        TransactionType::Waste,
                        black_box(quantity),
                    );
                    black_box((checkout, ret, waste))
                });
            },
        );
    }

    group.finish();
}

// Benchmark for pagination metadata derivation
fn page_meta_benchmark(c: &mut Criterion) {
    c.bench_function("page_meta", |b| {
        b.iter(|| {
            let meta = PageMeta::new(black_box(7), black_box(25), black_box(12_345));
            black_box(meta)
        });
    });
}

// Benchmark for response envelope serialization
fn envelope_serialization_benchmark(c: &mut Criterion) {
    use serde_json::json;

    let data = json!({
        "id": "550e8400-e29b-41d4-a716-446655440000",
        "medicationId": "123e4567-e89b-12d3-a456-426614174000",
        "nurseId": "9f3b5c1e-0a2d-4e6f-8b7a-1c2d3e4f5a6b",
        "witnessId": "7a6f5e4d-3c2b-1a0f-9e8d-7c6b5a4f3e2d",
        "type": "CHECKOUT",
        "quantity": 30,
        "notes": null,
        "createdAt": "2026-08-25T12:00:00Z"
    });

    c.bench_function("envelope_serialize", |b| {
        b.iter(|| {
            let response = ApiResponse::paginated(vec![data.clone()], PageMeta::new(1, 10, 1));
            let serialized = serde_json::to_string(&response).unwrap();
            black_box(serialized)
        });
    });

    c.bench_function("envelope_deserialize", |b| {
        let response = ApiResponse::paginated(vec![data.clone()], PageMeta::new(1, 10, 1));
        let serialized = serde_json::to_string(&response).unwrap();
        b.iter(|| {
            let deserialized: serde_json::Value = serde_json::from_str(&serialized).unwrap();
            black_box(deserialized)
        });
    });
}

// Benchmark for the in-memory rate limiter hot path
fn rate_limiter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_limiter");

    group.bench_function("check_single_key", |b| {
        let limiter = RateLimiter::new(RateLimitConfig {
            requests_per_window: u32::MAX,
            window_duration: Duration::from_secs(60),
            enable_headers: true,
        });
        b.iter(|| {
            let result = limiter.check_rate_limit(black_box("ip:10.0.0.1"));
            black_box(result)
        });
    });

    group.bench_function("check_many_keys", |b| {
        let limiter = RateLimiter::new(RateLimitConfig::default());
        let keys: Vec<String> = (0..1_000)
            .map(|i| format!("ip:10.0.{}.{}", i / 256, i % 256))
            .collect();
        let mut next = 0;
        b.iter(|| {
            let key = &keys[next % keys.len()];
            next += 1;
            let result = limiter.check_rate_limit(black_box(key));
            black_box(result)
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets =
        stock_math_benchmark,
        page_meta_benchmark,
        envelope_serialization_benchmark,
        rate_limiter_benchmark
}

criterion_main!(benches);
