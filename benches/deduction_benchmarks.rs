//! Performance benchmarks for the deduction administration service.
//!
//! Covers the request paths that scan whole collections:
//! - Deduction list search through the router
//! - Employee tables through the router
//! - Merging extracted candidates against lists of growing size
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use deduction_admin::api::{AppState, create_router};
use deduction_admin::config::ConfigLoader;
use deduction_admin::error::AdminResult;
use deduction_admin::extraction::DeductionExtractor;
use deduction_admin::models::{Deduction, DeductionStatus, ExtractedDeduction};
use deduction_admin::store::merge_candidates;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

struct Offline;

#[async_trait]
impl DeductionExtractor for Offline {
    async fn extract_deductions(&self, _text: &str) -> AdminResult<Vec<ExtractedDeduction>> {
        Ok(Vec::new())
    }

    async fn suggest_code(&self, _: &str, _: &str, _: &str) -> AdminResult<String> {
        Ok(String::new())
    }
}

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");
    AppState::new(config, Arc::new(Offline)).expect("Failed to build state")
}

fn existing_deductions(count: usize) -> Vec<Deduction> {
    (0..count)
        .map(|i| Deduction {
            id: i.to_string(),
            plan_name: format!("Plan {}", i),
            provider_name: format!("Provider {}", i),
            category: "Medical".to_string(),
            subtype: "PPO Plan".to_string(),
            payroll_code: format!("MED-{:04}", i),
            status: DeductionStatus::Active,
            is_pre_tax: true,
            created_at: Utc::now(),
            employee_count: 0,
        })
        .collect()
}

/// Half of the candidates collide with existing codes.
fn candidates(count: usize) -> Vec<ExtractedDeduction> {
    (0..count)
        .map(|i| ExtractedDeduction {
            plan_name: format!("Imported {}", i),
            provider_name: "Acme Benefits".to_string(),
            category: "Medical".to_string(),
            suggested_code: if i % 2 == 0 {
                format!("MED-{:04}", i)
            } else {
                format!("IMP-{:04}", i)
            },
        })
        .collect()
}

/// Benchmark: GET /deductions with a search query.
fn bench_list_search(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    c.bench_function("list_search", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/deductions?q=dental")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: both employee tables for the visible employees.
fn bench_employee_tables(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    let mut group = c.benchmark_group("employee_table");
    for view in ["deductions", "demographics"] {
        let uri = format!("/employees?view={}&q=a", view);
        group.bench_with_input(BenchmarkId::new("view", view), &uri, |b, uri| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(Request::builder().uri(uri.as_str()).body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }
    group.finish();
}

/// Benchmark: merging a batch of candidates as the list grows.
fn bench_merge_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for size in [10usize, 100, 1000].iter() {
        let existing = existing_deductions(*size);
        let batch = candidates(*size);
        let now = Utc::now();
        let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("candidates", size), size, |b, _| {
            b.iter(|| black_box(merge_candidates(&existing, &batch, &config, now)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_list_search,
    bench_employee_tables,
    bench_merge_scaling,
);
criterion_main!(benches);
