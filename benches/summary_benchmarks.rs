//! Performance benchmarks for payroll aggregation.
//!
//! Covers the pure summary computation at several run sizes, union report
//! generation, and the `/payroll/summary` endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::compute_payroll_summary;
use payroll_engine::config::{ConfigLoader, PayrollRates};
use payroll_engine::models::{
    Adjustment, Deduction, DeductionType, OneTimeBill, Payee, PayeeType, PaymentMethod, RateType,
};
use payroll_engine::union_reports::generate_union_reports;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const UNIONS: [&str; 3] = ["IATSE", "Teamsters", "SAG-AFTRA"];
const DEPARTMENTS: [&str; 4] = ["Camera", "Grip", "Electric", "Art"];

/// Builds a crew of `count` selected payees with a realistic mix of unions,
/// departments and deductions.
fn create_crew(count: usize) -> Vec<Payee> {
    (0..count)
        .map(|i| {
            let payee_type = if i % 5 == 0 {
                PayeeType::Vendor
            } else {
                PayeeType::Employee
            };
            let mut payee = Payee::new(
                format!("p_{:05}", i),
                format!("Crew Member {}", i),
                payee_type,
                RateType::Weekly,
                Decimal::new(150_000 + (i as i64 % 40) * 2_500, 2),
            );
            payee.selected = true;
            payee.department = Some(DEPARTMENTS[i % DEPARTMENTS.len()].to_string());
            if payee_type == PayeeType::Employee && i % 2 == 0 {
                payee.union = Some(UNIONS[i % UNIONS.len()].to_string());
                payee.job_title = Some("Technician".to_string());
                payee.ssn = Some(format!("123-45-{:04}", i % 10_000));
            }
            if i % 7 == 0 {
                payee.payment_method = PaymentMethod::Check;
            }
            payee.adjustments.push(Adjustment {
                rate: Decimal::new(12_500, 2),
                ..Adjustment::default()
            });
            payee.deductions.push(Deduction {
                amount: Decimal::new(30_000, 2),
                deduction_type: DeductionType::Tax,
                ..Deduction::default()
            });
            payee
        })
        .collect()
}

fn create_bills() -> Vec<OneTimeBill> {
    vec![
        OneTimeBill::new("Lens Rental Co", Decimal::from(500)),
        OneTimeBill::new("Craft Services", Decimal::from(1200)),
    ]
}

/// Benchmark: summary computation across run sizes.
fn bench_compute_summary(c: &mut Criterion) {
    let rates = PayrollRates::default();
    let bills = create_bills();

    let mut group = c.benchmark_group("compute_summary");
    for size in [1usize, 50, 500, 5_000] {
        let crew = create_crew(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &crew, |b, crew| {
            b.iter(|| black_box(compute_payroll_summary(crew, &bills, &rates).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: union report generation for a 500-person crew.
fn bench_union_reports(c: &mut Criterion) {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let crew = create_crew(500);

    c.bench_function("union_reports_500", |b| {
        b.iter(|| black_box(generate_union_reports(&crew, config.rates(), config.company())))
    });
}

/// Benchmark: POST /payroll/summary for a 50-person crew.
fn bench_summary_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::new(config));
    let body = serde_json::json!({
        "payees": create_crew(50),
        "oneTimeBills": create_bills(),
    })
    .to_string();

    c.bench_function("summary_endpoint_50", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/summary")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_compute_summary,
    bench_union_reports,
    bench_summary_endpoint
);
criterion_main!(benches);
