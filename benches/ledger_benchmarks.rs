//! Performance benchmarks for the attendance kiosk.
//!
//! Covers the late-penalty rule, ledger queries as the ledger grows, and a
//! PIN verification round trip through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_kiosk::api::{AppState, create_router};
use attendance_kiosk::calculation::{LatePolicy, calculate_late_penalty};
use attendance_kiosk::config::ConfigLoader;
use attendance_kiosk::models::{
    ClockTime, NewAttendanceRecord, Photo, RecordFilter, RecordStatus,
};
use attendance_kiosk::store::AttendanceLedger;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds a ledger with `count` pending records spread over 30 days and 50
/// employees.
fn create_ledger(count: usize) -> AttendanceLedger {
    let start = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
    let policy = LatePolicy::default();
    let mut ledger = AttendanceLedger::default();

    for i in 0..count {
        let check_in = ClockTime::new(7 + (i % 3) as u32, (i * 7 % 60) as u32).unwrap();
        let penalty = calculate_late_penalty(check_in, &policy);
        ledger.add_record(NewAttendanceRecord {
            employee_id: format!("emp_{}", i % 50),
            employee_name: format!("Employee {}", i % 50),
            date: start + chrono::Days::new((i % 30) as u64),
            check_in_time: check_in,
            check_in_photo: Photo::new("data:image/jpeg;base64,AAAA"),
            late_minutes: penalty.late_minutes,
            late_penalty: penalty.late_penalty,
        });
    }
    ledger
}

fn bench_late_penalty(c: &mut Criterion) {
    let policy = LatePolicy::default();
    let check_in = ClockTime::new(8, 45).unwrap();

    c.bench_function("late_penalty", |b| {
        b.iter(|| calculate_late_penalty(black_box(check_in), black_box(&policy)))
    });
}

fn bench_ledger_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_queries");
    let filter = RecordFilter {
        status: Some(RecordStatus::Pending),
        date: NaiveDate::from_ymd_opt(2025, 11, 15),
        employee_id: None,
    };

    for size in [100usize, 1_000, 10_000] {
        let ledger = create_ledger(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("filter", size), &ledger, |b, ledger| {
            b.iter(|| black_box(ledger.filter(black_box(&filter)).len()))
        });
        group.bench_with_input(BenchmarkId::new("summary", size), &ledger, |b, ledger| {
            b.iter(|| black_box(ledger.summary()))
        });
    }

    group.finish();
}

fn bench_verify_pin_request(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::from_config(&config));

    c.bench_function("verify_pin_request", |b| {
        b.to_async(&runtime).iter(|| {
            let router = router.clone();
            async move {
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/kiosk/verify-pin")
                            .header("Content-Type", "application/json")
                            .body(Body::from(r#"{"pin":"778899"}"#))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            }
        })
    });
}

criterion_group!(
    benches,
    bench_late_penalty,
    bench_ledger_queries,
    bench_verify_pin_request,
);
criterion_main!(benches);
