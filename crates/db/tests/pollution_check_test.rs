//! Integration tests for the pollution check repository against PostgreSQL.
//!
//! These run only when `DATABASE_URL` is set. Each test works inside its own
//! randomly chosen day so runs do not see each other's rows.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use puc_core::{
    check::{CheckDuration, FuelType, PollutionCheck, WheelCount},
    reports::ReportWindow,
};
use puc_db::{
    PollutionCheckRepository,
    migration::{Migrator, MigratorTrait},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement, Value};
use tokio::sync::OnceCell;
use uuid::Uuid;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connects and applies migrations once, or `None` without `DATABASE_URL`.
async fn connect() -> Option<Arc<DatabaseConnection>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };
    let db = Database::connect(&url)
        .await
        .expect("Failed to connect to database");
    MIGRATED
        .get_or_init(|| async {
            Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");
        })
        .await;
    Some(Arc::new(db))
}

/// A one-day UTC window on a random day between 1990 and 2009, cleared of
/// rows left by earlier runs.
async fn fresh_window(db: &DatabaseConnection) -> ReportWindow {
    let base = NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date");
    let offset = i64::try_from(Uuid::new_v4().as_u128() % 7000).expect("fits in i64");
    let day = (base + Duration::days(offset)).format("%Y-%m-%d").to_string();
    let window = ReportWindow::from_local_dates(&day, &day, &Utc).expect("valid window");

    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "DELETE FROM pollution_checks WHERE check_date >= $1 AND check_date < $2",
        [
            Value::from(window.start - Duration::days(1)),
            Value::from(window.end + Duration::days(1)),
        ],
    ))
    .await
    .expect("Failed to clear window");
    window
}

fn check(
    vehicle_no: &str,
    fuel_type: FuelType,
    wheels: WheelCount,
    duration: CheckDuration,
    price: Decimal,
    checked_at: DateTime<Utc>,
) -> PollutionCheck {
    PollutionCheck {
        vehicle_no: vehicle_no.to_string(),
        fuel_type,
        wheels,
        duration,
        price,
        checked_at,
        expires_at: checked_at + Duration::days(30 * i64::from(duration.months())),
    }
}

#[tokio::test]
async fn test_summarize_counts_half_open_window() {
    let Some(db) = connect().await else { return };
    let window = fresh_window(&db).await;
    let repo = PollutionCheckRepository::new(Arc::clone(&db));

    let rows = [
        // At start: included.
        check(
            "IN0001",
            FuelType::Petrol,
            WheelCount::Four,
            CheckDuration::SixMonths,
            dec!(200.00),
            window.start,
        ),
        // One second before end: included.
        check(
            "IN0002",
            FuelType::Diesel,
            WheelCount::Three,
            CheckDuration::OneYear,
            dec!(280.00),
            window.end - Duration::seconds(1),
        ),
        // Two-wheeler: counted everywhere except the fuel buckets.
        check(
            "IN0003",
            FuelType::Petrol,
            WheelCount::Two,
            CheckDuration::SixMonths,
            dec!(100.50),
            window.start + Duration::hours(1),
        ),
        // At end: excluded.
        check(
            "OUT0001",
            FuelType::Diesel,
            WheelCount::Four,
            CheckDuration::OneYear,
            dec!(375.00),
            window.end,
        ),
        // One second before start: excluded.
        check(
            "OUT0002",
            FuelType::Petrol,
            WheelCount::Two,
            CheckDuration::SixMonths,
            dec!(100.00),
            window.start - Duration::seconds(1),
        ),
    ];
    for row in &rows {
        repo.insert(row).await.expect("Failed to insert check");
    }

    let summary = repo.summarize(&window).await.expect("Failed to summarize");

    assert_eq!(summary.total_checks, 3);
    assert_eq!(summary.total_sales, dec!(580.50));
    assert_eq!(summary.counts_by_wheel.two, 1);
    assert_eq!(summary.counts_by_wheel.three, 1);
    assert_eq!(summary.counts_by_wheel.four, 1);
    assert_eq!(summary.counts_by_duration.six_months, 2);
    assert_eq!(summary.counts_by_duration.one_year, 1);
    assert_eq!(summary.counts_by_fuel_3_4.petrol, 1);
    assert_eq!(summary.counts_by_fuel_3_4.diesel, 1);
}

#[tokio::test]
async fn test_summarize_empty_window_is_zero() {
    let Some(db) = connect().await else { return };
    let window = fresh_window(&db).await;
    let repo = PollutionCheckRepository::new(db);

    let summary = repo.summarize(&window).await.expect("Failed to summarize");

    assert!(summary.is_empty());
    assert_eq!(summary.total_checks, 0);
    assert_eq!(summary.total_sales, Decimal::ZERO);
    assert_eq!(summary.counts_by_fuel_3_4.petrol, 0);
}

#[tokio::test]
async fn test_insert_stores_long_vehicle_number() {
    let Some(db) = connect().await else { return };
    let window = fresh_window(&db).await;
    let repo = PollutionCheckRepository::new(db);
    let vehicle_no = "TEMP".repeat(16);

    let stored = repo
        .insert(&check(
            &vehicle_no,
            FuelType::Diesel,
            WheelCount::Four,
            CheckDuration::OneYear,
            dec!(375.00),
            window.start + Duration::minutes(5),
        ))
        .await
        .expect("Failed to insert check");

    assert_eq!(stored.vehicle_no, vehicle_no);
    assert_eq!(stored.price, dec!(375.00));
    assert_eq!(repo.summarize(&window).await.expect("Failed to summarize").total_checks, 1);
}
