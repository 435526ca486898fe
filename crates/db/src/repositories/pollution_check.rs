//! Pollution check repository: inserts and report aggregation.

use std::sync::Arc;

use puc_core::check::PollutionCheck;
use puc_core::reports::{DurationCounts, FuelCounts, ReportSummary, ReportWindow, WheelCounts};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, Set, Statement,
};
use uuid::Uuid;

use crate::entities::pollution_checks;

const SUMMARY_SQL: &str = r"
SELECT
    COUNT(*) AS total_checks,
    COALESCE(SUM(price), 0) AS total_sales,
    COUNT(*) FILTER (WHERE wheels = 2) AS wheels_2,
    COUNT(*) FILTER (WHERE wheels = 3) AS wheels_3,
    COUNT(*) FILTER (WHERE wheels = 4) AS wheels_4,
    COUNT(*) FILTER (WHERE duration_months = 6) AS months_6,
    COUNT(*) FILTER (WHERE duration_months = 12) AS months_12,
    COUNT(*) FILTER (WHERE wheels <> 2 AND vehicle_type = 'petrol') AS petrol_3_4,
    COUNT(*) FILTER (WHERE wheels <> 2 AND vehicle_type = 'diesel') AS diesel_3_4
FROM pollution_checks
WHERE check_date >= $1 AND check_date < $2
";

/// Aggregate row returned by [`SUMMARY_SQL`].
#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    total_checks: i64,
    total_sales: Decimal,
    wheels_2: i64,
    wheels_3: i64,
    wheels_4: i64,
    months_6: i64,
    months_12: i64,
    petrol_3_4: i64,
    diesel_3_4: i64,
}

impl From<SummaryRow> for ReportSummary {
    fn from(row: SummaryRow) -> Self {
        let count = |n: i64| u64::try_from(n).unwrap_or_default();
        Self {
            total_checks: count(row.total_checks),
            total_sales: row.total_sales,
            counts_by_wheel: WheelCounts {
                two: count(row.wheels_2),
                three: count(row.wheels_3),
                four: count(row.wheels_4),
            },
            counts_by_duration: DurationCounts {
                six_months: count(row.months_6),
                one_year: count(row.months_12),
            },
            counts_by_fuel_3_4: FuelCounts {
                petrol: count(row.petrol_3_4),
                diesel: count(row.diesel_3_4),
            },
        }
    }
}

/// Pollution check repository. Records are append-only.
#[derive(Debug, Clone)]
pub struct PollutionCheckRepository {
    db: Arc<DatabaseConnection>,
}

impl PollutionCheckRepository {
    /// Creates a new pollution check repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Stores an issued check under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, check: &PollutionCheck) -> Result<pollution_checks::Model, DbErr> {
        let record = pollution_checks::ActiveModel {
            id: Set(Uuid::new_v4()),
            vehicle_no: Set(check.vehicle_no.clone()),
            vehicle_type: Set(check.fuel_type.as_str().to_string()),
            wheels: Set(i16::from(u8::from(check.wheels))),
            duration_months: Set(i16::from(check.duration.months())),
            price: Set(check.price),
            check_date: Set(check.checked_at.into()),
            expiry_date: Set(check.expires_at.into()),
        };

        let model = record.insert(self.db.as_ref()).await?;
        tracing::info!(
            id = %model.id,
            vehicle_no = %model.vehicle_no,
            price = %model.price,
            "Pollution check stored"
        );
        Ok(model)
    }

    /// Aggregates the checks whose check date falls inside `window`.
    ///
    /// An empty window yields an all-zero summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summarize(&self, window: &ReportWindow) -> Result<ReportSummary, DbErr> {
        let statement = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            SUMMARY_SQL,
            [window.start.into(), window.end.into()],
        );

        let summary = SummaryRow::find_by_statement(statement)
            .one(self.db.as_ref())
            .await?
            .map(ReportSummary::from)
            .unwrap_or_default();

        tracing::debug!(
            start = %window.start,
            end = %window.end,
            total_checks = summary.total_checks,
            "Report summary computed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "pollution_check_tests.rs"]
mod tests;
