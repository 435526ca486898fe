//! Report routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    AppState,
    response::{Message, error_response},
};
use puc_core::reports::{ReportCharts, ReportSummary, ReportWindow};
use puc_db::PollutionCheckRepository;
use puc_shared::{AppError, AppResult};

const MISSING_DATES: &str = "Please select both Start Date and End Date.";
const INVALID_RANGE: &str = "Invalid date range selected or format incorrect (use YYYY-MM-DD).";

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports", get(report_from_query).post(report_from_body))
}

/// Inclusive local date range, as `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    /// First day included.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day included.
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Response for a report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// First day included, as submitted.
    pub start_date: String,
    /// Last day included, as submitted.
    pub end_date: String,
    /// UTC window the days map to.
    pub window: ReportWindow,
    /// Aggregate figures.
    pub summary: ReportSummary,
    /// Pie charts; empty when nothing matched.
    pub charts: ReportCharts,
    /// Notices for the caller.
    pub messages: Vec<Message>,
}

/// GET `/reports?start_date=..&end_date=..`
async fn report_from_query(
    State(state): State<AppState>,
    Query(request): Query<ReportRequest>,
) -> Response {
    build_report(&state, request).await
}

/// POST `/reports`
async fn report_from_body(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Response {
    build_report(&state, request).await
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn build_report(state: &AppState, request: ReportRequest) -> Response {
    let (Some(start_date), Some(end_date)) =
        (non_empty(request.start_date), non_empty(request.end_date))
    else {
        return error_response(&AppError::Validation(MISSING_DATES.to_string()));
    };

    let window = match ReportWindow::from_local_dates(&start_date, &end_date, &state.timezone) {
        Ok(window) => window,
        Err(e) => {
            warn!(error = %e, "Rejected report range");
            return error_response(&AppError::Validation(INVALID_RANGE.to_string()));
        }
    };

    let summary = match summarize(state, &window).await {
        Ok(summary) => summary,
        Err(e) => return error_response(&e),
    };

    let mut messages = Vec::new();
    let charts = if summary.is_empty() {
        messages.push(Message::info(format!(
            "No records found for the selected date range ({start_date} to {end_date})."
        )));
        ReportCharts::default()
    } else {
        ReportCharts::render(&summary)
    };
    info!(
        start_date = %start_date,
        end_date = %end_date,
        total_checks = summary.total_checks,
        charts = charts.len(),
        "Report generated"
    );

    (
        StatusCode::OK,
        Json(ReportResponse {
            start_date,
            end_date,
            window,
            summary,
            charts,
            messages,
        }),
    )
        .into_response()
}

async fn summarize(state: &AppState, window: &ReportWindow) -> AppResult<ReportSummary> {
    PollutionCheckRepository::new(Arc::clone(&state.db))
        .summarize(window)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                start = %window.start,
                end = %window.end,
                "Failed to aggregate report"
            );
            AppError::Database(e.to_string())
        })
}
