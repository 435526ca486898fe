//! Pollution check routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    AppState,
    extract::CheckSubmission,
    response::{Message, error_response, validation_response},
};
use puc_core::check::{PollutionCheck, ValidatedCheck};
use puc_db::{PollutionCheckRepository, entities::pollution_checks};
use puc_shared::{AppError, AppResult};

/// Creates the pollution check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/checks", post(create_check))
}

/// POST `/checks` - Validate, price, date and store a check.
///
/// Accepts JSON or an urlencoded form. Nothing is stored unless every step
/// before the insert succeeds.
async fn create_check(
    State(state): State<AppState>,
    CheckSubmission(form): CheckSubmission,
) -> Response {
    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(errors) => {
            warn!(errors = %errors, "Rejected pollution check submission");
            return validation_response(errors.messages(), &form);
        }
    };

    match issue_and_store(&state, validated).await {
        Ok(record) => {
            info!(id = %record.id, vehicle_no = %record.vehicle_no, "Pollution check added");
            let message = format!(
                "Pollution check added successfully! Record ID: {}",
                record.id
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "check": record,
                    "messages": [Message::success(message)],
                })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

async fn issue_and_store(
    state: &AppState,
    validated: ValidatedCheck,
) -> AppResult<pollution_checks::Model> {
    let checked_at = Utc::now().with_timezone(&state.timezone);
    let check = PollutionCheck::issue(validated, &state.prices, &checked_at).map_err(|e| {
        error!(error = %e, "Failed to price pollution check");
        AppError::Configuration(e.to_string())
    })?;

    PollutionCheckRepository::new(Arc::clone(&state.db))
        .insert(&check)
        .await
        .map_err(|e| {
            error!(error = %e, vehicle_no = %check.vehicle_no, "Failed to store pollution check");
            AppError::Database(e.to_string())
        })
}
