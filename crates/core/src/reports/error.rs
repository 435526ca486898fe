//! Report error types.

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Dates are malformed or do not form a forward range.
    #[error("Invalid date range: {start} to {end}")]
    InvalidRange {
        /// Start date as submitted.
        start: String,
        /// End date as submitted.
        end: String,
    },
}
