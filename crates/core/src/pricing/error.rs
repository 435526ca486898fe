//! Pricing error types.

use thiserror::Error;

/// Errors that can occur while resolving a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// No usable price is configured for the category.
    #[error("Price configuration missing or invalid for key: {key}")]
    ConfigurationMissing {
        /// Configuration key, e.g. `2w_6m`.
        key: String,
    },
}
