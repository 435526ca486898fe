//! Report types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Checks per wheel count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelCounts {
    /// Two-wheelers.
    #[serde(rename = "2")]
    pub two: u64,
    /// Three-wheelers.
    #[serde(rename = "3")]
    pub three: u64,
    /// Four-wheelers.
    #[serde(rename = "4")]
    pub four: u64,
}

/// Checks per validity period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationCounts {
    /// Six-month checks.
    #[serde(rename = "6")]
    pub six_months: u64,
    /// Twelve-month checks.
    #[serde(rename = "12")]
    pub one_year: u64,
}

/// Checks per fuel type, three- and four-wheelers only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelCounts {
    /// Petrol vehicles.
    pub petrol: u64,
    /// Diesel vehicles.
    pub diesel: u64,
}

/// Aggregate figures for the checks in a report window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of checks.
    pub total_checks: u64,
    /// Sum of prices.
    pub total_sales: Decimal,
    /// Checks per wheel count.
    pub counts_by_wheel: WheelCounts,
    /// Checks per validity period.
    pub counts_by_duration: DurationCounts,
    /// Checks per fuel type for vehicles with more than two wheels.
    pub counts_by_fuel_3_4: FuelCounts,
}

impl ReportSummary {
    /// Returns true if no check fell in the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_checks == 0
    }
}
