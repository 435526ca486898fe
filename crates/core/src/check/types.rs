//! Check domain types.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expiry::calculate_expiry;
use crate::pricing::{PriceTable, PricingError};

/// Fuel type of a checked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    /// Petrol engine.
    Petrol,
    /// Diesel engine.
    Diesel,
}

impl FuelType {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "petrol" => Ok(Self::Petrol),
            "diesel" => Ok(Self::Diesel),
            _ => Err(format!("Unknown fuel type: {s}")),
        }
    }
}

/// Number of wheels on a checked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WheelCount {
    /// Two-wheeler.
    Two,
    /// Three-wheeler.
    Three,
    /// Four-wheeler.
    Four,
}

impl WheelCount {
    /// All wheel counts in ascending order.
    pub const ALL: [Self; 3] = [Self::Two, Self::Three, Self::Four];

    /// Returns the number of wheels.
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl From<WheelCount> for u8 {
    fn from(value: WheelCount) -> Self {
        value.count()
    }
}

impl TryFrom<u8> for WheelCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            _ => Err(format!("Unsupported wheel count: {value}")),
        }
    }
}

/// Validity period bought with a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CheckDuration {
    /// Six months.
    SixMonths,
    /// Twelve months.
    OneYear,
}

impl CheckDuration {
    /// All durations in ascending order.
    pub const ALL: [Self; 2] = [Self::SixMonths, Self::OneYear];

    /// Returns the duration in calendar months.
    #[must_use]
    pub const fn months(self) -> u8 {
        match self {
            Self::SixMonths => 6,
            Self::OneYear => 12,
        }
    }

    /// Parses the form token used by the submission form.
    #[must_use]
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "six_months" => Some(Self::SixMonths),
            "one_year" => Some(Self::OneYear),
            _ => None,
        }
    }

    /// Returns the form token for this duration.
    #[must_use]
    pub const fn form_value(self) -> &'static str {
        match self {
            Self::SixMonths => "six_months",
            Self::OneYear => "one_year",
        }
    }
}

impl From<CheckDuration> for u8 {
    fn from(value: CheckDuration) -> Self {
        value.months()
    }
}

impl TryFrom<u8> for CheckDuration {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Self::SixMonths),
            12 => Ok(Self::OneYear),
            _ => Err(format!("Unsupported duration: {value} months")),
        }
    }
}

/// A submission that passed validation but is not yet priced or dated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheck {
    /// Uppercased vehicle registration number.
    pub vehicle_no: String,
    /// Fuel type.
    pub fuel_type: FuelType,
    /// Wheel count.
    pub wheels: WheelCount,
    /// Validity period.
    pub duration: CheckDuration,
}

/// A priced and dated pollution check, ready to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollutionCheck {
    /// Uppercased vehicle registration number.
    pub vehicle_no: String,
    /// Fuel type.
    #[serde(rename = "vehicle_type")]
    pub fuel_type: FuelType,
    /// Wheel count.
    pub wheels: WheelCount,
    /// Validity period.
    #[serde(rename = "duration_months")]
    pub duration: CheckDuration,
    /// Price charged.
    pub price: Decimal,
    /// When the check was performed.
    #[serde(rename = "check_date")]
    pub checked_at: DateTime<Utc>,
    /// When the certificate lapses.
    #[serde(rename = "expiry_date")]
    pub expires_at: DateTime<Utc>,
}

impl PollutionCheck {
    /// Prices and dates a validated submission.
    ///
    /// `checked_at` should carry the local zone so that the month arithmetic
    /// happens on local calendar days; both instants are stored in UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if no price is configured for the category.
    pub fn issue<Tz: TimeZone>(
        check: ValidatedCheck,
        prices: &PriceTable,
        checked_at: &DateTime<Tz>,
    ) -> Result<Self, PricingError> {
        let price = prices.resolve(check.wheels, check.duration)?;
        let expires_at = calculate_expiry(checked_at, u32::from(check.duration.months()));

        Ok(Self {
            vehicle_no: check.vehicle_no,
            fuel_type: check.fuel_type,
            wheels: check.wheels,
            duration: check.duration,
            price,
            checked_at: checked_at.with_timezone(&Utc),
            expires_at: expires_at.with_timezone(&Utc),
        })
    }
}
