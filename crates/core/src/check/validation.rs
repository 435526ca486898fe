//! Validation of submitted check forms.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::types::{CheckDuration, FuelType, ValidatedCheck, WheelCount};

/// Raw check submission, as a form posts it.
///
/// Every field is optional so that a partial submission can be echoed back
/// to the caller together with the validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckForm {
    /// Vehicle registration number.
    #[serde(default, deserialize_with = "lenient_text")]
    pub vehicle_no: Option<String>,
    /// `petrol` or `diesel`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub vehicle_type: Option<String>,
    /// Wheel count.
    #[serde(default, deserialize_with = "lenient_text")]
    pub wheels: Option<String>,
    /// `six_months` or `one_year`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
}

/// All problems found in a submission, in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join(" "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    /// Returns the individual messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

const VEHICLE_NO_REQUIRED: &str = "Vehicle Number is required.";
const INVALID_FUEL: &str = "Invalid Vehicle Fuel Type selected.";
const INVALID_WHEELS: &str = "Invalid Number of Wheels selected.";
const WHEELS_NOT_NUMBER: &str = "Number of Wheels must be a number (2, 3, or 4).";
const WHEELS_OUT_OF_RANGE: &str = "Wheels must be 2, 3, or 4.";
const INVALID_DURATION: &str = "Invalid Duration Period selected.";
const TWO_WHEEL_DIESEL: &str = "2-Wheelers cannot be Diesel type.";

impl CheckForm {
    /// Validates the submission, collecting every problem rather than
    /// stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in the order checked.
    pub fn validate(&self) -> Result<ValidatedCheck, ValidationErrors> {
        let mut errors = Vec::new();

        let vehicle_no = self
            .vehicle_no
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_uppercase();
        if vehicle_no.is_empty() {
            errors.push(VEHICLE_NO_REQUIRED.to_string());
        }

        let fuel_type = self
            .vehicle_type
            .as_deref()
            .and_then(|v| v.trim().parse::<FuelType>().ok());
        if fuel_type.is_none() {
            errors.push(INVALID_FUEL.to_string());
        }

        let wheels_raw = self
            .wheels
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty());
        let wheels_digits = wheels_raw.filter(|raw| raw.chars().all(|c| c.is_ascii_digit()));
        if wheels_digits.is_none() {
            errors.push(INVALID_WHEELS.to_string());
        }

        let duration = self
            .duration
            .as_deref()
            .and_then(|d| CheckDuration::from_form_value(d.trim()));
        if duration.is_none() {
            errors.push(INVALID_DURATION.to_string());
        }

        // Range and fuel compatibility only apply to a numeric wheel count.
        let wheels = match (wheels_raw, wheels_digits) {
            (_, Some(digits)) => {
                let wheels = digits
                    .parse::<u8>()
                    .ok()
                    .and_then(|n| WheelCount::try_from(n).ok());
                if wheels.is_none() {
                    errors.push(WHEELS_OUT_OF_RANGE.to_string());
                }
                if wheels == Some(WheelCount::Two) && fuel_type == Some(FuelType::Diesel) {
                    errors.push(TWO_WHEEL_DIESEL.to_string());
                }
                wheels
            }
            (Some(_), None) => {
                errors.push(WHEELS_NOT_NUMBER.to_string());
                None
            }
            (None, None) => None,
        };

        match (fuel_type, wheels, duration) {
            (Some(fuel_type), Some(wheels), Some(duration)) if errors.is_empty() => {
                Ok(ValidatedCheck {
                    vehicle_no,
                    fuel_type,
                    wheels,
                    duration,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

/// Reads any scalar as text so that a wrongly typed field fails validation
/// with a message instead of failing to parse. Arrays and objects read as
/// an empty value.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
        Flag(bool),
        Other(IgnoredAny),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(number) => number.to_string(),
        Raw::Float(number) => number.to_string(),
        Raw::Flag(flag) => flag.to_string(),
        Raw::Other(_) => String::new(),
    }))
}
