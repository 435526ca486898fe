//! Immutable price table.

use std::collections::HashMap;
use std::str::FromStr;

use puc_shared::config::PricingConfig;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::PricingError;
use crate::check::{CheckDuration, WheelCount};

/// Decimal places a stored price can hold.
const MAX_SCALE: u32 = 2;

/// Prices per (wheel count, duration) category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    prices: HashMap<(WheelCount, CheckDuration), Decimal>,
}

impl PriceTable {
    /// Builds a table from `"{wheels}w_{months}m"` keyed entries.
    ///
    /// Unknown keys, values that are not a positive decimal and values with
    /// more than two decimal places are logged and left out, so resolving
    /// them later fails like a missing entry.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut prices = HashMap::new();

        for (key, raw) in entries {
            let Some(category) = parse_key(key) else {
                warn!(key, "Ignoring unknown price key");
                continue;
            };

            match Decimal::from_str(raw.trim()) {
                Ok(price) if price.normalize().scale() > MAX_SCALE => {
                    warn!(key, %price, "Ignoring price with more than two decimal places");
                }
                Ok(price) if price > Decimal::ZERO => {
                    debug!(key, %price, "Loaded price");
                    prices.insert(category, price);
                }
                Ok(price) => {
                    warn!(key, %price, "Ignoring non-positive price");
                }
                Err(e) => {
                    warn!(key, value = raw, error = %e, "Ignoring invalid price");
                }
            }
        }

        Self { prices }
    }

    /// Builds a table from the application's pricing configuration.
    #[must_use]
    pub fn from_config(config: &PricingConfig) -> Self {
        Self::from_entries(
            config
                .prices
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        )
    }

    /// Returns the configured price for a category.
    ///
    /// A zero amount is never returned in place of a missing entry.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::ConfigurationMissing`] if the category has no usable price.
    pub fn resolve(
        &self,
        wheels: WheelCount,
        duration: CheckDuration,
    ) -> Result<Decimal, PricingError> {
        self.prices.get(&(wheels, duration)).copied().ok_or_else(|| {
            let key = Self::price_key(wheels, duration);
            warn!(key = %key, "Price configuration missing");
            PricingError::ConfigurationMissing { key }
        })
    }

    /// Returns the configuration key for a category, e.g. `3w_12m`.
    #[must_use]
    pub fn price_key(wheels: WheelCount, duration: CheckDuration) -> String {
        format!("{}w_{}m", wheels.count(), duration.months())
    }

    /// Returns the number of usable entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no price is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Returns the keys of categories with no usable price.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        WheelCount::ALL
            .into_iter()
            .flat_map(|w| CheckDuration::ALL.into_iter().map(move |d| (w, d)))
            .filter(|category| !self.prices.contains_key(category))
            .map(|(w, d)| Self::price_key(w, d))
            .collect()
    }
}

fn parse_key(key: &str) -> Option<(WheelCount, CheckDuration)> {
    let key = key.trim().to_ascii_lowercase();
    let (wheels, months) = key.strip_suffix('m')?.split_once("w_")?;
    let wheels = WheelCount::try_from(wheels.parse::<u8>().ok()?).ok()?;
    let duration = CheckDuration::try_from(months.parse::<u8>().ok()?).ok()?;
    Some((wheels, duration))
}
