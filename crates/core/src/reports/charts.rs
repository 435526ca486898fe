//! Charts drawn for a report summary.

use serde::Serialize;
use tracing::info;

use super::types::ReportSummary;
use crate::chart::{ChartImage, render_pie_chart};

const WHEEL_LABELS: [&str; 3] = ["2 Wheeler", "3 Wheeler", "4 Wheeler"];
const WHEEL_COLORS: [&str; 3] = ["#66b3ff", "#ffcc99", "#99ff99"];

const DURATION_LABELS: [&str; 2] = ["6 Months", "1 Year"];
const DURATION_COLORS: [&str; 2] = ["#ff9999", "#c2c2f0"];

const FUEL_LABELS: [&str; 2] = ["Petrol (3/4 W)", "Diesel (3/4 W)"];
const FUEL_COLORS: [&str; 2] = ["#ffb3e6", "#ffb366"];

/// Up to three pie charts for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportCharts {
    /// Checks by wheel count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheels: Option<ChartImage>,
    /// Checks by validity period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<ChartImage>,
    /// Fuel split for three- and four-wheelers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<ChartImage>,
}

impl ReportCharts {
    /// Draws the charts for a summary. An empty summary gets no charts.
    #[must_use]
    pub fn render(summary: &ReportSummary) -> Self {
        if summary.is_empty() {
            return Self::default();
        }

        let wheels = &summary.counts_by_wheel;
        let duration = &summary.counts_by_duration;
        let fuel = &summary.counts_by_fuel_3_4;

        let fuel_values = [fuel.petrol, fuel.diesel];
        let fuel_chart = if fuel_values.iter().sum::<u64>() > 0 {
            render_pie_chart(
                &fuel_values,
                &FUEL_LABELS,
                "Fuel Type (3 & 4 Wheelers)",
                Some(&FUEL_COLORS[..]),
            )
        } else {
            info!("No data for 3/4 wheeler fuel types chart");
            None
        };

        Self {
            wheels: render_pie_chart(
                &[wheels.two, wheels.three, wheels.four],
                &WHEEL_LABELS,
                "Checks by Vehicle Wheels",
                Some(&WHEEL_COLORS[..]),
            ),
            duration: render_pie_chart(
                &[duration.six_months, duration.one_year],
                &DURATION_LABELS,
                "Checks by Duration",
                Some(&DURATION_COLORS[..]),
            ),
            fuel: fuel_chart,
        }
    }

    /// Returns the number of charts drawn.
    #[must_use]
    pub fn len(&self) -> usize {
        [&self.wheels, &self.duration, &self.fuel]
            .iter()
            .filter(|chart| chart.is_some())
            .count()
    }

    /// Returns true if no chart was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
