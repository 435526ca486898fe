//! Reporting window conversion.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;

use super::error::ReportError;

/// Date format accepted for report boundaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open UTC interval `[start, end)` covering whole local days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    /// First instant included.
    pub start: DateTime<Utc>,
    /// First instant excluded.
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// Converts inclusive local calendar dates into a UTC window.
    ///
    /// `start_date` and `end_date` are `YYYY-MM-DD` days in `timezone`. The
    /// window opens at local midnight of `start_date` and closes at local
    /// midnight of the day after `end_date`, so the end day counts in full.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRange`] if either date is malformed or the
    /// range does not run forward.
    pub fn from_local_dates<Tz: TimeZone>(
        start_date: &str,
        end_date: &str,
        timezone: &Tz,
    ) -> Result<Self, ReportError> {
        let invalid = || ReportError::InvalidRange {
            start: start_date.to_string(),
            end: end_date.to_string(),
        };

        let (Some(start_day), Some(end_day)) = (parse_date(start_date), parse_date(end_date))
        else {
            warn!(start_date, end_date, "Invalid report date format");
            return Err(invalid());
        };

        let start = local_midnight_utc(start_day, timezone);
        let end = end_day
            .succ_opt()
            .and_then(|next| local_midnight_utc(next, timezone));
        let (Some(start), Some(end)) = (start, end) else {
            warn!(start_date, end_date, "Report dates out of range for time zone");
            return Err(invalid());
        };

        if start >= end {
            warn!(start_date, end_date, "Start date is not before end date");
            return Err(invalid());
        }

        Ok(Self { start, end })
    }

    /// Returns true if `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// First instant of `day` in `timezone`, in UTC.
///
/// Where a zone skips midnight the earliest existing local time is used.
fn local_midnight_utc<Tz: TimeZone>(day: NaiveDate, timezone: &Tz) -> Option<DateTime<Utc>> {
    let midnight = day.and_time(NaiveTime::MIN);
    timezone
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            (1..=4)
                .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
                .find_map(|time| timezone.from_local_datetime(&day.and_time(time)).earliest())
        })
        .map(|local| local.with_timezone(&Utc))
}
