//! Calendar-month expiry calculation.
//!
//! Adding months keeps the wall-clock time and clamps the day to the end of
//! the target month: Jan 31 + 1 month is Feb 29 in a leap year, Feb 28
//! otherwise, never Mar 2 or Mar 3.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, Offset, TimeDelta, TimeZone};
use tracing::{error, warn};

/// Days added per month when the calendar calculation cannot be completed.
const FALLBACK_DAYS_PER_MONTH: i64 = 30;

/// Returns the instant `months` calendar months after `checked_at`.
///
/// Hour, minute, second, sub-second and the zone of `checked_at` are kept.
/// If the target local time cannot be represented in the zone, falls back
/// to adding `months * 30` days.
pub fn calculate_expiry<Tz: TimeZone>(checked_at: &DateTime<Tz>, months: u32) -> DateTime<Tz> {
    if let Some(expiry) = add_calendar_months(checked_at, months) {
        return expiry;
    }

    warn!(
        checked_at = %checked_at.naive_local(),
        months,
        "Calendar expiry failed, falling back to fixed-length months"
    );
    let fallback = TimeDelta::days(i64::from(months) * FALLBACK_DAYS_PER_MONTH);
    checked_at
        .clone()
        .checked_add_signed(fallback)
        .unwrap_or_else(|| {
            error!(months, "Expiry out of range, keeping check time");
            checked_at.clone()
        })
}

/// Returns the number of days in `month` of `year`.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

fn add_calendar_months<Tz: TimeZone>(
    checked_at: &DateTime<Tz>,
    months: u32,
) -> Option<DateTime<Tz>> {
    let local = checked_at.naive_local();

    let month_index = i64::from(local.month0()) + i64::from(months);
    let year = i64::from(local.year()) + month_index.div_euclid(12);
    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;

    let day = local.day().min(days_in_month(year, month)?);
    let target = NaiveDate::from_ymd_opt(year, month, day)?.and_time(local.time());

    let timezone = checked_at.timezone();
    match timezone.from_local_datetime(&target) {
        LocalResult::Single(expiry) => Some(expiry),
        LocalResult::Ambiguous(first, second) => {
            let original = checked_at.offset().fix();
            if second.offset().fix() == original {
                Some(second)
            } else {
                Some(first)
            }
        }
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};
    use proptest::prelude::*;
    use rstest::rstest;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    fn at(date: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(date).unwrap()
    }

    #[rstest]
    #[case("2024-01-31T10:00:00+05:30", 1, "2024-02-29T10:00:00+05:30")]
    #[case("2023-01-31T10:00:00+05:30", 1, "2023-02-28T10:00:00+05:30")]
    #[case("2024-03-31T10:00:00+05:30", 1, "2024-04-30T10:00:00+05:30")]
    #[case("2024-08-31T23:59:59+05:30", 6, "2025-02-28T23:59:59+05:30")]
    #[case("2023-08-31T08:15:00+05:30", 6, "2024-02-29T08:15:00+05:30")]
    #[case("2024-02-29T12:00:00+05:30", 12, "2025-02-28T12:00:00+05:30")]
    #[case("2024-07-15T09:30:00+05:30", 6, "2025-01-15T09:30:00+05:30")]
    #[case("2024-12-31T00:00:00+05:30", 12, "2025-12-31T00:00:00+05:30")]
    #[case("2024-06-30T18:45:00+05:30", 6, "2024-12-30T18:45:00+05:30")]
    fn test_calculate_expiry_clamps_to_month_end(
        #[case] checked_at: &str,
        #[case] months: u32,
        #[case] expected: &str,
    ) {
        let expiry = calculate_expiry(&at(checked_at), months);
        assert_eq!(expiry, at(expected));
        assert_eq!(expiry.offset(), &ist());
    }

    #[test]
    fn test_calculate_expiry_preserves_sub_second_precision() {
        let checked_at = ist()
            .with_ymd_and_hms(2024, 1, 31, 10, 0, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();

        let expiry = calculate_expiry(&checked_at, 1);

        assert_eq!(expiry.nanosecond(), 123_456_789);
        assert_eq!(expiry.naive_local().date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_calculate_expiry_in_named_zone() {
        let checked_at = chrono_tz::Asia::Kolkata
            .with_ymd_and_hms(2024, 1, 31, 10, 0, 0)
            .unwrap();

        let expiry = calculate_expiry(&checked_at, 1);

        assert_eq!(
            expiry.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 2, 29, 4, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_calculate_expiry_falls_back_when_local_time_does_not_exist() {
        // 02:30 on 2024-03-10 is skipped by the US spring-forward transition.
        let checked_at = chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 2, 10, 2, 30, 0)
            .unwrap();

        let expiry = calculate_expiry(&checked_at, 1);

        assert_eq!(expiry, checked_at + TimeDelta::days(30));
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(1900, 2, 28)]
    #[case(2000, 2, 29)]
    #[case(2024, 4, 30)]
    #[case(2024, 12, 31)]
    #[case(2024, 1, 31)]
    fn test_days_in_month(#[case] year: i32, #[case] month: u32, #[case] days: u32) {
        assert_eq!(days_in_month(year, month), Some(days));
    }

    #[test]
    fn test_days_in_month_rejects_invalid_month() {
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 99), None);
    }

    proptest! {
        /// Expiry is later than the check, keeps the time of day and
        /// lands in the expected calendar month.
        #[test]
        fn prop_expiry_is_later_and_keeps_wall_clock(
            days_from_epoch in 0i64..40_000,
            seconds in 0u32..86_400,
            months in prop_oneof![Just(6u32), Just(12u32), 1u32..36],
        ) {
            let date =
                NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + TimeDelta::days(days_from_epoch);
            let time = chrono::NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap();
            let checked_at = ist().from_local_datetime(&date.and_time(time)).unwrap();

            let expiry = calculate_expiry(&checked_at, months);

            prop_assert!(expiry > checked_at);
            prop_assert_eq!(expiry.time(), checked_at.time());
            prop_assert_eq!(expiry.offset(), checked_at.offset());

            let elapsed_months = (expiry.year() - checked_at.year()) * 12
                + i32::try_from(expiry.month()).unwrap()
                - i32::try_from(checked_at.month()).unwrap();
            prop_assert_eq!(elapsed_months, i32::try_from(months).unwrap());
            prop_assert!(expiry.day() <= checked_at.day());
        }
    }
}
