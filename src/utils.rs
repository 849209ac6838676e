// Utility functions
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Converts a unix timestamp into the calendar date at the exchange, if possible.
pub fn exchange_date(timestamp: i64, gmt_offset: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(timestamp.checked_add(gmt_offset)?, 0).map(|dt| dt.date_naive())
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first_of_next| first_of_next - Duration::days(1))
        .unwrap_or(NaiveDate::MAX)
}

/// Month end of the month following the one containing `date`, or `None`
/// past the last representable date.
pub fn next_month_end(date: NaiveDate) -> Option<NaiveDate> {
    month_end(date)
        .checked_add_signed(Duration::days(1))
        .map(month_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_date_applies_offset() {
        // 2024-03-01 20:00:00 UTC is already 2024-03-02 in Kolkata (+05:30)
        let ts = 1_709_323_200;
        assert_eq!(exchange_date(ts, 0), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(exchange_date(ts, 19_800), NaiveDate::from_ymd_opt(2024, 3, 2));
    }

    #[test]
    fn month_end_handles_leap_years_and_december() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(month_end(d(2024, 2, 10)), d(2024, 2, 29));
        assert_eq!(month_end(d(2023, 2, 28)), d(2023, 2, 28));
        assert_eq!(month_end(d(2023, 12, 1)), d(2023, 12, 31));
        assert_eq!(next_month_end(d(2023, 12, 31)), Some(d(2024, 1, 31)));
        assert_eq!(next_month_end(d(2024, 1, 31)), Some(d(2024, 2, 29)));
    }

    #[test]
    fn next_month_end_stops_at_last_date() {
        assert_eq!(month_end(NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(next_month_end(NaiveDate::MAX), None);
    }
}
