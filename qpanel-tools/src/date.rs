use super::PanelProxy;
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use qpanel_types::{Context, ExitStatus};
use tracing::debug;

/// Tool description for the help listing
pub fn description() -> &'static str {
    "Find the weekday, day of year and ISO week of a date, with an optional day offset"
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full English weekday name, Sunday-first
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// 1-based day of year
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// ISO-8601 week number (the year boundary weeks belong to the year
/// holding their Thursday)
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Calendar offset by a signed number of days
pub fn offset_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    if offset >= 0 {
        date.checked_add_days(Days::new(offset as u64))
    } else {
        date.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// The detail lines shown for a date lookup
pub fn detail_lines(start: NaiveDate, offset: i64, result: NaiveDate) -> Vec<String> {
    vec![
        format!("Start Date: {}", start.format("%B %-d, %Y")),
        format!("Offset days: {offset}"),
        format!("Result Date: {}", result.format("%A, %B %-d, %Y")),
        format!("Weekday: {}", weekday_name(result)),
        format!("Day of Year: {}", day_of_year(result)),
        format!("ISO Week: {}", iso_week(result)),
        format!("Weekend: {}", if is_weekend(result) { "Yes" } else { "No" }),
    ]
}

/// Tool entry point
///
/// Usage:
///   date [YYYY-MM-DD] [offset-days]
pub fn command(ctx: &Context, argv: Vec<String>, _proxy: &mut dyn PanelProxy) -> ExitStatus {
    if argv.len() > 3 {
        ctx.write_stderr("Usage: date [YYYY-MM-DD] [offset-days]").ok();
        return ExitStatus::ExitedWith(1);
    }
    let start = match argv.get(1) {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(err) => {
                debug!("date parse failed for {raw}: {err}");
                ctx.write_stderr(&format!("date: not a date: {raw}")).ok();
                return ExitStatus::ExitedWith(1);
            }
        },
        None => Local::now().date_naive(),
    };
    let offset: i64 = match argv.get(2) {
        Some(raw) => match raw.parse() {
            Ok(offset) => offset,
            Err(_) => {
                ctx.write_stderr(&format!("date: not a day offset: {raw}")).ok();
                return ExitStatus::ExitedWith(1);
            }
        },
        None => 0,
    };
    let Some(result) = offset_days(start, offset) else {
        ctx.write_stderr("date: offset leaves the supported calendar range")
            .ok();
        return ExitStatus::ExitedWith(1);
    };
    let mut lines = vec![weekday_name(result).to_string()];
    lines.extend(detail_lines(start, offset, result));
    match ctx.write_stdout(&lines.join("\n")) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(err) => {
            ctx.write_stderr(&format!("date: {err}")).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(date(2024, 1, 1)), "Monday");
        assert_eq!(weekday_name(date(2024, 6, 15)), "Saturday");
        assert_eq!(weekday_name(date(2024, 6, 16)), "Sunday");
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(date(2024, 1, 1)), 1);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366); // leap year
        assert_eq!(day_of_year(date(2023, 12, 31)), 365);
        assert_eq!(day_of_year(date(2024, 3, 1)), 61);
    }

    #[test]
    fn test_iso_week_year_boundary() {
        // 2021-01-01 is a Friday, its week belongs to 2020
        assert_eq!(iso_week(date(2021, 1, 1)), 53);
        assert_eq!(iso_week(date(2021, 1, 4)), 1);
        // 2024-12-30 is a Monday of week 1 of 2025
        assert_eq!(iso_week(date(2024, 12, 30)), 1);
        assert_eq!(iso_week(date(2024, 6, 15)), 24);
    }

    #[test]
    fn test_offset_days() {
        assert_eq!(offset_days(date(2024, 1, 31), 1), Some(date(2024, 2, 1)));
        assert_eq!(offset_days(date(2024, 3, 1), -1), Some(date(2024, 2, 29)));
        assert_eq!(offset_days(date(2024, 12, 25), 10), Some(date(2025, 1, 4)));
        assert_eq!(offset_days(date(2024, 1, 1), -366), Some(date(2023, 1, 1)));
        assert_eq!(offset_days(date(2024, 6, 15), 0), Some(date(2024, 6, 15)));
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2024, 6, 15))); // Saturday
        assert!(is_weekend(date(2024, 6, 16))); // Sunday
        assert!(!is_weekend(date(2024, 6, 17))); // Monday
    }

    #[test]
    fn test_detail_lines() {
        let start = date(2025, 1, 30);
        let result = offset_days(start, 10).unwrap();
        let lines = detail_lines(start, 10, result);
        assert_eq!(lines[0], "Start Date: January 30, 2025");
        assert_eq!(lines[1], "Offset days: 10");
        assert_eq!(lines[2], "Result Date: Sunday, February 9, 2025");
        assert_eq!(lines[3], "Weekday: Sunday");
        assert_eq!(lines[4], "Day of Year: 40");
        assert_eq!(lines[5], "ISO Week: 6");
        assert_eq!(lines[6], "Weekend: Yes");
    }
}
