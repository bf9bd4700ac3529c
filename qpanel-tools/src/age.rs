use super::PanelProxy;
use chrono::{Datelike, Local, NaiveDate};
use qpanel_types::{Context, ExitStatus};

/// Tool description for the help listing
pub fn description() -> &'static str {
    "Calculate age in years, months and days from a birthdate"
}

/// Calendar age broken down the way people state it, plus the exact
/// day count between the two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i64,
    pub total_days: i64,
}

/// Age at `asof` for someone born on `birth`. Returns `None` when `asof`
/// precedes `birth`.
///
/// Negative day counts borrow from the month preceding `asof`, negative
/// month counts borrow from the years, so "1 month" always means a whole
/// calendar month regardless of its length.
pub fn calc_age(birth: NaiveDate, asof: NaiveDate) -> Option<Age> {
    if asof < birth {
        return None;
    }
    let mut years = asof.year() - birth.year();
    let mut months = asof.month() as i32 - birth.month() as i32;
    let mut days = asof.day() as i64 - birth.day() as i64;
    if days < 0 {
        months -= 1;
        let first_of_asof_month = NaiveDate::from_ymd_opt(asof.year(), asof.month(), 1)?;
        let last_of_prev_month = first_of_asof_month.pred_opt()?;
        days += last_of_prev_month.day() as i64;
    }
    if months < 0 {
        months += 12;
        years -= 1;
    }
    Some(Age {
        years,
        months,
        days,
        total_days: (asof - birth).num_days(),
    })
}

/// Render an age the way the panel displays it
pub fn format_age(age: &Age) -> String {
    format!(
        "{} years, {} months, {} days (≈ {} days)",
        age.years, age.months, age.days, age.total_days
    )
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Tool entry point
///
/// Usage:
///   age <birthdate> [as-of-date]     (dates as YYYY-MM-DD)
pub fn command(ctx: &Context, argv: Vec<String>, _proxy: &mut dyn PanelProxy) -> ExitStatus {
    if argv.len() < 2 || argv.len() > 3 {
        ctx.write_stderr("Usage: age <birthdate> [as-of-date]").ok();
        ctx.write_stderr("       dates as YYYY-MM-DD").ok();
        return ExitStatus::ExitedWith(1);
    }
    let Some(birth) = parse_date(&argv[1]) else {
        ctx.write_stderr(&format!("age: not a date: {}", argv[1])).ok();
        return ExitStatus::ExitedWith(1);
    };
    let asof = match argv.get(2) {
        Some(raw) => match parse_date(raw) {
            Some(date) => date,
            None => {
                ctx.write_stderr(&format!("age: not a date: {raw}")).ok();
                return ExitStatus::ExitedWith(1);
            }
        },
        None => Local::now().date_naive(),
    };
    match calc_age(birth, asof) {
        Some(age) => match ctx.write_stdout(&format_age(&age)) {
            Ok(_) => ExitStatus::ExitedWith(0),
            Err(err) => {
                ctx.write_stderr(&format!("age: {err}")).ok();
                ExitStatus::ExitedWith(1)
            }
        },
        None => {
            ctx.write_stderr("age: as-of date is before birthdate").ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
