//! Date periods for the month, year and range views

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use mxmoney_config::WeekStart;
use serde::{Deserialize, Serialize};

/// A span of calendar dates selected by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One calendar month; `month0` is 0-based
    Month { year: i32, month0: u32 },
    Year(i32),
    /// Inclusive on both ends
    Range { start: NaiveDate, end: NaiveDate },
    All,
}

impl Period {
    /// Inclusive first and last date, `None` for `All` or an invalid month
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Period::Month { year, month0 } => month_bounds(year, month0),
            Period::Year(year) => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
            Period::Range { start, end } => Some((start, end)),
            Period::All => None,
        }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        match self {
            Period::All => true,
            _ => match self.bounds() {
                Some((start, end)) => *date >= start && *date <= end,
                None => false,
            },
        }
    }

    /// Human-readable description of the period
    pub fn description(&self) -> String {
        match self {
            Period::Month { year, month0 } => format!("{:04}-{:02}", year, month0 + 1),
            Period::Year(year) => format!("{}", year),
            Period::Range { start, end } => format!("{} to {}", start, end),
            Period::All => "All Time".to_string(),
        }
    }
}

/// First and last day of a month, `None` when `month0` is out of range
pub fn month_bounds(year: i32, month0: u32) -> Option<(NaiveDate, NaiveDate)> {
    if month0 > 11 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    let next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Dates shown by a month calendar: whole weeks from the one holding
/// the 1st to the one holding the last day. `None` when the padding
/// runs past the representable dates.
pub fn calendar_range(year: i32, month0: u32, week_start: WeekStart) -> Option<(NaiveDate, NaiveDate)> {
    let (first, last) = month_bounds(year, month0)?;
    let start_day = match week_start {
        WeekStart::Sunday => Weekday::Sun,
        WeekStart::Monday => Weekday::Mon,
    };

    let lead = days_since(first.weekday(), start_day);
    let trail = 6 - days_since(last.weekday(), start_day);
    Some((
        first.checked_sub_signed(Duration::days(lead))?,
        last.checked_add_signed(Duration::days(trail))?,
    ))
}

fn days_since(day: Weekday, start: Weekday) -> i64 {
    (day.num_days_from_monday() as i64 - start.num_days_from_monday() as i64).rem_euclid(7)
}
