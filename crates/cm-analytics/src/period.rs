//! Analysis periods and calendar-month windows

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Analysis period for time-series queries, ending "today".
///
/// The only string enum this core parses; unrecognized values fall back
/// to [`AnalysisPeriod::Last6Months`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    #[serde(rename = "last-month")]
    LastMonth,
    #[serde(rename = "last-3-months")]
    Last3Months,
    #[default]
    #[serde(rename = "last-6-months")]
    Last6Months,
    #[serde(rename = "last-year")]
    LastYear,
}

impl AnalysisPeriod {
    /// Parse a period string, defaulting on anything unrecognized.
    pub fn parse(value: &str) -> Self {
        match value {
            "last-month" => AnalysisPeriod::LastMonth,
            "last-3-months" => AnalysisPeriod::Last3Months,
            "last-year" => AnalysisPeriod::LastYear,
            _ => AnalysisPeriod::Last6Months,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPeriod::LastMonth => "last-month",
            AnalysisPeriod::Last3Months => "last-3-months",
            AnalysisPeriod::Last6Months => "last-6-months",
            AnalysisPeriod::LastYear => "last-year",
        }
    }

    fn months(&self) -> u32 {
        match self {
            AnalysisPeriod::LastMonth => 1,
            AnalysisPeriod::Last3Months => 3,
            AnalysisPeriod::Last6Months => 6,
            AnalysisPeriod::LastYear => 12,
        }
    }

    /// First date of the period when it ends at `end`.
    pub fn start_date(&self, end: NaiveDate) -> NaiveDate {
        end.checked_sub_months(Months::new(self.months())).unwrap_or(end)
    }
}

/// One calendar month inside an analysis period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// First day of the month
    pub start: NaiveDate,
    /// Last day of the month
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Short month label ("Jan", "Feb", ...)
    pub fn label(&self) -> String {
        self.start.format("%b").to_string()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

/// The calendar months touched by `[from, to]`, in order. Adjacent
/// windows never share a day.
pub fn month_windows(from: NaiveDate, to: NaiveDate) -> Vec<MonthWindow> {
    let mut windows = Vec::new();
    let mut cursor = first_of_month(from);
    let stop = first_of_month(to);

    while cursor <= stop {
        windows.push(MonthWindow {
            start: cursor,
            end: last_of_month(cursor),
        });
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    windows
}
