//! Reporting windows for logged-time rollups

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporting window keyword accepted by the client reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    #[default]
    Week,
    LastWeek,
    Month,
    Year,
}

/// Inclusive date interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Whether `date` falls inside the interval, both ends included
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

impl TimeFrame {
    /// Parse a keyword; anything unknown falls back to `Week`
    pub fn parse_or_default(keyword: Option<&str>) -> Self {
        match keyword.map(str::trim) {
            Some("last_week") => Self::LastWeek,
            Some("month") => Self::Month,
            Some("year") => Self::Year,
            _ => Self::Week,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::LastWeek => "last_week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Resolve the window containing `today`
    ///
    /// Weeks start on Monday. Month and year windows follow the calendar.
    pub fn range(self, today: NaiveDate) -> DateRange {
        match self {
            Self::Week => week_of(today),
            Self::LastWeek => {
                let this_week = week_of(today);
                let from = this_week.from - Days::new(7);
                DateRange::new(from, this_week.from - Days::new(1))
            }
            Self::Month => {
                let from = today.with_day(1).unwrap_or(today);
                DateRange::new(from, last_day_of_month(today.year(), today.month()))
            }
            Self::Year => {
                let from = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let to = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                DateRange::new(from, to)
            }
        }
    }
}

fn week_of(date: NaiveDate) -> DateRange {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let from = date - Days::new(offset);
    DateRange::new(from, from + Days::new(6))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
