//! Calendar time windows for scoping history queries.
//!
//! A window resolves to an inclusive `[start, end]` range of local wall-clock
//! time. `end` is always the end of the reference day (23:59:59.999) and
//! `start` is the beginning of the day the window reaches back to.
//!
//! Month arithmetic clamps to the last day of the target month, so
//! `lastMonth` from March 31 starts on the last day of February.

use crate::Error;
use chrono::{DateTime, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named relative time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    LastWeek,
    LastMonth,
    LastYear,
}

/// Inclusive range of local wall-clock instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl TimeWindow {
    pub fn name(self) -> &'static str {
        match self {
            TimeWindow::LastWeek => "lastWeek",
            TimeWindow::LastMonth => "lastMonth",
            TimeWindow::LastYear => "lastYear",
        }
    }

    /// Resolve the window relative to `now`.
    pub fn resolve(self, now: NaiveDateTime) -> TimeRange {
        let today = now.date();
        let first_day = match self {
            TimeWindow::LastWeek => today.checked_sub_days(Days::new(6)),
            TimeWindow::LastMonth => today.checked_sub_months(Months::new(1)),
            TimeWindow::LastYear => today.checked_sub_months(Months::new(12)),
        }
        .unwrap_or(NaiveDate::MIN);

        TimeRange {
            start: start_of_day(first_day),
            end: end_of_day(today),
        }
    }

    /// Resolve the window relative to a local clock reading.
    pub fn resolve_local(self, now: DateTime<Local>) -> TimeRange {
        self.resolve(now.naive_local())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lastWeek" => Ok(TimeWindow::LastWeek),
            "lastMonth" => Ok(TimeWindow::LastMonth),
            "lastYear" => Ok(TimeWindow::LastYear),
            other => Err(Error::UnknownWindow(other.to_string())),
        }
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.succ_opt()
        .map(|next| start_of_day(next) - TimeDelta::milliseconds(1))
        .unwrap_or(NaiveDateTime::MAX)
}
