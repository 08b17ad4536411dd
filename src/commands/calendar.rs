//! NFL calendar arithmetic.
//!
//! Weeks are counted in whole weeks since the configured season start, on US
//! Eastern calendar dates (`America/New_York`).

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::{America::New_York, Tz};

use crate::gateway::Season;

/// Season start and length used to number NFL weeks.
#[derive(Debug, Clone)]
pub struct NflCalendar {
    /// Date of week 1 kick-off (Eastern)
    season_start: NaiveDate,
    /// Highest week number of the regular season
    last_week: i64,
}

impl NflCalendar {
    pub fn new(season_start: NaiveDate, last_week: i64) -> Self {
        NflCalendar {
            season_start,
            last_week,
        }
    }

    /// Current NFL week: 0 before the season starts, capped at the last week.
    pub fn current_week(&self, now: DateTime<Utc>) -> i64 {
        let today = to_eastern(now).date_naive();
        if today < self.season_start {
            return 0;
        }

        let weeks = (today - self.season_start).num_days() / 7 + 1;
        weeks.min(self.last_week)
    }

    /// Week a game belongs to, 0 when its kick-off is unknown.
    ///
    /// Whole weeks are truncated toward zero, so the days just before the
    /// season start still count as week 1.
    pub fn week_of(&self, commence_time: Option<DateTime<Utc>>) -> i64 {
        let Some(commence_time) = commence_time else {
            return 0;
        };

        let day = to_eastern(commence_time).date_naive();
        (day - self.season_start).num_days() / 7 + 1
    }
}

/// Where a season stands relative to the current NFL week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonStatus {
    Upcoming,
    Active,
    Completed,
}

impl SeasonStatus {
    pub fn of(season: &Season, current_week: i64) -> Self {
        if current_week < season.start_week {
            SeasonStatus::Upcoming
        } else if current_week > season.end_week {
            SeasonStatus::Completed
        } else {
            SeasonStatus::Active
        }
    }

    /// Percentage of the season elapsed, for active seasons only.
    pub fn progress(season: &Season, current_week: i64) -> Option<i64> {
        match Self::of(season, current_week) {
            SeasonStatus::Active => {
                Some((current_week - season.start_week + 1) * 100 / season.duration_weeks())
            }
            _ => None,
        }
    }
}

impl fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            SeasonStatus::Upcoming => "Upcoming",
            SeasonStatus::Active => "Active",
            SeasonStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Converts `at` to US Eastern time.
pub fn to_eastern(at: DateTime<Utc>) -> DateTime<Tz> {
    at.with_timezone(&New_York)
}

/// Kick-off time, e.g. `Sunday, September 8 2024, 13:00 EDT`.
pub fn format_kickoff(at: DateTime<Utc>) -> String {
    to_eastern(at)
        .format("%A, %B %-d %Y, %H:%M %Z")
        .to_string()
}

/// Calendar date, e.g. `September 1, 2024`.
pub fn format_day(at: DateTime<Utc>) -> String {
    to_eastern(at).format("%B %-d, %Y").to_string()
}
