//! Clock-time values that may run past midnight.
//!
//! Canon templates are authored on a single logical day, so a window that
//! ends at half past midnight is written `22:00`–`24:30`, and a window fully
//! inside the next morning is written `25:00`–`27:00`. [`ClockTime`] keeps that
//! external format but stores plain minutes, so resolving to an absolute
//! timestamp is a day offset plus a time of day.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const MINUTES_PER_DAY: u16 = 24 * 60;
const MAX_HOURS: u16 = 47;

/// Minutes since 00:00 of the base day. Values of 24:00 and above denote the
/// following calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build from hours and minutes. Only for compile-time canon values.
    pub const fn hm(hours: u16, minutes: u16) -> Self {
        Self(hours * 60 + minutes)
    }

    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes / 60 > MAX_HOURS {
            return Err(ValidationError::InvalidClockTime(format!(
                "{:02}:{:02}",
                minutes / 60,
                minutes % 60
            )));
        }
        Ok(Self(minutes))
    }

    /// Build from decimal hours (`24.5` is `24:30`), rounded to the minute.
    pub fn from_decimal_hours(hours: f64) -> Result<Self, ValidationError> {
        if !hours.is_finite() || hours < 0.0 || hours >= f64::from(MAX_HOURS + 1) {
            return Err(ValidationError::InvalidClockTime(hours.to_string()));
        }
        Self::from_minutes((hours * 60.0).round() as u16)
    }

    pub fn as_decimal_hours(self) -> f64 {
        f64::from(self.0) / 60.0
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Whole days past the base date: `floor(hours / 24)`.
    pub fn day_offset(self) -> u16 {
        self.0 / MINUTES_PER_DAY
    }

    /// Time of day in `[00:00, 24:00)`.
    pub fn normalized(self) -> NaiveTime {
        NaiveTime::MIN + Duration::minutes(i64::from(self.0 % MINUTES_PER_DAY))
    }

    /// Absolute local timestamp of this clock time relative to `date`.
    ///
    /// `None` when the day offset runs past the last representable date.
    pub fn resolve_on(self, date: NaiveDate) -> Option<NaiveDateTime> {
        let day = date.checked_add_days(Days::new(u64::from(self.day_offset())))?;
        Some(day.and_time(self.normalized()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidClockTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hours: u16 = h.parse().map_err(|_| invalid())?;
        let minutes: u16 = m.parse().map_err(|_| invalid())?;
        if hours > MAX_HOURS || minutes > 59 {
            return Err(invalid());
        }
        Ok(Self::hm(hours, minutes))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// A clock-time interval as stored in a template. `end` is always later
/// than `start`, which is what lets `end` run past 24:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct CanonTimeWindow {
    start: ClockTime,
    end: ClockTime,
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    start: ClockTime,
    end: ClockTime,
}

impl TryFrom<RawWindow> for CanonTimeWindow {
    type Error = ValidationError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        CanonTimeWindow::new(raw.start, raw.end)
    }
}

impl From<CanonTimeWindow> for RawWindow {
    fn from(w: CanonTimeWindow) -> Self {
        RawWindow {
            start: w.start,
            end: w.end,
        }
    }
}

impl CanonTimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Canon table constructor; the table's own tests check `end > start`.
    pub(crate) const fn canon(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end.minutes()) - i64::from(self.start.minutes())
    }

    /// True if any part of the window falls on the following day.
    pub fn crosses_midnight(&self) -> bool {
        self.end.day_offset() > 0
    }

    /// Absolute start and end on `date`, or `None` if either falls past
    /// the last representable date.
    pub fn resolve_on(&self, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start.resolve_on(date)?, self.end.resolve_on(date)?))
    }
}

impl fmt::Display for CanonTimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parses `HH:MM-HH:MM`.
impl FromStr for CanonTimeWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ValidationError::InvalidClockTime(s.to_string()))?;
        CanonTimeWindow::new(start.parse()?, end.parse()?)
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}
