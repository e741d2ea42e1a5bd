//! Time-of-day and weekday primitives.
//!
//! All times are whole seconds since midnight. Nothing wraps past midnight:
//! a value at or beyond 24:00 is representable but never valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_DAY: u32 = 24 * 60 * SECONDS_PER_MINUTE;

/// A time of day with second precision, displayed as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub const fn from_hm(hour: u32, minute: u32) -> Self {
        Self((hour * 60 + minute) * SECONDS_PER_MINUTE)
    }

    pub const fn seconds(self) -> u32 {
        self.0
    }

    /// Whole minutes since midnight, truncating any seconds.
    pub const fn minute_of_day(self) -> u32 {
        self.0 / SECONDS_PER_MINUTE
    }

    /// True when the time lies in `00:00..=23:59:59`.
    pub const fn is_valid(self) -> bool {
        self.0 < SECONDS_PER_DAY
    }

    /// Advance by a (possibly fractional) number of minutes, rounded to the second.
    ///
    /// Non-positive deltas leave the time unchanged. Deltas too large for the
    /// clock, including infinity and NaN, saturate far past midnight so the
    /// result is never valid.
    pub fn add_minutes(self, minutes: f64) -> Self {
        let delta = (minutes * SECONDS_PER_MINUTE as f64).round();
        if delta <= 0.0 {
            return self;
        }
        let delta = if delta.is_nan() || delta >= u32::MAX as f64 {
            u32::MAX
        } else {
            delta as u32
        };
        Self(self.0.saturating_add(delta))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.minute_of_day();
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_time(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_time(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Validate a strict `HH:MM` string (hour 00-23, minute 00-59) and parse it.
///
/// Anything else, including `"24:00"`, `"9:30"` or surrounding whitespace,
/// is rejected with [`PlannerError::InvalidTime`].
pub fn validate_time(value: &str) -> Result<ClockTime, PlannerError> {
    let invalid = || PlannerError::InvalidTime(value.to_string());

    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }

    let digit = |b: u8| b.is_ascii_digit().then(|| u32::from(b - b'0'));
    let (Some(h1), Some(h2), Some(m1), Some(m2)) =
        (digit(bytes[0]), digit(bytes[1]), digit(bytes[3]), digit(bytes[4]))
    else {
        return Err(invalid());
    };

    let hour = h1 * 10 + h2;
    let minute = m1 * 10 + m2;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(ClockTime::from_hm(hour, minute))
}

/// Inclusive time-of-day range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, PlannerError> {
        if start > end {
            return Err(PlannerError::InvalidWindow(format!("{start}-{end}")));
        }
        Ok(Self { start, end })
    }

    /// Parse `"HH:MM-HH:MM"`.
    pub fn parse(value: &str) -> Result<Self, PlannerError> {
        let (start, end) = value
            .split_once('-')
            .ok_or_else(|| PlannerError::InvalidWindow(value.to_string()))?;
        let start = validate_time(start.trim())?;
        let end = validate_time(end.trim())?;
        Self::new(start, end).map_err(|_| PlannerError::InvalidWindow(value.to_string()))
    }

    /// Second-precision containment, both ends inclusive.
    pub fn contains(&self, time: ClockTime) -> bool {
        self.start <= time && time <= self.end
    }

    /// Minute-precision containment: `time` is truncated to `HH:MM` first.
    pub fn contains_minute(&self, time: ClockTime) -> bool {
        let minute = time.minute_of_day();
        self.start.minute_of_day() <= minute && minute <= self.end.minute_of_day()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Scheduling order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_weekend(self) -> bool {
        matches!(self, Weekday::Sat | Weekday::Sun)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| PlannerError::UnknownWeekday(s.to_string()))
    }
}

/// A set of weekdays stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct Weekdays(u8);

impl Weekdays {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |day| self.contains(*day))
    }

    /// Parse a comma-separated list such as `"Mon, Thu"`. Blank entries are skipped.
    pub fn parse_list(value: &str) -> Result<Self, PlannerError> {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Weekday::from_str)
            .collect()
    }
}

impl FromIterator<Weekday> for Weekdays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Weekdays::empty();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl From<Vec<Weekday>> for Weekdays {
    fn from(value: Vec<Weekday>) -> Self {
        value.into_iter().collect()
    }
}

impl From<Weekdays> for Vec<Weekday> {
    fn from(value: Weekdays) -> Self {
        value.iter().collect()
    }
}

/// Allowed hours and visit cap for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPolicy {
    pub allowed: TimeWindow,
    pub max_visits: usize,
}

impl DayPolicy {
    pub const WEEKDAY: DayPolicy = DayPolicy {
        allowed: TimeWindow {
            start: ClockTime::from_hm(18, 0),
            end: ClockTime::from_hm(21, 0),
        },
        max_visits: 2,
    };

    pub const WEEKEND: DayPolicy = DayPolicy {
        allowed: TimeWindow {
            start: ClockTime::from_hm(10, 0),
            end: ClockTime::from_hm(21, 0),
        },
        max_visits: 3,
    };

    pub const fn for_day(day: Weekday) -> DayPolicy {
        if day.is_weekend() {
            Self::WEEKEND
        } else {
            Self::WEEKDAY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_full_range() {
        assert_eq!(validate_time("00:00").unwrap(), ClockTime::from_hm(0, 0));
        assert_eq!(validate_time("23:59").unwrap(), ClockTime::from_hm(23, 59));
        assert_eq!(validate_time("18:30").unwrap().minute_of_day(), 18 * 60 + 30);
    }

    #[test]
    fn test_validate_rejects_malformed() {
        for bad in ["24:00", "9:30", "abc", "12:60", "", "12:3a", " 12:30", "12-30", "123:00"] {
            let err = validate_time(bad).unwrap_err();
            assert!(err.is_validation(), "{bad} should be a validation error");
        }
    }

    #[test]
    fn test_display_truncates_seconds() {
        let t = ClockTime::from_hm(18, 0).add_minutes(15.9);
        assert_eq!(t.seconds(), 18 * 3600 + 954);
        assert_eq!(t.to_string(), "18:15");
    }

    #[test]
    fn test_add_minutes_does_not_wrap() {
        let t = ClockTime::from_hm(23, 30).add_minutes(60.0);
        assert!(!t.is_valid());
        assert!(t > ClockTime::from_hm(23, 59));
    }

    #[test]
    fn test_add_minutes_saturates_huge_deltas() {
        let start = ClockTime::from_hm(19, 0);
        for minutes in [1e308, f64::INFINITY, f64::NAN, 1e12] {
            let t = start.add_minutes(minutes);
            assert!(!t.is_valid(), "{minutes} minutes should land past midnight");
            assert_eq!(t.seconds(), u32::MAX);
        }
        assert_eq!(start.add_minutes(-5.0), start);
        assert_eq!(start.add_minutes(f64::NEG_INFINITY), start);
        assert_eq!(start.add_minutes(0.0), start);
    }

    #[test]
    fn test_window_parse_and_contains() {
        let window = TimeWindow::parse("18:00-20:00").unwrap();
        assert!(window.contains(ClockTime::from_hm(18, 0)));
        assert!(window.contains(ClockTime::from_hm(20, 0)));
        assert!(!window.contains(ClockTime::from_hm(20, 0).add_minutes(0.5)));
        assert!(window.contains_minute(ClockTime::from_hm(20, 0).add_minutes(0.5)));
        assert!(!window.contains(ClockTime::from_hm(21, 0)));
    }

    #[test]
    fn test_window_rejects_reversed() {
        assert!(matches!(TimeWindow::parse("20:00-18:00"), Err(PlannerError::InvalidWindow(_))));
        assert!(matches!(TimeWindow::parse("18:00"), Err(PlannerError::InvalidWindow(_))));
        assert!(matches!(TimeWindow::parse("18:00-25:00"), Err(PlannerError::InvalidTime(_))));
    }

    #[test]
    fn test_weekdays_parse_list() {
        let days = Weekdays::parse_list("Mon, Thu,Sat").unwrap();
        assert!(days.contains(Weekday::Mon));
        assert!(days.contains(Weekday::Thu));
        assert!(days.contains(Weekday::Sat));
        assert!(!days.contains(Weekday::Sun));
        assert_eq!(days.iter().count(), 3);

        assert!(matches!(
            Weekdays::parse_list("Mon, Funday"),
            Err(PlannerError::UnknownWeekday(_))
        ));
    }

    #[test]
    fn test_day_policy() {
        assert_eq!(DayPolicy::for_day(Weekday::Tue).max_visits, 2);
        assert_eq!(DayPolicy::for_day(Weekday::Sun).max_visits, 3);
        assert_eq!(DayPolicy::for_day(Weekday::Sat).allowed.start.to_string(), "10:00");
        assert_eq!(DayPolicy::for_day(Weekday::Fri).allowed.start.to_string(), "18:00");
        assert_eq!(DayPolicy::for_day(Weekday::Fri).allowed.end.to_string(), "21:00");
    }

    #[test]
    fn test_clock_time_serde_as_string() {
        let json = serde_json::to_string(&ClockTime::from_hm(9, 5)).unwrap();
        assert_eq!(json, "\"09:05\"");
        let parsed: ClockTime = serde_json::from_str("\"21:00\"").unwrap();
        assert_eq!(parsed, ClockTime::from_hm(21, 0));
        assert!(serde_json::from_str::<ClockTime>("\"24:00\"").is_err());
    }
}
