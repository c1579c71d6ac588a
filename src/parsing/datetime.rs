//! Date-section headers and 12-hour clock resolution.
//!
//! KakaoTalk transcripts only stamp messages with a time of day
//! (`오후 3:45`). The calendar date comes from section headers interleaved in
//! the transcript:
//!
//! | Header | Meaning |
//! |--------|---------|
//! | `2024년 1월 15일 월요일` | absolute date (trailing text ignored) |
//! | `1월 15일` | month/day in the current year |
//! | `오늘` / `어제` / `그저께` | today / yesterday / the day before |
//!
//! Each header yields midnight of its day; that value becomes the date
//! cursor for every timestamped line until the next header.

use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

static FULL_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})년\s*(\d{1,2})월\s*(\d{1,2})일\s*(.*)$").expect("valid full date regex")
});

static MONTH_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})월\s*(\d{1,2})일\s*(.*)$").expect("valid month/day regex")
});

/// Half of the day a 12-hour reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// 오전
    Am,
    /// 오후
    Pm,
}

impl Meridiem {
    /// Parses the marker as written in transcripts.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim() {
            "오전" => Some(Meridiem::Am),
            "오후" => Some(Meridiem::Pm),
            _ => None,
        }
    }

    /// The marker as written in transcripts.
    pub fn marker(self) -> &'static str {
        match self {
            Meridiem::Am => "오전",
            Meridiem::Pm => "오후",
        }
    }

    /// Converts a 12-hour reading to 24-hour.
    ///
    /// 12 PM stays 12 (noon), 12 AM becomes 0 (midnight).
    pub fn to_24h(self, hour: u32) -> u32 {
        match (self, hour) {
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h.saturating_add(12),
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
        }
    }
}

/// Resolves date headers relative to a fixed "today".
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use talkpack::parsing::DateResolver;
///
/// let resolver = DateResolver::new(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
/// let yesterday = resolver.parse_date_header("어제").unwrap();
/// assert_eq!(yesterday.date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateResolver {
    today: NaiveDate,
}

impl DateResolver {
    /// Creates a resolver anchored at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a resolver anchored at the date of `now`.
    pub fn from_now(now: NaiveDateTime) -> Self {
        Self::new(now.date())
    }

    /// The anchor date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Recognizes a date-section header, returning midnight of that day.
    ///
    /// Invalid calendar values (e.g. `2월 30일`) are not headers.
    pub fn parse_date_header(&self, line: &str) -> Option<NaiveDateTime> {
        parse_date_header(line, self.today)
    }
}

/// Recognizes a date-section header relative to `today`.
///
/// Returns midnight of the named day, or `None` if the line is not a header
/// or names an impossible date.
pub fn parse_date_header(line: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let line = line.trim();

    let date = if let Some(caps) = FULL_DATE_RE.captures(line) {
        let year = caps[1].parse::<i32>().ok()?;
        let month = caps[2].parse::<u32>().ok()?;
        let day = caps[3].parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?
    } else if let Some(caps) = MONTH_DAY_RE.captures(line) {
        let month = caps[1].parse::<u32>().ok()?;
        let day = caps[2].parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(today.year(), month, day)?
    } else {
        match line {
            "오늘" => today,
            "어제" => today.checked_sub_days(Days::new(1))?,
            "그저께" => today.checked_sub_days(Days::new(2))?,
            _ => return None,
        }
    };

    date.and_hms_opt(0, 0, 0)
}

/// Combines a 12-hour `H:MM` reading with the calendar date of `base`.
///
/// Seconds are zeroed. Malformed or out-of-range readings return `base`
/// unchanged, degrading to date-only granularity.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use talkpack::parsing::{Meridiem, resolve_time};
///
/// let base = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let at = resolve_time(Meridiem::Pm, "3:45", base);
/// assert_eq!(at.format("%H:%M").to_string(), "15:45");
/// ```
pub fn resolve_time(meridiem: Meridiem, time: &str, base: NaiveDateTime) -> NaiveDateTime {
    let Some((hour, minute)) = time.trim().split_once(':') else {
        return base;
    };
    let (Ok(hour), Ok(minute)) = (hour.parse::<u32>(), minute.parse::<u32>()) else {
        return base;
    };

    match NaiveTime::from_hms_opt(meridiem.to_24h(hour), minute, 0) {
        Some(t) => base.date().and_time(t),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_full_date_header() {
        assert_eq!(
            parse_date_header("2024년 1월 15일", today()),
            Some(midnight(2024, 1, 15))
        );
        assert_eq!(
            parse_date_header("  2023년 12월 31일 일요일  ", today()),
            Some(midnight(2023, 12, 31))
        );
        assert_eq!(
            parse_date_header("2024년1월15일", today()),
            Some(midnight(2024, 1, 15))
        );
    }

    #[test]
    fn test_month_day_uses_current_year() {
        assert_eq!(
            parse_date_header("3월 1일", today()),
            Some(midnight(2024, 3, 1))
        );
    }

    #[test]
    fn test_relative_headers() {
        assert_eq!(parse_date_header("오늘", today()), Some(midnight(2024, 6, 2)));
        assert_eq!(parse_date_header("어제", today()), Some(midnight(2024, 6, 1)));
        assert_eq!(parse_date_header("그저께", today()), Some(midnight(2024, 5, 31)));
    }

    #[test]
    fn test_relative_headers_must_stand_alone() {
        assert_eq!(parse_date_header("어제 회의 어땠어요", today()), None);
    }

    #[test]
    fn test_invalid_calendar_dates_rejected() {
        assert_eq!(parse_date_header("2월 30일", today()), None);
        assert_eq!(parse_date_header("2023년 2월 29일", today()), None);
        assert_eq!(parse_date_header("13월 1일", today()), None);
    }

    #[test]
    fn test_leap_day_in_current_year() {
        // 2024 is a leap year
        assert_eq!(
            parse_date_header("2월 29일", today()),
            Some(midnight(2024, 2, 29))
        );
    }

    #[test]
    fn test_non_header_lines() {
        assert_eq!(parse_date_header("김철수 오후 2:30 안녕", today()), None);
        assert_eq!(parse_date_header("", today()), None);
    }

    #[test]
    fn test_resolve_time_pm() {
        let base = midnight(2024, 6, 1);
        let at = resolve_time(Meridiem::Pm, "3:45", base);
        assert_eq!(at, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(15, 45, 0).unwrap());
    }

    #[test]
    fn test_resolve_time_noon_and_midnight() {
        let base = midnight(2024, 6, 1);
        assert_eq!(resolve_time(Meridiem::Pm, "12:05", base).format("%H:%M").to_string(), "12:05");
        assert_eq!(resolve_time(Meridiem::Am, "12:05", base).format("%H:%M").to_string(), "00:05");
        assert_eq!(resolve_time(Meridiem::Am, "9:30", base).format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn test_resolve_time_zeroes_seconds() {
        let base = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(18, 20, 41)
            .unwrap();
        let at = resolve_time(Meridiem::Am, "9:30", base);
        assert_eq!(at.format("%H:%M:%S").to_string(), "09:30:00");
    }

    #[test]
    fn test_resolve_time_malformed_keeps_base() {
        let base = midnight(2024, 6, 1);
        assert_eq!(resolve_time(Meridiem::Pm, "13:00", base), base);
        assert_eq!(resolve_time(Meridiem::Am, "9:75", base), base);
        assert_eq!(resolve_time(Meridiem::Am, "nine", base), base);
        assert_eq!(resolve_time(Meridiem::Am, "9:", base), base);
    }

    #[test]
    fn test_meridiem_markers() {
        assert_eq!(Meridiem::from_marker("오전"), Some(Meridiem::Am));
        assert_eq!(Meridiem::from_marker("오후"), Some(Meridiem::Pm));
        assert_eq!(Meridiem::from_marker("PM"), None);
        assert_eq!(Meridiem::Pm.marker(), "오후");
    }

    #[test]
    fn test_resolver_wraps_free_function() {
        let resolver = DateResolver::from_now(
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap().and_hms_opt(20, 0, 0).unwrap(),
        );
        assert_eq!(resolver.today(), today());
        assert_eq!(resolver.parse_date_header("어제"), Some(midnight(2024, 6, 1)));
    }
}
