//! Parsing and display of `indexedAt` timestamps

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an ISO-8601 timestamp as produced by the AppView
///
/// Beyond RFC 3339 this takes the basic (separator-free) form, reduced
/// precision (`10:30`, `10`), hour-only offsets (`+02`), week dates
/// (`2024-W03-1`) and ordinal dates (`2024-015`). A time without an offset
/// is taken as UTC and a bare date as midnight UTC. Returns `None` for
/// anything else.
pub fn parse_indexed_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let parsed = parse_iso8601(value);
    if parsed.is_none() {
        tracing::warn!("Unparseable indexedAt timestamp: {:?}", value);
    }
    parsed
}

fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    let Some((date, time)) = value.split_once(|c: char| c == 'T' || c == 't' || c == ' ') else {
        return parse_date(value)?.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    };

    let (clock, offset) = split_offset(time);
    let naive = parse_date(date)?.and_time(parse_time_of_day(clock)?);
    match offset {
        Some(offset) => parse_offset(offset)?
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
        None => Some(naive.and_utc()),
    }
}

/// Calendar (`2024-01-15`, `20240115`), week (`2024-W03-1`, `2024W031`),
/// ordinal (`2024-015`, `2024015`) and reduced (`2024-01`, `2024`) dates
fn parse_date(value: &str) -> Option<NaiveDate> {
    let compact: String = value.chars().filter(|c| *c != '-').collect();

    if let Some((year, rest)) = compact.split_once(|c: char| c == 'W' || c == 'w') {
        if year.len() != 4 || !is_digits(year) || !is_digits(rest) {
            return None;
        }
        let (week, day) = match rest.len() {
            2 => (rest, "1"),
            3 => rest.split_at(2),
            _ => return None,
        };
        let weekday = match day {
            "1" => Weekday::Mon,
            "2" => Weekday::Tue,
            "3" => Weekday::Wed,
            "4" => Weekday::Thu,
            "5" => Weekday::Fri,
            "6" => Weekday::Sat,
            "7" => Weekday::Sun,
            _ => return None,
        };
        return NaiveDate::from_isoywd_opt(year.parse().ok()?, week.parse().ok()?, weekday);
    }

    if !is_digits(&compact) {
        return None;
    }
    let year: i32 = compact.get(..4)?.parse().ok()?;
    let field = |from: usize, to: usize| compact.get(from..to)?.parse::<u32>().ok();

    match compact.len() {
        4 => NaiveDate::from_ymd_opt(year, 1, 1),
        // YYYYMM is not a valid basic form, only YYYY-MM
        6 if value.contains('-') => NaiveDate::from_ymd_opt(year, field(4, 6)?, 1),
        7 => NaiveDate::from_yo_opt(year, field(4, 7)?),
        8 => NaiveDate::from_ymd_opt(year, field(4, 6)?, field(6, 8)?),
        _ => None,
    }
}

/// Split a time of day from its trailing zone designator, if any
///
/// `Z` comes back as a zero offset.
fn split_offset(time: &str) -> (&str, Option<&str>) {
    if let Some(clock) = time.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        return (clock, Some("+00"));
    }
    match time.rfind(|c: char| c == '+' || c == '-') {
        Some(at) => (&time[..at], Some(&time[at..])),
        None => (time, None),
    }
}

/// `hh`, `hh:mm`, `hh:mm:ss` or their basic forms, with an optional
/// decimal fraction of a second
fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match value.split_once(|c: char| c == '.' || c == ',') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (value, None),
    };

    let digits: String = clock.chars().filter(|c| *c != ':').collect();
    if !is_digits(&digits) {
        return None;
    }
    let field = |from: usize| digits.get(from..from + 2)?.parse::<u32>().ok();
    let (hour, minute, second) = match digits.len() {
        2 => (field(0)?, 0, 0),
        4 => (field(0)?, field(2)?, 0),
        6 => (field(0)?, field(2)?, field(4)?),
        _ => return None,
    };

    let nanos = match fraction {
        None => 0,
        Some(fraction) if is_digits(fraction) => {
            let mut nanos: String = fraction.chars().take(9).collect();
            while nanos.len() < 9 {
                nanos.push('0');
            }
            nanos.parse().ok()?
        }
        Some(_) => return None,
    };

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

/// `+hh`, `+hhmm` or `+hh:mm` (and their negative forms)
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !is_digits(&digits) {
        return None;
    }
    let (hours, minutes): (i32, i32) = match digits.len() {
        2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Time zone used when rendering timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    /// The viewer's local zone
    #[default]
    Local,
    Utc,
}

impl std::str::FromStr for DisplayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(DisplayZone::Local),
            "utc" => Ok(DisplayZone::Utc),
            _ => Err(format!(
                "Invalid time zone: '{}'. Valid options: local, utc",
                s
            )),
        }
    }
}

/// How timestamps are rendered for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampStyle {
    pub zone: DisplayZone,
    pub format: String,
}

impl Default for TimestampStyle {
    fn default() -> Self {
        Self {
            zone: DisplayZone::Local,
            format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl TimestampStyle {
    pub fn new(zone: DisplayZone, format: impl Into<String>) -> Self {
        Self {
            zone,
            format: format.into(),
        }
    }

    /// Render a timestamp, or `-` when it could not be parsed
    ///
    /// An invalid format string falls back to RFC 3339.
    pub fn render(&self, timestamp: Option<DateTime<Utc>>) -> String {
        let Some(ts) = timestamp else {
            return "-".to_string();
        };

        let mut out = String::new();
        let written = match self.zone {
            DisplayZone::Utc => write!(out, "{}", ts.format(&self.format)),
            DisplayZone::Local => write!(out, "{}", ts.with_timezone(&Local).format(&self.format)),
        };

        match (written, self.zone) {
            (Ok(()), _) => out,
            (Err(_), DisplayZone::Utc) => ts.to_rfc3339(),
            (Err(_), DisplayZone::Local) => ts.with_timezone(&Local).to_rfc3339(),
        }
    }
}
