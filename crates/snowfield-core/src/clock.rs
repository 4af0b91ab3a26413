//! Clock view settings and time formatting.
//!
//! Time zones are whole-hour UTC offsets, written the way the web build's
//! `clock_timezone` cookie stores them (`""` for local time, `"UTC"`,
//! `"Etc/GMT-5"` for UTC+5).

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_UTC_OFFSET: i8 = -12;
pub const MAX_UTC_OFFSET: i8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "HH:mm")]
    HoursMinutes,
    #[serde(rename = "HH:mm:ss")]
    WithSeconds,
}

impl ClockFormat {
    pub fn shows_seconds(self) -> bool {
        self == ClockFormat::WithSeconds
    }

    pub fn label(self) -> &'static str {
        match self {
            ClockFormat::HoursMinutes => "HH:mm",
            ClockFormat::WithSeconds => "HH:mm:ss",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            ClockFormat::HoursMinutes => "%H:%M",
            ClockFormat::WithSeconds => "%H:%M:%S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClockZone {
    #[default]
    Local,
    /// Whole hours east of UTC.
    Utc(i8),
}

impl ClockZone {
    /// Local time first, then every offset from UTC-12 to UTC+14.
    pub fn choices() -> impl Iterator<Item = ClockZone> {
        std::iter::once(ClockZone::Local)
            .chain((MIN_UTC_OFFSET..=MAX_UTC_OFFSET).map(ClockZone::Utc))
    }

    pub fn label(self) -> String {
        match self {
            ClockZone::Local => "Local Time".to_string(),
            ClockZone::Utc(hours) if hours < 0 => format!("UTC -{}", hours.unsigned_abs()),
            ClockZone::Utc(hours) => format!("UTC +{hours}"),
        }
    }

    /// Wall-clock time in this zone.
    pub fn localize(self, now: DateTime<Utc>) -> NaiveDateTime {
        match self {
            ClockZone::Local => now.with_timezone(&Local).naive_local(),
            ClockZone::Utc(hours) => match FixedOffset::east_opt(i32::from(hours) * 3600) {
                Some(offset) => now.with_timezone(&offset).naive_local(),
                None => now.naive_utc(),
            },
        }
    }
}

impl From<String> for ClockZone {
    /// Unknown zone names fall back to local time.
    fn from(value: String) -> Self {
        let name = value.trim();
        if name.is_empty() {
            return ClockZone::Local;
        }
        if matches!(name, "UTC" | "Etc/UTC" | "Etc/GMT" | "GMT") {
            return ClockZone::Utc(0);
        }
        // The Etc/GMT names invert the sign: Etc/GMT-5 is five hours east.
        name.strip_prefix("Etc/GMT")
            .and_then(|rest| rest.parse::<i8>().ok())
            .and_then(|hours| hours.checked_neg())
            .filter(|hours| (MIN_UTC_OFFSET..=MAX_UTC_OFFSET).contains(hours))
            .map_or(ClockZone::Local, ClockZone::Utc)
    }
}

impl From<ClockZone> for String {
    fn from(zone: ClockZone) -> Self {
        match zone {
            ClockZone::Local => String::new(),
            ClockZone::Utc(0) => "UTC".to_string(),
            ClockZone::Utc(hours) if hours > 0 => format!("Etc/GMT-{hours}"),
            ClockZone::Utc(hours) => format!("Etc/GMT+{}", hours.unsigned_abs()),
        }
    }
}

/// What the clock view shows for one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    pub time: String,
    pub date: Option<String>,
}

impl ClockReading {
    pub fn at(now: DateTime<Utc>, zone: ClockZone, format: ClockFormat, show_date: bool) -> Self {
        let local = zone.localize(now);
        Self {
            time: local.format(format.pattern()).to_string(),
            date: show_date.then(|| local.format("%-d %B %Y").to_string()),
        }
    }
}
