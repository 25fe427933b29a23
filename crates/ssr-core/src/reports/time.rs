//! Report time zone
//!
//! Dates in reports, filters and chart buckets are civil dates in the
//! organization's zone. Two kinds of zone are supported: a fixed UTC offset,
//! and Central European time with the EU summer-time rule (UTC+1, UTC+2 from
//! 01:00 UTC on the last Sunday of March until 01:00 UTC on the last Sunday
//! of October).

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTimezone {
    Fixed(FixedOffset),
    CentralEurope,
}

const HOUR: i32 = 3600;

impl ReportTimezone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Offset in effect at an instant
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Fixed(offset) => *offset,
            Self::CentralEurope => {
                let seconds = if is_eu_summer_time(instant) { 2 * HOUR } else { HOUR };
                fixed(seconds)
            }
        }
    }

    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date_naive()
    }

    /// Instant at which a local wall-clock time occurs
    ///
    /// Summer-time transitions happen at 02:00/03:00 local time, so local
    /// midnights are always unambiguous.
    pub fn local_to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let standard = match self {
            Self::Fixed(offset) => *offset,
            Self::CentralEurope => fixed(HOUR),
        };
        let guess = Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(standard.local_minus_utc()))));
        let offset = self.offset_at(guess);
        Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset.local_minus_utc()))))
    }

    /// Instant at which a local day begins
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.local_to_utc(date.and_time(NaiveTime::MIN))
    }
}

impl Default for ReportTimezone {
    fn default() -> Self {
        Self::CentralEurope
    }
}

impl fmt::Display for ReportTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::CentralEurope => f.write_str("Europe/Warsaw"),
        }
    }
}

impl FromStr for ReportTimezone {
    type Err = DomainError;

    /// Accepts `Europe/Warsaw`, `CET`, `UTC`, `Z` or an offset such as `+01:00`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "Europe/Warsaw" | "CET" | "CEST" => return Ok(Self::CentralEurope),
            "UTC" | "Z" => return Ok(Self::utc()),
            _ => {}
        }

        let invalid = || DomainError::ValidationError(format!("unsupported time zone: {s}"));
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(invalid());
        }
        FixedOffset::east_opt(sign * (hours * HOUR + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }
}

fn fixed(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = first_of_next.pred_opt()?;
    let back = last.weekday().num_days_from_sunday();
    Some(last - Duration::days(i64::from(back)))
}

/// EU summer time, enough for the single zone reports use.
/// `chrono-tz` is the usual choice if more zones are ever needed.
fn is_eu_summer_time(instant: DateTime<Utc>) -> bool {
    let year = instant.year();
    let transition = |month| {
        last_sunday(year, month)
            .and_then(|day| day.and_hms_opt(1, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    };
    match (transition(3), transition(10)) {
        (Some(start), Some(end)) => instant >= start && instant < end,
        _ => false,
    }
}
