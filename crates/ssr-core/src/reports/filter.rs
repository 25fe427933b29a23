//! Inspection filters
//!
//! A [`ControlFilter`] is what an administrator picks in the dashboard: a
//! date preset, a club and a status. It is resolved against the current
//! instant and the report time zone into a [`ControlQuery`], which the
//! repositories evaluate in SQL and [`ControlQuery::matches`] evaluates in
//! memory.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::time::ReportTimezone;
use crate::entities::Control;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePreset {
    #[default]
    All,
    /// The last seven days up to now
    LastWeek,
    CurrentMonth,
    PreviousMonth,
    CurrentYear,
    PreviousYear,
    /// A single calendar day
    Custom,
}

impl DatePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LastWeek => "lastWeek",
            Self::CurrentMonth => "currentMonth",
            Self::PreviousMonth => "previousMonth",
            Self::CurrentYear => "currentYear",
            Self::PreviousYear => "previousYear",
            Self::Custom => "custom",
        }
    }

    /// Chart buckets are months for year-long presets and days otherwise
    pub fn groups_by_month(&self) -> bool {
        matches!(self, Self::All | Self::CurrentYear | Self::PreviousYear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    /// Inspections not marked successful
    Rejected,
}

/// Half-open instant range `[from, until)`; a missing bound is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub const UNBOUNDED: Self = Self {
        from: None,
        until: None,
    };

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() || self.until.is_some()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| instant >= from)
            && self.until.map_or(true, |until| instant < until)
    }

    /// Resolve a preset relative to `now`
    pub fn resolve(
        preset: DatePreset,
        custom_date: Option<NaiveDate>,
        now: DateTime<Utc>,
        tz: ReportTimezone,
    ) -> Result<Self, DomainError> {
        let today = tz.local_date(now);
        let month_start = first_of_month(today)?;
        let year_start = first_of_year(today.year())?;

        let range = match preset {
            DatePreset::All => Self::UNBOUNDED,
            DatePreset::LastWeek => Self {
                from: Some(now - Duration::days(7)),
                until: None,
            },
            DatePreset::CurrentMonth => Self {
                from: Some(tz.start_of_day(month_start)),
                until: None,
            },
            DatePreset::PreviousMonth => {
                let previous = month_start
                    .checked_sub_months(Months::new(1))
                    .ok_or_else(|| out_of_range(preset))?;
                Self {
                    from: Some(tz.start_of_day(previous)),
                    until: Some(tz.start_of_day(month_start)),
                }
            }
            DatePreset::CurrentYear => Self {
                from: Some(tz.start_of_day(year_start)),
                until: None,
            },
            DatePreset::PreviousYear => Self {
                from: Some(tz.start_of_day(first_of_year(today.year() - 1)?)),
                until: Some(tz.start_of_day(year_start)),
            },
            DatePreset::Custom => {
                let day = custom_date.ok_or_else(|| {
                    DomainError::InvalidDateFilter("custom preset requires a date".to_string())
                })?;
                let next = day.succ_opt().ok_or_else(|| out_of_range(preset))?;
                Self {
                    from: Some(tz.start_of_day(day)),
                    until: Some(tz.start_of_day(next)),
                }
            }
        };
        Ok(range)
    }
}

fn first_of_month(day: NaiveDate) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1)
        .ok_or_else(|| DomainError::InvalidDateFilter(format!("no first day for {day}")))
}

fn first_of_year(year: i32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| DomainError::InvalidDateFilter(format!("year {year} out of range")))
}

fn out_of_range(preset: DatePreset) -> DomainError {
    DomainError::InvalidDateFilter(format!("{preset:?} is out of the supported range"))
}

/// Filter as chosen by an administrator
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlFilter {
    #[serde(default)]
    pub preset: DatePreset,
    /// Day for the custom preset
    pub date: Option<NaiveDate>,
    /// Club name; `None` or `"all"` keeps every club
    pub club: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
}

impl ControlFilter {
    /// Resolve into a query limited to `association_id` when given
    pub fn resolve(
        &self,
        association_id: Option<&str>,
        now: DateTime<Utc>,
        tz: ReportTimezone,
    ) -> Result<ControlQuery, DomainError> {
        let club = self
            .club
            .as_deref()
            .map(str::trim)
            .filter(|club| !club.is_empty() && *club != "all")
            .map(str::to_string);

        Ok(ControlQuery {
            association_id: association_id.map(str::to_string),
            range: DateRange::resolve(self.preset, self.date, now, tz)?,
            club,
            rejected_only: self.status == StatusFilter::Rejected,
            controller_id: None,
        })
    }
}

/// Repository-level inspection query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlQuery {
    pub association_id: Option<String>,
    pub range: DateRange,
    pub club: Option<String>,
    pub rejected_only: bool,
    pub controller_id: Option<Snowflake>,
}

impl ControlQuery {
    pub fn with_controller(mut self, controller_id: Option<Snowflake>) -> Self {
        self.controller_id = controller_id;
        self
    }

    /// In-memory equivalent of the SQL filter
    ///
    /// Undated records never fall inside a bounded date range.
    pub fn matches(&self, control: &Control) -> bool {
        if let Some(association_id) = &self.association_id {
            if control.association_id.as_ref() != Some(association_id) {
                return false;
            }
        }
        if self.range.is_bounded() {
            match control.control_date {
                Some(date) if self.range.contains(date) => {}
                _ => return false,
            }
        }
        if let Some(club) = &self.club {
            if control.club_name.as_ref() != Some(club) {
                return false;
            }
        }
        if self.rejected_only && !control.is_rejected() {
            return false;
        }
        if let Some(controller_id) = self.controller_id {
            if control.controller_id != Some(controller_id) {
                return false;
            }
        }
        true
    }
}
