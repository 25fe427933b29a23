//! Aggregations behind the statistics views

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::time::ReportTimezone;
use crate::entities::Control;
use crate::value_objects::Snowflake;

/// Ranger name used for records without one
pub const UNKNOWN_RANGER: &str = "Nieznany";
/// Position text used for records without coordinates
pub const NO_POSITION: &str = "Brak danych";

const MONTHS_PL: [&str; 12] = [
    "Sty", "Lut", "Mar", "Kwi", "Maj", "Cze", "Lip", "Sie", "Wrz", "Paź", "Lis", "Gru",
];

/// Per-ranger totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangerStats {
    pub controller_name: String,
    pub total_controls: u64,
    pub successful_controls: u64,
    /// Distinct `"lat, lng"` positions in order of first appearance
    pub positions: Vec<String>,
}

impl RangerStats {
    pub fn positions_text(&self) -> String {
        self.positions.join(" | ")
    }
}

/// Totals per ranger name, in order of each ranger's first record
pub fn ranger_stats(records: &[Control]) -> Vec<RangerStats> {
    let mut stats: Vec<RangerStats> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut seen_positions: Vec<HashSet<String>> = Vec::new();

    for control in records {
        let name = control
            .controller_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_RANGER);
        let slot = *index.entry(name.to_string()).or_insert_with(|| {
            stats.push(RangerStats {
                controller_name: name.to_string(),
                total_controls: 0,
                successful_controls: 0,
                positions: Vec::new(),
            });
            seen_positions.push(HashSet::new());
            stats.len() - 1
        });

        let entry = &mut stats[slot];
        entry.total_controls += 1;
        if control.is_success == Some(true) {
            entry.successful_controls += 1;
        }
        let position = control
            .position
            .map_or_else(|| NO_POSITION.to_string(), |p| p.to_string());
        if seen_positions[slot].insert(position.clone()) {
            entry.positions.push(position);
        }
    }
    stats
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
}

/// One chart bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    pub label: String,
    #[serde(skip)]
    pub start: NaiveDate,
    /// Distinct calendar days with at least one inspection
    pub patrol_days: u64,
    pub controls: u64,
    /// Inspections explicitly marked unsuccessful
    pub rejected_controls: u64,
}

/// `1.06.2025`, the Polish short date
pub fn day_label(date: NaiveDate) -> String {
    date.format("%-d.%m.%Y").to_string()
}

/// `Cze 2025`
pub fn month_label(date: NaiveDate) -> String {
    let month = MONTHS_PL[date.month0() as usize];
    format!("{month} {}", date.year())
}

/// Chart buckets in chronological order; undated records are skipped
pub fn period_stats(
    records: &[Control],
    granularity: Granularity,
    tz: ReportTimezone,
) -> Vec<PeriodBucket> {
    #[derive(Default)]
    struct Acc {
        days: HashSet<NaiveDate>,
        controls: u64,
        rejected: u64,
    }

    let mut buckets: BTreeMap<NaiveDate, Acc> = BTreeMap::new();
    for control in records {
        let Some(instant) = control.control_date else {
            continue;
        };
        let day = tz.local_date(instant);
        let start = match granularity {
            Granularity::Day => day,
            Granularity::Month => day.with_day(1).unwrap_or(day),
        };
        let acc = buckets.entry(start).or_default();
        acc.days.insert(day);
        acc.controls += 1;
        if control.is_success == Some(false) {
            acc.rejected += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(start, acc)| PeriodBucket {
            label: match granularity {
                Granularity::Day => day_label(start),
                Granularity::Month => month_label(start),
            },
            start,
            patrol_days: acc.days.len() as u64,
            controls: acc.controls,
            rejected_controls: acc.rejected,
        })
        .collect()
}

/// Marker on the inspection map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: Snowflake,
    /// Club the inspection took place in
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

pub fn map_points(records: &[Control]) -> Vec<MapPoint> {
    records
        .iter()
        .filter_map(|c| {
            c.position.map(|p| MapPoint {
                id: c.id,
                name: c.club_name.clone(),
                lat: p.latitude,
                lng: p.longitude,
            })
        })
        .collect()
}
