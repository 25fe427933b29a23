//! Duplicate inspection detection
//!
//! The mobile client may submit the same inspection more than once. Two
//! records are duplicates when their [`DuplicateKey`]s are equal and their
//! timestamps are at most one window apart. Records are scanned in time
//! order; each record is compared with the last *retained* record of its
//! key, so a chain of submissions spaced just under the window apart does
//! not collapse into a single group.
//!
//! Records without a timestamp or controller id are never flagged.

use chrono::Duration;
use serde::Serialize;
use std::collections::HashMap;

use crate::entities::Control;
use crate::value_objects::Snowflake;

pub const DEFAULT_WINDOW_MINUTES: i64 = 20;

/// Fields that must all be equal for two records to be duplicates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey<'a> {
    controller_id: Snowflake,
    controller_name: Option<&'a str>,
    controller_login: Option<&'a str>,
    group_code: Option<&'a str>,
    license_number: Option<&'a str>,
    club_name: Option<&'a str>,
    is_success: Option<bool>,
    reasons: String,
}

impl<'a> DuplicateKey<'a> {
    /// `None` when the record cannot take part in duplicate detection
    pub fn of(control: &'a Control) -> Option<Self> {
        control.control_date?;
        Some(Self {
            controller_id: control.controller_id?,
            controller_name: control.controller_name.as_deref(),
            controller_login: control.controller_login(),
            group_code: control.group_code.as_deref(),
            license_number: control.license_number.as_deref(),
            club_name: control.club_name.as_deref(),
            is_success: control.is_success,
            reasons: control.reasons_text(),
        })
    }
}

/// A retained record together with the records that duplicate it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup<T> {
    pub retained: T,
    pub duplicates: Vec<T>,
}

impl<T> DuplicateGroup<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DuplicateGroup<U> {
        DuplicateGroup {
            retained: f(self.retained),
            duplicates: self.duplicates.into_iter().map(f).collect(),
        }
    }
}

impl DuplicateGroup<Control> {
    /// Groups are identified by the id of their retained record
    pub fn id(&self) -> Snowflake {
        self.retained.id
    }

    pub fn duplicate_ids(&self) -> Vec<Snowflake> {
        self.duplicates.iter().map(|c| c.id).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Deduplicator {
    window: Duration,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_WINDOW_MINUTES))
    }
}

impl Deduplicator {
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.abs(),
        }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(Duration::minutes(i64::from(minutes)))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// For every record, the index of the record it duplicates
    fn classify(&self, records: &[Control]) -> Vec<Option<usize>> {
        let mut eligible: Vec<(usize, DuplicateKey<'_>)> = records
            .iter()
            .enumerate()
            .filter_map(|(i, c)| DuplicateKey::of(c).map(|key| (i, key)))
            .collect();
        eligible.sort_by_key(|(i, _)| (records[*i].control_date, records[*i].id));

        let mut owner = vec![None; records.len()];
        let mut last_retained: HashMap<DuplicateKey<'_>, usize> = HashMap::new();

        for (index, key) in eligible {
            let Some(time) = records[index].control_date else {
                continue;
            };
            let within_window = last_retained.get(&key).copied().filter(|&retained| {
                records[retained]
                    .control_date
                    .is_some_and(|prev| (time - prev).abs() <= self.window)
            });
            match within_window {
                Some(retained) => owner[index] = Some(retained),
                None => {
                    last_retained.insert(key, index);
                }
            }
        }
        owner
    }

    /// Records with duplicates removed, in their original order
    pub fn retain_unique(&self, records: Vec<Control>) -> Vec<Control> {
        let owner = self.classify(&records);
        records
            .into_iter()
            .zip(owner)
            .filter_map(|(control, owner)| owner.is_none().then_some(control))
            .collect()
    }

    /// Groups that contain at least one duplicate, oldest first
    pub fn groups(&self, records: &[Control]) -> Vec<DuplicateGroup<Control>> {
        let owner = self.classify(records);

        let mut members: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, retained) in owner.iter().enumerate() {
            if let Some(retained) = retained {
                members.entry(*retained).or_default().push(index);
            }
        }

        let mut groups: Vec<DuplicateGroup<Control>> = members
            .into_iter()
            .map(|(retained, mut dups)| {
                dups.sort_by_key(|&i| (records[i].control_date, records[i].id));
                DuplicateGroup {
                    retained: records[retained].clone(),
                    duplicates: dups.into_iter().map(|i| records[i].clone()).collect(),
                }
            })
            .collect();
        groups.sort_by_key(|g| (g.retained.control_date, g.retained.id));
        groups
    }

    /// Ids of every record that duplicates another
    pub fn duplicate_ids(&self, records: &[Control]) -> Vec<Snowflake> {
        self.classify(records)
            .iter()
            .zip(records)
            .filter_map(|(owner, control)| owner.map(|_| control.id))
            .collect()
    }
}

/// Distinct controller ids present in a record set, ascending
pub fn controller_ids(records: &[Control]) -> Vec<Snowflake> {
    let mut ids: Vec<Snowflake> = records.iter().filter_map(|c| c.controller_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
