//! Report computations over inspection records
//!
//! Everything here is pure: services load the records, these functions
//! filter, deduplicate, sort, aggregate and serialize them.

pub mod dedup;
pub mod export;
pub mod filter;
pub mod sort;
pub mod stats;
pub mod time;

pub use dedup::{controller_ids, Deduplicator, DuplicateGroup, DuplicateKey};
pub use filter::{ControlFilter, ControlQuery, DatePreset, DateRange, StatusFilter};
pub use sort::{compare_logins, sort_controls, Page, SortDirection, SortField};
pub use stats::{map_points, period_stats, ranger_stats, Granularity, MapPoint, PeriodBucket, RangerStats};
pub use time::ReportTimezone;
