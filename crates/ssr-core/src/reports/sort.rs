//! Ordering and paging of inspection lists

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::entities::Control;
use crate::value_objects::split_login;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Date,
    ControllerLogin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Compare logins such as `MAZSSR_9` and `MAZSSR_10` by prefix, then number
///
/// Logins that do not end in `_<digits>` compare as the whole login with
/// number zero.
pub fn compare_logins(a: &str, b: &str) -> Ordering {
    fn parts(login: &str) -> (&str, u64) {
        split_login(login).unwrap_or((login, 0))
    }
    let (a_prefix, a_number) = parts(a);
    let (b_prefix, b_number) = parts(b);
    a_prefix.cmp(b_prefix).then(a_number.cmp(&b_number))
}

/// Sort in place; records missing the sort value go last in both directions
pub fn sort_controls(records: &mut [Control], field: SortField, direction: SortDirection) {
    let directed = |ord: Ordering| match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    };

    records.sort_by(|a, b| match field {
        SortField::Date => match (a.control_date, b.control_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)).then_with(|| directed(a.id.cmp(&b.id))),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        },
        SortField::ControllerLogin => match (a.controller_login(), b.controller_login()) {
            (Some(x), Some(y)) => directed(compare_logins(x, y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    });
}

pub const MAX_PER_PAGE: u32 = 500;

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Cut page `page` (1-based) out of `items`
    pub fn slice(items: Vec<T>, page: u32, per_page: u32) -> Self {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let page = page.max(1);
        let total_items = items.len() as u64;
        let total_pages = total_items.div_ceil(u64::from(per_page)) as u32;
        let skip = (page as usize - 1).saturating_mul(per_page as usize);
        let items = items.into_iter().skip(skip).take(per_page as usize).collect();
        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Snowflake;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_compare_logins_is_numeric() {
        assert_eq!(compare_logins("MAZSSR_9", "MAZSSR_10"), Ordering::Less);
        assert_eq!(compare_logins("MAZSSR_0077", "MAZSSR_077"), Ordering::Equal);
        assert_eq!(compare_logins("MAZSSR_500", "TBGSSR_001"), Ordering::Less);
        assert_eq!(compare_logins("admin", "MAZSSR_001"), Ordering::Greater);
    }

    fn with_login(id: i64, login: Option<&str>, hour: Option<u32>) -> Control {
        let mut c = Control::new(Snowflake::new(id));
        c.controller_email = login.map(|l| format!("{l}@ranger.pl"));
        c.control_date = hour.map(|h| Utc.with_ymd_and_hms(2025, 5, 1, h, 0, 0).unwrap());
        c
    }

    fn ids(records: &[Control]) -> Vec<i64> {
        records.iter().map(|c| c.id.into_inner()).collect()
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let mut records = vec![
            with_login(1, None, Some(8)),
            with_login(2, None, None),
            with_login(3, None, Some(12)),
        ];
        sort_controls(&mut records, SortField::default(), SortDirection::default());
        assert_eq!(ids(&records), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_by_login() {
        let mut records = vec![
            with_login(1, Some("MAZSSR_010"), None),
            with_login(2, None, None),
            with_login(3, Some("MAZSSR_009"), None),
        ];
        sort_controls(&mut records, SortField::ControllerLogin, SortDirection::Asc);
        assert_eq!(ids(&records), vec![3, 1, 2]);
        sort_controls(&mut records, SortField::ControllerLogin, SortDirection::Desc);
        assert_eq!(ids(&records), vec![1, 3, 2]);
    }

    #[test]
    fn test_page_slice() {
        let page = Page::slice((1..=25).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);

        let beyond = Page::slice(vec![1, 2], 5, 10);
        assert!(beyond.items.is_empty());

        let clamped = Page::slice(vec![1, 2, 3], 0, 0);
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, 1);
        assert_eq!(clamped.items, vec![1]);
    }
}
