//! Ranger account provisioning helpers
//!
//! New logins continue the numbering of an association: the highest suffix
//! already in use is found and the next `count` numbers are planned. The
//! plan is computed from a snapshot, so two administrators provisioning
//! the same association at once may plan the same numbers; the unique
//! email constraint rejects the loser's accounts one by one.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;

use crate::error::DomainError;
use crate::value_objects::LoginPattern;

pub const DEFAULT_PASSWORD_LENGTH: usize = 12;
/// Largest number of accounts one request may create
pub const MAX_BATCH: u32 = 200;
/// Largest number of logins one deletion selection may expand to
pub const MAX_SELECTION: usize = 1000;

/// Highest numeric suffix among addresses that follow `pattern`, or 0
pub fn highest_suffix<'a, I>(pattern: &LoginPattern, emails: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    emails
        .into_iter()
        .filter_map(|email| pattern.suffix_of(email))
        .max()
        .unwrap_or(0)
}

/// Suffixes `highest + 1 ..= highest + count`
pub fn allocation_plan(highest: u32, count: u32) -> Vec<u32> {
    (1..=count).map_while(|i| highest.checked_add(i)).collect()
}

/// Expand a deletion selection such as `001-005, 007, 0100` into addresses
///
/// Parts are separated by commas. A part `a-b` is an inclusive numeric
/// range padded to the width of `a`; any other part is used verbatim as the
/// login suffix.
pub fn expand_selection(pattern: &LoginPattern, input: &str) -> Result<Vec<String>, DomainError> {
    let mut emails = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (start.trim(), end.trim());
                let invalid = || DomainError::InvalidSelection(format!("invalid range: {part}"));
                let from: u32 = start.parse().map_err(|_| invalid())?;
                let to: u32 = end.parse().map_err(|_| invalid())?;
                if from > to {
                    return Err(invalid());
                }
                if (to - from) as usize + emails.len() >= MAX_SELECTION {
                    return Err(too_many());
                }
                let width = start.len();
                for n in from..=to {
                    emails.push(pattern.email_for_suffix(&format!("{n:0width$}")));
                }
            }
            None => {
                if part.contains(['@', ' ']) {
                    return Err(DomainError::InvalidSelection(format!("invalid login: {part}")));
                }
                emails.push(pattern.email_for_suffix(part));
            }
        }
        if emails.len() > MAX_SELECTION {
            return Err(too_many());
        }
    }

    if emails.is_empty() {
        return Err(DomainError::InvalidSelection("selection is empty".to_string()));
    }
    Ok(emails)
}

fn too_many() -> DomainError {
    DomainError::InvalidSelection(format!("selection exceeds {MAX_SELECTION} logins"))
}

/// Random password: base64 of random bytes, cut to `length` characters
pub fn generate_password(length: usize) -> String {
    let mut bytes = vec![0u8; length.max(1)];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut password = STANDARD.encode(&bytes);
    password.truncate(length);
    password
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> LoginPattern {
        LoginPattern::new("MAZSSR_", "ranger.pl")
    }

    #[test]
    fn test_highest_suffix() {
        let emails = [
            "MAZSSR_004@ranger.pl",
            "MAZSSR_012@ranger.pl",
            "TBGSSR_099@ranger.pl",
            "MAZSSR_admin@ranger.pl",
        ];
        assert_eq!(highest_suffix(&pattern(), emails), 12);
        assert_eq!(highest_suffix(&pattern(), []), 0);
    }

    #[test]
    fn test_allocation_never_reuses_existing_suffix() {
        let existing = ["MAZSSR_001@ranger.pl", "MAZSSR_007@ranger.pl", "MAZSSR_003@ranger.pl"];
        let p = pattern();
        let plan = allocation_plan(highest_suffix(&p, existing), 3);
        assert_eq!(plan, vec![8, 9, 10]);
        for n in plan {
            assert!(!existing.contains(&p.email_for(n).as_str()));
        }
    }

    #[test]
    fn test_allocation_plan_edges() {
        assert!(allocation_plan(5, 0).is_empty());
        assert_eq!(allocation_plan(u32::MAX - 1, 3), vec![u32::MAX]);
    }

    #[test]
    fn test_expand_selection_ranges_keep_padding() {
        let emails = expand_selection(&pattern(), "001-003, 007").unwrap();
        assert_eq!(
            emails,
            vec![
                "MAZSSR_001@ranger.pl",
                "MAZSSR_002@ranger.pl",
                "MAZSSR_003@ranger.pl",
                "MAZSSR_007@ranger.pl",
            ]
        );

        let wide = expand_selection(&pattern(), "0009-0010").unwrap();
        assert_eq!(wide, vec!["MAZSSR_0009@ranger.pl", "MAZSSR_0010@ranger.pl"]);
    }

    #[test]
    fn test_expand_selection_rejects_bad_input() {
        assert!(expand_selection(&pattern(), "").is_err());
        assert!(expand_selection(&pattern(), " , ").is_err());
        assert!(expand_selection(&pattern(), "5-2").is_err());
        assert!(expand_selection(&pattern(), "a-b").is_err());
        assert!(expand_selection(&pattern(), "1-5000").is_err());
        assert!(expand_selection(&pattern(), "x@y").is_err());
    }

    #[test]
    fn test_generate_password() {
        let a = generate_password(DEFAULT_PASSWORD_LENGTH);
        let b = generate_password(DEFAULT_PASSWORD_LENGTH);
        assert_eq!(a.len(), 12);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/'));
        assert_eq!(generate_password(30).len(), 30);
    }
}
