//! Ranger login addresses
//!
//! Ranger accounts follow the `{PREFIX}{NNN}@{domain}` pattern, for example
//! `MAZSSR_007@ranger.pl`. The part before `@` is the login shown in reports.

use serde::Serialize;

/// Login pattern of one association
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPattern {
    pub prefix: String,
    pub domain: String,
}

impl LoginPattern {
    pub const SUFFIX_WIDTH: usize = 3;

    pub fn new(prefix: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            domain: domain.into(),
        }
    }

    /// Address for a numeric suffix, zero-padded to three digits
    pub fn email_for(&self, number: u32) -> String {
        format!(
            "{}{:0width$}@{}",
            self.prefix,
            number,
            self.domain,
            width = Self::SUFFIX_WIDTH
        )
    }

    /// Address for a suffix given verbatim by an administrator
    pub fn email_for_suffix(&self, suffix: &str) -> String {
        format!("{}{}@{}", self.prefix, suffix, self.domain)
    }

    /// Numeric suffix of an address matching `^{prefix}(\d+)@`
    pub fn suffix_of(&self, email: &str) -> Option<u32> {
        let rest = email.strip_prefix(&self.prefix)?;
        let (digits, _) = rest.split_once('@')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

/// Part of an address before `@`
pub fn local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

/// Login split into prefix and number, matching `^(.+?)_(\d+)$`
///
/// `MAZSSR_012` becomes `("MAZSSR", 12)`. Logins of any other shape yield `None`.
pub fn split_login(login: &str) -> Option<(&str, u64)> {
    let (prefix, digits) = login.rsplit_once('_')?;
    if prefix.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (prefix, n))
}
