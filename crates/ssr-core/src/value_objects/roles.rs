//! Account roles
//!
//! Stored as a `TEXT[]` of lowercase role names so that profile documents
//! keep the `roles: ["ranger"]` shape, and held in memory as bitflags.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Roles: u8 {
        /// Field ranger, may submit inspections
        const RANGER = 1 << 0;
        /// Dashboard administrator
        const ADMIN  = 1 << 1;
    }
}

impl Roles {
    const NAMES: [(Roles, &'static str); 2] = [(Roles::RANGER, "ranger"), (Roles::ADMIN, "admin")];

    /// Build from stored role names, ignoring names this service does not know
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(Roles::empty(), |acc, name| {
            let name = name.as_ref().trim();
            Self::NAMES
                .iter()
                .find(|(_, n)| n.eq_ignore_ascii_case(name))
                .map_or(acc, |(flag, _)| acc | *flag)
        })
    }

    pub fn names(&self) -> Vec<String> {
        Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| (*name).to_string())
            .collect()
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.contains(Roles::ADMIN)
    }

    #[inline]
    pub fn is_ranger(&self) -> bool {
        self.contains(Roles::RANGER)
    }
}

impl Default for Roles {
    fn default() -> Self {
        Roles::RANGER
    }
}

impl Serialize for Roles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Roles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(Roles::from_names(names))
    }
}
