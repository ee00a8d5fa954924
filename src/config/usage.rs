// src/config/usage.rs

//! Repository usage levels (`Usage = Sync Search ...`)

use serde::Serialize;
use std::ops::BitOr;

/// What a sync database may be used for (values match libalpm's `alpm_db_usage_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct DbUsage(u32);

impl DbUsage {
    pub const SYNC: DbUsage = DbUsage(1 << 0);
    pub const SEARCH: DbUsage = DbUsage(1 << 1);
    pub const INSTALL: DbUsage = DbUsage(1 << 2);
    pub const UPGRADE: DbUsage = DbUsage(1 << 3);
    pub const ALL: DbUsage = DbUsage((1 << 4) - 1);

    pub const fn empty() -> Self {
        DbUsage(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: DbUsage) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine the words of a `Usage` line
    ///
    /// No words at all means the repository was never restricted, so every
    /// usage is allowed. Unknown words are skipped.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> DbUsage {
        if words.is_empty() {
            return Self::ALL;
        }

        words.iter().fold(Self::empty(), |usage, word| {
            match word.as_ref() {
                "Sync" => usage | Self::SYNC,
                "Search" => usage | Self::SEARCH,
                "Install" => usage | Self::INSTALL,
                "Upgrade" => usage | Self::UPGRADE,
                "All" => usage | Self::ALL,
                _ => usage,
            }
        })
    }
}

impl BitOr for DbUsage {
    type Output = DbUsage;

    fn bitor(self, rhs: DbUsage) -> DbUsage {
        DbUsage(self.0 | rhs.0)
    }
}
