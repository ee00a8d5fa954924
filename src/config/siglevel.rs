// src/config/siglevel.rs

//! Signature verification levels
//!
//! A `SigLevel` is the bitmask libalpm uses to decide how strictly package and
//! database signatures are checked. In pacman.conf it is written as a list of
//! keywords, optionally scoped with a `Package` or `Database` prefix:
//!
//! ```text
//! SigLevel = Required DatabaseOptional TrustAll
//! ```
//!
//! Unscoped keywords apply to both packages and databases. Keywords are folded
//! left to right, so later ones win where they touch the same bits.

use serde::Serialize;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Bitmask of signature checking flags (values match libalpm's `alpm_siglevel_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct SigLevel(u32);

impl SigLevel {
    pub const PACKAGE: SigLevel = SigLevel(1 << 0);
    pub const PACKAGE_OPTIONAL: SigLevel = SigLevel(1 << 1);
    pub const PACKAGE_MARGINAL_OK: SigLevel = SigLevel(1 << 2);
    pub const PACKAGE_UNKNOWN_OK: SigLevel = SigLevel(1 << 3);

    pub const DATABASE: SigLevel = SigLevel(1 << 10);
    pub const DATABASE_OPTIONAL: SigLevel = SigLevel(1 << 11);
    pub const DATABASE_MARGINAL_OK: SigLevel = SigLevel(1 << 12);
    pub const DATABASE_UNKNOWN_OK: SigLevel = SigLevel(1 << 13);

    /// Not configured yet; libalpm substitutes the handle's default level
    pub const USE_DEFAULT: SigLevel = SigLevel(1 << 30);

    const NAMED: [(SigLevel, &'static str); 9] = [
        (Self::PACKAGE, "PACKAGE"),
        (Self::PACKAGE_OPTIONAL, "PACKAGE_OPTIONAL"),
        (Self::PACKAGE_MARGINAL_OK, "PACKAGE_MARGINAL_OK"),
        (Self::PACKAGE_UNKNOWN_OK, "PACKAGE_UNKNOWN_OK"),
        (Self::DATABASE, "DATABASE"),
        (Self::DATABASE_OPTIONAL, "DATABASE_OPTIONAL"),
        (Self::DATABASE_MARGINAL_OK, "DATABASE_MARGINAL_OK"),
        (Self::DATABASE_UNKNOWN_OK, "DATABASE_UNKNOWN_OK"),
        (Self::USE_DEFAULT, "USE_DEFAULT"),
    ];

    /// The value with no flags set
    pub const fn empty() -> Self {
        SigLevel(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        SigLevel(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is set in `self`
    pub const fn contains(self, other: SigLevel) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: SigLevel) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: SigLevel) {
        self.0 &= !other.0;
    }

    /// Names of the individual flags that are set, lowest bit first
    pub fn flag_names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Decode a pacman.conf signature level expression
    ///
    /// Never fails: unknown keywords are skipped so that configs written for
    /// newer pacman releases still load. The result never carries `USE_DEFAULT`.
    pub fn decode(expression: &str) -> SigLevel {
        Self::empty().apply(expression)
    }

    /// Fold the keywords of `expression` on top of `self`
    ///
    /// `SigLevel::decode(a).apply(b)` equals `SigLevel::decode("a b")`.
    pub fn apply(self, expression: &str) -> SigLevel {
        let mut level = expression
            .split_whitespace()
            .fold(self, |acc, token| {
                let (scopes, keyword) = split_scope(token);
                match keyword {
                    Some(keyword) => scopes
                        .iter()
                        .fold(acc, |level, scope| keyword.apply(level, *scope)),
                    None => acc,
                }
            });
        level.remove(Self::USE_DEFAULT);
        level
    }
}

impl BitOr for SigLevel {
    type Output = SigLevel;

    fn bitor(self, rhs: SigLevel) -> SigLevel {
        SigLevel(self.0 | rhs.0)
    }
}

impl BitOrAssign for SigLevel {
    fn bitor_assign(&mut self, rhs: SigLevel) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SigLevel {
    type Output = SigLevel;

    fn bitand(self, rhs: SigLevel) -> SigLevel {
        SigLevel(self.0 & rhs.0)
    }
}

impl BitAndAssign for SigLevel {
    fn bitand_assign(&mut self, rhs: SigLevel) {
        self.0 &= rhs.0;
    }
}

impl Not for SigLevel {
    type Output = SigLevel;

    fn not(self) -> SigLevel {
        SigLevel(!self.0)
    }
}

/// Renders the level the way `pacman-conf` prints it, e.g.
/// `PackageRequired PackageTrustOnly DatabaseOptional DatabaseTrustAll`
impl fmt::Display for SigLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Self::USE_DEFAULT) {
            return f.write_str("Default");
        }

        let mut words = Vec::with_capacity(4);
        for scope in [Scope::Package, Scope::Database] {
            let flags = scope.flags();
            let prefix = scope.prefix();
            if !self.contains(flags.present) {
                words.push(format!("{}Never", prefix));
                continue;
            }
            if self.contains(flags.optional) {
                words.push(format!("{}Optional", prefix));
            } else {
                words.push(format!("{}Required", prefix));
            }
            if self.contains(flags.marginal_ok | flags.unknown_ok) {
                words.push(format!("{}TrustAll", prefix));
            } else {
                words.push(format!("{}TrustOnly", prefix));
            }
        }
        f.write_str(&words.join(" "))
    }
}

/// Which half of the bitmask a keyword targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Package,
    Database,
}

/// The four flags that make up one scope
struct ScopeFlags {
    present: SigLevel,
    optional: SigLevel,
    marginal_ok: SigLevel,
    unknown_ok: SigLevel,
}

static BOTH_SCOPES: [Scope; 2] = [Scope::Package, Scope::Database];

impl Scope {
    fn prefix(self) -> &'static str {
        match self {
            Scope::Package => "Package",
            Scope::Database => "Database",
        }
    }

    fn flags(self) -> ScopeFlags {
        match self {
            Scope::Package => ScopeFlags {
                present: SigLevel::PACKAGE,
                optional: SigLevel::PACKAGE_OPTIONAL,
                marginal_ok: SigLevel::PACKAGE_MARGINAL_OK,
                unknown_ok: SigLevel::PACKAGE_UNKNOWN_OK,
            },
            Scope::Database => ScopeFlags {
                present: SigLevel::DATABASE,
                optional: SigLevel::DATABASE_OPTIONAL,
                marginal_ok: SigLevel::DATABASE_MARGINAL_OK,
                unknown_ok: SigLevel::DATABASE_UNKNOWN_OK,
            },
        }
    }
}

/// Keywords accepted after the optional scope prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Never,
    Optional,
    Required,
    TrustOnly,
    TrustAll,
}

impl Keyword {
    fn parse(tail: &str) -> Option<Keyword> {
        match tail {
            "Never" => Some(Keyword::Never),
            "Optional" => Some(Keyword::Optional),
            "Required" => Some(Keyword::Required),
            "TrustOnly" => Some(Keyword::TrustOnly),
            "TrustAll" => Some(Keyword::TrustAll),
            _ => None,
        }
    }

    fn apply(self, mut level: SigLevel, scope: Scope) -> SigLevel {
        let flags = scope.flags();
        match self {
            Keyword::Never => level.remove(flags.present),
            Keyword::Optional => level.insert(flags.present | flags.optional),
            Keyword::Required => {
                level.insert(flags.present);
                level.remove(flags.optional);
            }
            Keyword::TrustOnly => level.remove(flags.marginal_ok | flags.unknown_ok),
            Keyword::TrustAll => level.insert(flags.marginal_ok | flags.unknown_ok),
        }
        level
    }
}

/// Split a token into the scopes it affects and its keyword
fn split_scope(token: &str) -> (&'static [Scope], Option<Keyword>) {
    for scope in &BOTH_SCOPES {
        if let Some(tail) = token.strip_prefix(scope.prefix()) {
            return (std::slice::from_ref(scope), Keyword::parse(tail));
        }
    }
    (&BOTH_SCOPES, Keyword::parse(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_is_zero() {
        assert_eq!(SigLevel::decode(""), SigLevel::empty());
        assert_eq!(SigLevel::decode("   "), SigLevel::empty());
    }

    #[test]
    fn test_decode_required_affects_both_scopes() {
        let level = SigLevel::decode("Required");
        assert_eq!(level, SigLevel::PACKAGE | SigLevel::DATABASE);
        assert!(!level.contains(SigLevel::PACKAGE_OPTIONAL));
        assert!(!level.contains(SigLevel::DATABASE_OPTIONAL));
    }

    #[test]
    fn test_decode_scoped_keyword() {
        assert_eq!(SigLevel::decode("PackageRequired"), SigLevel::PACKAGE);
        assert_eq!(
            SigLevel::decode("DatabaseOptional"),
            SigLevel::DATABASE | SigLevel::DATABASE_OPTIONAL
        );
    }

    #[test]
    fn test_decode_later_tokens_win() {
        let level = SigLevel::decode("Optional PackageRequired");
        assert_eq!(
            level,
            SigLevel::PACKAGE | SigLevel::DATABASE | SigLevel::DATABASE_OPTIONAL
        );

        let level = SigLevel::decode("Required Never");
        assert_eq!(level, SigLevel::empty());
    }

    #[test]
    fn test_decode_trust_keywords() {
        let all = SigLevel::decode("TrustAll");
        assert!(all.contains(SigLevel::PACKAGE_MARGINAL_OK | SigLevel::PACKAGE_UNKNOWN_OK));
        assert!(all.contains(SigLevel::DATABASE_MARGINAL_OK | SigLevel::DATABASE_UNKNOWN_OK));

        let mixed = SigLevel::decode("TrustAll DatabaseTrustOnly");
        assert_eq!(
            mixed,
            SigLevel::PACKAGE_MARGINAL_OK | SigLevel::PACKAGE_UNKNOWN_OK
        );
    }

    #[test]
    fn test_decode_ignores_unknown_keywords() {
        assert_eq!(
            SigLevel::decode("Required TrustedOnly PackageSometimes Bogus"),
            SigLevel::decode("Required")
        );
    }

    #[test]
    fn test_apply_clears_use_default() {
        let level = SigLevel::USE_DEFAULT.apply("PackageOptional");
        assert!(!level.contains(SigLevel::USE_DEFAULT));
        assert_eq!(level, SigLevel::PACKAGE | SigLevel::PACKAGE_OPTIONAL);
        assert!(!SigLevel::USE_DEFAULT.apply("").contains(SigLevel::USE_DEFAULT));
    }

    #[test]
    fn test_apply_matches_combined_expression() {
        let stepwise = SigLevel::decode("Optional TrustAll").apply("Required TrustOnly");
        let combined = SigLevel::decode("Optional TrustAll Required TrustOnly");
        assert_eq!(stepwise, combined);
        assert_eq!(combined, SigLevel::PACKAGE | SigLevel::DATABASE);
    }

    #[test]
    fn test_bit_operators() {
        let mut level = SigLevel::PACKAGE | SigLevel::PACKAGE_OPTIONAL;
        level &= !SigLevel::PACKAGE_OPTIONAL;
        assert_eq!(level, SigLevel::PACKAGE);
        level |= SigLevel::DATABASE;
        assert_eq!(level.bits(), (1 << 0) | (1 << 10));
        assert_eq!(level & SigLevel::DATABASE, SigLevel::DATABASE);
    }

    #[test]
    fn test_flag_names() {
        let level = SigLevel::decode("PackageOptional");
        assert_eq!(level.flag_names(), vec!["PACKAGE", "PACKAGE_OPTIONAL"]);
        assert!(SigLevel::empty().flag_names().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(SigLevel::USE_DEFAULT.to_string(), "Default");
        assert_eq!(
            SigLevel::decode("Required DatabaseOptional").to_string(),
            "PackageRequired PackageTrustOnly DatabaseOptional DatabaseTrustOnly"
        );
        assert_eq!(
            SigLevel::decode("PackageNever DatabaseRequired TrustAll").to_string(),
            "PackageNever DatabaseRequired DatabaseTrustAll"
        );
    }
}
