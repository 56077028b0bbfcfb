//! String comparison modes used by text, title and name filters.
//!
//! The comparison mode is always a parameter of the filter, never hardcoded,
//! so callers can pick between exact and case-insensitive matching.
//!
//! | Mode                          | Case        |
//! |-------------------------------|-------------|
//! | `Ordinal`                     | sensitive   |
//! | `OrdinalIgnoreCase`           | insensitive |
//! | `InvariantCulture` (default)  | sensitive   |
//! | `InvariantCultureIgnoreCase`  | insensitive |
//! | `CurrentCulture`              | sensitive   |
//! | `CurrentCultureIgnoreCase`    | insensitive |
//!
//! Culture-aware modes are accepted for configuration compatibility and
//! compare by Unicode scalar values like the ordinal ones; case-insensitive
//! modes fold both sides with full Unicode lowercase mapping.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How two strings are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringComparison {
    /// Exact comparison of Unicode scalar values.
    Ordinal,
    /// Ordinal comparison after case folding.
    OrdinalIgnoreCase,
    /// Culture-invariant, case-sensitive comparison.
    #[default]
    InvariantCulture,
    /// Culture-invariant, case-insensitive comparison.
    InvariantCultureIgnoreCase,
    /// Current-culture, case-sensitive comparison.
    CurrentCulture,
    /// Current-culture, case-insensitive comparison.
    CurrentCultureIgnoreCase,
}

impl StringComparison {
    /// Returns `true` if this mode ignores letter case.
    pub fn ignores_case(self) -> bool {
        matches!(
            self,
            Self::OrdinalIgnoreCase
                | Self::InvariantCultureIgnoreCase
                | Self::CurrentCultureIgnoreCase
        )
    }

    /// Returns the configuration name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinal => "ordinal",
            Self::OrdinalIgnoreCase => "ordinal-ignore-case",
            Self::InvariantCulture => "invariant-culture",
            Self::InvariantCultureIgnoreCase => "invariant-culture-ignore-case",
            Self::CurrentCulture => "current-culture",
            Self::CurrentCultureIgnoreCase => "current-culture-ignore-case",
        }
    }

    fn fold(self, s: &str) -> Cow<'_, str> {
        if self.ignores_case() {
            Cow::Owned(s.to_lowercase())
        } else {
            Cow::Borrowed(s)
        }
    }

    /// Returns `true` if `text` and `pattern` are equal under this mode.
    pub fn equals(self, text: &str, pattern: &str) -> bool {
        self.fold(text) == self.fold(pattern)
    }

    /// Returns `true` if `text` starts with `pattern` under this mode.
    pub fn starts_with(self, text: &str, pattern: &str) -> bool {
        self.fold(text).starts_with(self.fold(pattern).as_ref())
    }

    /// Returns `true` if `text` ends with `pattern` under this mode.
    pub fn ends_with(self, text: &str, pattern: &str) -> bool {
        self.fold(text).ends_with(self.fold(pattern).as_ref())
    }

    /// Returns `true` if `text` contains `pattern` under this mode.
    pub fn contains(self, text: &str, pattern: &str) -> bool {
        self.fold(text).contains(self.fold(pattern).as_ref())
    }
}

impl fmt::Display for StringComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringComparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().replace('_', "-").as_str() {
            "ordinal" => Self::Ordinal,
            "ordinal-ignore-case" => Self::OrdinalIgnoreCase,
            "invariant-culture" | "invariant" => Self::InvariantCulture,
            "invariant-culture-ignore-case" => Self::InvariantCultureIgnoreCase,
            "current-culture" | "culture" => Self::CurrentCulture,
            "current-culture-ignore-case" => Self::CurrentCultureIgnoreCase,
            other => return Err(format!("unknown string comparison: {other}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_case_sensitive_invariant() {
        let cmp = StringComparison::default();
        assert_eq!(cmp, StringComparison::InvariantCulture);
        assert!(!cmp.equals("HI", "hi"));
        assert!(cmp.equals("hi", "hi"));
    }

    #[test]
    fn test_ignore_case_modes() {
        for cmp in [
            StringComparison::OrdinalIgnoreCase,
            StringComparison::InvariantCultureIgnoreCase,
            StringComparison::CurrentCultureIgnoreCase,
        ] {
            assert!(cmp.equals("HI", "hi"), "{cmp}");
            assert!(cmp.starts_with("FooBar", "foo"), "{cmp}");
            assert!(cmp.ends_with("FooBar", "BAR"), "{cmp}");
            assert!(cmp.contains("FooBar", "oob"), "{cmp}");
        }
    }

    #[test]
    fn test_ignore_case_non_ascii() {
        let cmp = StringComparison::OrdinalIgnoreCase;
        assert!(cmp.equals("ПРИВЕТ", "привет"));
        assert!(!StringComparison::Ordinal.equals("ПРИВЕТ", "привет"));
    }

    #[test]
    fn test_empty_pattern() {
        let cmp = StringComparison::Ordinal;
        assert!(cmp.starts_with("abc", ""));
        assert!(cmp.contains("abc", ""));
        assert!(!cmp.equals("abc", ""));
    }

    #[test]
    fn test_parse_round_trips_display() {
        let cmp: StringComparison = "ordinal-ignore-case".parse().unwrap();
        assert_eq!(cmp, StringComparison::OrdinalIgnoreCase);
        assert_eq!(
            "Invariant_Culture".parse::<StringComparison>().unwrap(),
            StringComparison::InvariantCulture
        );
        assert!("nope".parse::<StringComparison>().is_err());
    }
}
