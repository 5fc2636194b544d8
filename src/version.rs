//! Loose version comparison used by the `v:X.Y[.Z]+` search filter.
//!
//! This is not semantic versioning. A version string is squashed into a single
//! integer: everything after the first `D.D[.D]` on a line is discarded, every
//! remaining non-digit is removed, and two-digit results are scaled by ten so that
//! `2.5` (250) lines up with `2.5.1` (251). Consequences worth knowing:
//!
//! - `2.5-dev21` normalizes to 250, the suffix is dropped.
//! - `2.10` normalizes to 210 (only single-digit components are recognized).
//! - Digits *before* the version are kept, so `r7 2.5` becomes 725.
//!
//! Pages record the versions they were written against with exactly these quirks in
//! mind, so they are reproduced as-is.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static LEADING_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d\.\d(?:\.\d)?).*").expect("leading version pattern is valid")
});

/// A version squashed into a comparable integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedVersion(u64);

impl NormalizedVersion {
    /// Normalize a raw version string.
    ///
    /// Returns `None` when no digits remain or the digits overflow a `u64`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = LEADING_VERSION.replace_all(raw, "${1}");
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        let value: u64 = digits.parse().ok()?;

        // Align `major.minor` with `major.minor.patch`
        if value < 100 {
            Some(Self(value * 10))
        } else {
            Some(Self(value))
        }
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Result of comparing a recorded version against a requested base version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// The target is newer than the base.
    Newer,
    Same,
    Older,
    /// One side had no usable digits.
    Incomparable,
}

impl Comparison {
    /// The `1 / 0 / -1` form, `None` for incomparable input.
    pub const fn signum(self) -> Option<i8> {
        match self {
            Self::Newer => Some(1),
            Self::Same => Some(0),
            Self::Older => Some(-1),
            Self::Incomparable => None,
        }
    }
}

impl From<Option<Ordering>> for Comparison {
    fn from(ordering: Option<Ordering>) -> Self {
        match ordering {
            Some(Ordering::Greater) => Self::Newer,
            Some(Ordering::Equal) => Self::Same,
            Some(Ordering::Less) => Self::Older,
            None => Self::Incomparable,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signum() {
            Some(sign) => write!(f, "{}", sign),
            None => f.write_str("incomparable"),
        }
    }
}

/// Order `target` against `base` after normalization.
///
/// `Some(Greater)` means the target is newer. `None` is returned for malformed input
/// on either side, and callers treat it as "not newer".
pub fn compare(base: &str, target: &str) -> Option<Ordering> {
    let base = NormalizedVersion::parse(base)?;
    let target = NormalizedVersion::parse(target)?;
    Some(target.cmp(&base))
}

/// Whether `target` is strictly newer than `base`.
pub fn is_newer(base: &str, target: &str) -> bool {
    compare(base, target) == Some(Ordering::Greater)
}
