// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Semantic version management.
//!
//! Provides [`Version`] and [`PreReleaseField`] for parsing and ordering
//! version tags of the form `major.minor.patch[-tag[.number]]`. Pre-release
//! ordering is delegated to a [`TagComparer`]; the default ranks any custom
//! tag below `alpha` < `beta` < `rc`, and a release always ranks above a
//! pre-release of the same numeric triple.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Decides how two pre-release tags (`alpha`, `beta`, ...) order relative
/// to each other.
pub trait TagComparer {
    /// Compares two tag strings.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// The default tag ordering: custom tags < `alpha` < `beta` < `rc`.
///
/// Two distinct custom tags compare as equal; their numeric suffixes decide.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonTagComparer;

impl TagComparer for CommonTagComparer {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        const PRIORITY_ORDER: [&str; 3] = ["alpha", "beta", "rc"];
        let rank = |tag: &str| {
            PRIORITY_ORDER
                .iter()
                .position(|known| *known == tag)
                .map(|index| index as i32)
                .unwrap_or(-1)
        };
        rank(a).cmp(&rank(b))
    }
}

/// A semantic versioning pre-release field, e.g. `alpha`, `beta.1`, `rc.20`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreReleaseField {
    /// The textual tag, e.g. `alpha`.
    pub tag: String,
    /// The numeric suffix after the tag, `0` when absent.
    pub number: u32,
}

impl PreReleaseField {
    /// Creates a new pre-release field from a tag and numeric suffix.
    pub fn new(tag: impl Into<String>, number: u32) -> Self {
        Self {
            tag: tag.into(),
            number,
        }
    }

    /// Parses a pre-release field from text of the form `tag` or `tag.number`.
    ///
    /// Returns `None` for empty input. A non-numeric or missing suffix
    /// leaves the number at `0`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut parts = trimmed.splitn(2, '.');
        let tag = parts.next().unwrap_or_default().to_string();
        let number = parts
            .next()
            .and_then(|suffix| suffix.parse::<u32>().ok())
            .unwrap_or(0);
        Some(Self { tag, number })
    }

    /// Compares two fields using an explicit tag comparer.
    ///
    /// Equal tags fall through to the numeric suffix.
    pub fn compare_with(&self, other: &Self, comparer: &dyn TagComparer) -> Ordering {
        match comparer.compare(&self.tag, &other.tag) {
            Ordering::Equal => self.number.cmp(&other.number),
            ordering => ordering,
        }
    }
}

impl PartialOrd for PreReleaseField {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreReleaseField {
    /// Orders with the [`CommonTagComparer`].
    ///
    /// Ties between distinct custom tags break lexicographically, keeping
    /// the ordering consistent with equality.
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_with(other, &CommonTagComparer)
            .then_with(|| self.tag.cmp(&other.tag))
    }
}

impl fmt::Display for PreReleaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number == 0 {
            write!(f, "{}", self.tag)
        } else {
            write!(f, "{}.{}", self.tag, self.number)
        }
    }
}

/// A version in Semantic Versioning form.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// The major field.
    pub major: u32,
    /// The minor field.
    pub minor: u32,
    /// The patch field.
    pub patch: u32,
    /// The pre-release field, when present.
    pub pre_release: Option<PreReleaseField>,
}

impl Version {
    /// The zero version, `0.0.0`. Unparseable tags degrade to this value.
    pub const ZERO: Self = Self {
        major: 0,
        minor: 0,
        patch: 0,
        pre_release: None,
    };

    /// Creates a release version from its numeric triple.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
        }
    }

    /// Attaches a pre-release field to the version.
    #[must_use]
    pub fn with_pre_release(mut self, pre_release: PreReleaseField) -> Self {
        self.pre_release = Some(pre_release);
        self
    }

    /// Parses a version tag, returning `None` when the numeric triple is
    /// not three dot-separated integers.
    ///
    /// A tag with more than one `-` keeps the numeric triple and drops the
    /// pre-release part entirely.
    #[must_use]
    pub fn try_parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.trim().split('-').collect();
        let pre_release = if parts.len() == 2 {
            PreReleaseField::parse(parts[1])
        } else {
            None
        };

        let numbers: Vec<&str> = parts.first()?.split('.').collect();
        if numbers.len() != 3 {
            return None;
        }
        let major = numbers[0].parse::<u32>().ok()?;
        let minor = numbers[1].parse::<u32>().ok()?;
        let patch = numbers[2].parse::<u32>().ok()?;

        Some(Self {
            major,
            minor,
            patch,
            pre_release,
        })
    }

    /// Parses a version tag, degrading to [`Version::ZERO`] with a logged
    /// warning when the tag is not valid semantic versioning.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match Self::try_parse(text) {
            Some(version) => version,
            None => {
                log::warn!(
                    "Version tag {text} could not be parsed into a valid version. Use semantic versioning."
                );
                Self::ZERO
            }
        }
    }

    /// Compares two versions using an explicit pre-release tag comparer.
    pub fn compare_with(&self, other: &Self, comparer: &dyn TagComparer) -> Ordering {
        let numeric = self
            .major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch));
        if numeric != Ordering::Equal {
            return numeric;
        }

        // The one without the pre-release field is the bigger version.
        match (&self.pre_release, &other.pre_release) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.compare_with(b, comparer),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Orders with the [`CommonTagComparer`].
    ///
    /// Ties between distinct custom pre-release tags break
    /// lexicographically, keeping the ordering consistent with equality.
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_with(other, &CommonTagComparer)
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (Some(a), Some(b)) => a.tag.cmp(&b.tag),
                _ => Ordering::Equal,
            })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release() {
        let version = Version::parse("1.2.3");
        assert_eq!(version, Version::new(1, 2, 3));
        assert!(version.pre_release.is_none());
    }

    #[test]
    fn test_parse_pre_release() {
        let version = Version::parse("1.2.3-beta.4");
        assert_eq!(version.major, 1);
        assert_eq!(
            version.pre_release,
            Some(PreReleaseField::new("beta", 4))
        );
    }

    #[test]
    fn test_parse_invalid_degrades_to_zero() {
        assert_eq!(Version::parse("not-a-version"), Version::ZERO);
        assert_eq!(Version::parse("1.2"), Version::ZERO);
        assert_eq!(Version::try_parse("1.2.x"), None);
    }

    #[test]
    fn test_ordering_chain() {
        let alpha = Version::parse("1.2.3-alpha");
        let beta_1 = Version::parse("1.2.3-beta.1");
        let rc = Version::parse("1.2.3-rc");
        let release = Version::parse("1.2.3");
        assert!(alpha < beta_1);
        assert!(beta_1 < rc);
        assert!(rc < release);
    }

    #[test]
    fn test_custom_tag_ranks_below_alpha() {
        let custom = Version::parse("0.1.0-nightly.12");
        let alpha = Version::parse("0.1.0-alpha");
        assert!(custom < alpha);
    }

    #[test]
    fn test_numeric_triple_dominates() {
        assert!(Version::parse("2.0.0-alpha") > Version::parse("1.9.9"));
    }

    #[test]
    fn test_display_round_trip() {
        let version = Version::parse("3.1.4-rc.2");
        assert_eq!(version.to_string(), "3.1.4-rc.2");
        assert_eq!(Version::parse(&version.to_string()), version);
    }

    #[test]
    fn test_serde_round_trip() {
        let version = Version::parse("1.2.3-beta.4");
        let serialized = serde_json::to_string(&version).expect("version serializes");
        let deserialized: Version = serde_json::from_str(&serialized).expect("version parses");
        assert_eq!(deserialized, version);
    }
}
