use std::fmt;

use crate::error::{ReleaseError, Result};

/// Represents a semantic version with major, minor, and patch components.
///
/// Ordering is lexicographic over (major, minor, patch), so the derived
/// `Ord` is the release ordering used when comparing a manifest version
/// against the last tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Represents the type of semantic version bump to apply.
///
/// "No bump" is expressed as `Option::<VersionBump>::None` by the commit
/// classifier, so an increment always has a concrete component to raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version string leniently.
    ///
    /// Strips a leading `v`, splits on dots and reads the first three segments.
    /// Missing or non-numeric segments become 0, so this never fails:
    ///
    /// ```ignore
    /// assert_eq!(Version::parse("v2.5"), Version::new(2, 5, 0));
    /// assert_eq!(Version::parse("1.x.3"), Version::new(1, 0, 3));
    /// assert_eq!(Version::parse(""), Version::new(0, 0, 0));
    /// ```
    pub fn parse(version: &str) -> Self {
        let clean = version.strip_prefix('v').unwrap_or(version);
        let mut parts = clean.split('.').map(leading_number);

        let major = parts.next().unwrap_or(0);
        let minor = parts.next().unwrap_or(0);
        let patch = parts.next().unwrap_or(0);

        Version::new(major, minor, patch)
    }

    /// Returns true when `self` sorts strictly after `other`.
    pub fn is_strictly_greater(&self, other: &Version) -> bool {
        self > other
    }

    /// Bumps a version according to the specified bump type.
    ///
    /// Increments the appropriate version component and resets lower components to 0:
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    ///
    /// Fails when the component to raise is already `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let next = match bump_type {
            VersionBump::Major => self.major.checked_add(1).map(|m| Version::new(m, 0, 0)),
            VersionBump::Minor => self
                .minor
                .checked_add(1)
                .map(|m| Version::new(self.major, m, 0)),
            VersionBump::Patch => self
                .patch
                .checked_add(1)
                .map(|p| Version::new(self.major, self.minor, p)),
        };

        next.ok_or_else(|| {
            ReleaseError::policy(format!(
                "cannot apply a {} bump to {}: component overflows",
                bump_type, self
            ))
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}

// "3-beta" reads as 3, "x" as 0
fn leading_number(segment: &str) -> u64 {
    let digits: String = segment
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
