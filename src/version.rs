use std::fmt;
use std::str::FromStr;

use crate::error::{BumpError, Result};

/// Represents a semantic version with major, minor, and patch components.
///
/// Only the `major.minor.patch` core is modelled; pre-release and build
/// metadata are not part of a manifest version assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Builds a version from the three textual components captured out of a manifest.
    ///
    /// # Returns
    /// * `Ok(Version)` - All components are non-negative integers that fit in `u32`
    /// * `Err(BumpError::Version)` - A component is empty, non-numeric or too large
    pub fn from_parts(major: &str, minor: &str, patch: &str) -> Result<Self> {
        Ok(Version::new(
            parse_component("major", major)?,
            parse_component("minor", minor)?,
            parse_component("patch", patch)?,
        ))
    }

    /// Returns the next patch version; major and minor are left unchanged.
    ///
    /// There is no rollover into minor: a patch already at `u32::MAX` is an error.
    ///
    /// # Example
    /// ```
    /// # use patch_bump::version::Version;
    /// assert_eq!(Version::new(1, 2, 3).bump_patch().unwrap(), Version::new(1, 2, 4));
    /// ```
    pub fn bump_patch(self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| {
            BumpError::version(format!("patch component of {} cannot be incremented", self))
        })?;

        Ok(Version { patch, ..self })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = BumpError;

    /// Parses `"major.minor.patch"`. Exactly three dot-separated components are required.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        match parts.as_slice() {
            [major, minor, patch] => Version::from_parts(major, minor, patch),
            _ => Err(BumpError::version(format!(
                "'{}' is not a major.minor.patch version",
                s
            ))),
        }
    }
}

fn parse_component(name: &str, raw: &str) -> Result<u32> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(BumpError::version(format!(
            "{} component '{}' is not a non-negative integer",
            name, raw
        )));
    }

    raw.parse::<u32>().map_err(|e| {
        BumpError::version(format!("{} component '{}' is out of range: {}", name, raw, e))
    })
}
