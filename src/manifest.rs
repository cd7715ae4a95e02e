//! The package manifest holding the declared version.
//!
//! A manifest is loaded into memory once, its version assignment is located
//! and mutated there, and the rendered document is written back in a single
//! scoped write. Only the digits of components whose value changes are
//! rewritten; everything else, including the spelling of untouched
//! components such as `02`, is reproduced byte for byte.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::Regex;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{BumpError, Result};
use crate::version::Version;

/// Matches a version assignment at the start of a line, e.g. `version = "1.2.3"`.
const VERSION_ASSIGNMENT: &str =
    r#"(?m)^[ \t]*version[ \t]*=[ \t]*"([0-9]+)\.([0-9]+)\.([0-9]+)""#;

/// A manifest file held in memory.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    content: String,
    /// Byte ranges of the major, minor and patch digits inside `content`.
    components: [Range<usize>; 3],
    version: Version,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// The file handle is closed before this returns; nothing is written.
    ///
    /// # Returns
    /// * `Ok(Manifest)` - The file contains a version assignment
    /// * `Err(BumpError::Manifest)` - The file is missing, unreadable, or has no version line
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut content = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut content))
            .map_err(|e| BumpError::manifest(path, format!("cannot read: {}", e)))?;

        Self::parse(path, content)
    }

    /// Parses manifest text that was read from `path`.
    ///
    /// Only the first matching line counts; any later `version = "..."` lines
    /// are left alone.
    pub fn parse(path: impl Into<PathBuf>, content: String) -> Result<Self> {
        let path = path.into();
        let pattern = Regex::new(VERSION_ASSIGNMENT)
            .map_err(|e| BumpError::manifest(&path, format!("invalid version pattern: {}", e)))?;

        let captures = pattern.captures(&content).ok_or_else(|| {
            BumpError::manifest(
                &path,
                "no version assignment of the form version = \"X.Y.Z\" found",
            )
        })?;

        let (Some(major), Some(minor), Some(patch)) =
            (captures.get(1), captures.get(2), captures.get(3))
        else {
            return Err(BumpError::manifest(&path, "incomplete version assignment"));
        };

        let version = Version::from_parts(major.as_str(), minor.as_str(), patch.as_str())?;
        let components = [major.range(), minor.range(), patch.range()];

        debug!(path = %path.display(), %version, offset = major.start(), "found version assignment");

        Ok(Manifest {
            path,
            content,
            components,
            version,
        })
    }

    /// Path the manifest was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The version currently declared in the in-memory document.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Replaces the declared version in the in-memory document.
    ///
    /// Components keep their written form unless their value changes.
    pub fn set_version(&mut self, version: Version) {
        let old = [self.version.major, self.version.minor, self.version.patch];
        let new = [version.major, version.minor, version.patch];

        // Back to front, so earlier ranges stay valid while later ones move.
        for i in (0..3).rev() {
            if old[i] == new[i] {
                continue;
            }

            let rendered = new[i].to_string();
            let range = self.components[i].clone();
            self.content.replace_range(range.clone(), &rendered);

            let end = range.start + rendered.len();
            self.components[i] = range.start..end;
            for later in &mut self.components[i + 1..] {
                let len = later.len();
                let start = later.start + end - range.end;
                *later = start..start + len;
            }
        }

        self.version = version;
    }

    /// The full document text, including any pending version change.
    pub fn render(&self) -> &str {
        &self.content
    }

    /// The line holding the version assignment, without its line terminator.
    pub fn version_line(&self) -> &str {
        let first = self.components[0].start;
        let last = self.components[2].end;

        let start = self.content[..first].rfind('\n').map_or(0, |i| i + 1);
        let end = self.content[last..]
            .find('\n')
            .map_or(self.content.len(), |i| last + i);

        self.content[start..end].trim_end_matches('\r')
    }

    /// Writes the document back to its path.
    ///
    /// The text goes to a temporary file next to the manifest which then
    /// replaces it, so a failed write leaves the original file untouched.
    /// The original file's permissions are carried over.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let permissions = fs::metadata(&self.path)
            .map_err(|e| BumpError::manifest(&self.path, format!("cannot stat: {}", e)))?
            .permissions();

        let mut staged = NamedTempFile::new_in(dir).map_err(|e| {
            BumpError::manifest(&self.path, format!("cannot create temporary file: {}", e))
        })?;
        staged
            .write_all(self.content.as_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .and_then(|_| staged.as_file().set_permissions(permissions))
            .map_err(|e| BumpError::manifest(&self.path, format!("cannot write: {}", e)))?;

        staged
            .persist(&self.path)
            .map_err(|e| BumpError::manifest(&self.path, format!("cannot replace: {}", e.error)))?;

        debug!(path = %self.path.display(), version = %self.version, "manifest written");
        Ok(())
    }
}
