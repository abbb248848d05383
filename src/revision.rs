//! The Debian revision part of a version, after the final hyphen.

use crate::segment::compare_segments;
use crate::ParseError;
use std::cmp::Ordering;
use std::str::FromStr;

/// Debian revision, `revision[~release]`.
#[derive(Debug, Clone)]
pub struct DebianRevision {
    revision: String,
    release: Option<String>,
}

impl DebianRevision {
    /// The revision run, up to the first `~`.
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// The release after `~`, if any. `Some("")` for a trailing bare `~`.
    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }
}

impl FromStr for DebianRevision {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(ParseError::malformed(text, "empty debian revision"));
        }
        if !text.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '.') {
            return Err(ParseError::malformed(
                text,
                "debian revision must start with an alphanumeric character or '.'",
            ));
        }

        let (revision, release) = match text.split_once('~') {
            Some((revision, release)) => (revision, Some(release.to_string())),
            None => (text, None),
        };
        Ok(DebianRevision {
            revision: revision.to_string(),
            release,
        })
    }
}

impl std::fmt::Display for DebianRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.revision)?;
        if let Some(release) = self.release.as_deref() {
            write!(f, "~{}", release)?;
        }
        Ok(())
    }
}

impl Ord for DebianRevision {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_segments(&self.revision, &other.revision).then_with(|| {
            match (self.release.as_deref(), other.release.as_deref()) {
                (Some(a), Some(b)) => compare_segments(a, b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    }
}

impl PartialOrd for DebianRevision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DebianRevision {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DebianRevision {}
