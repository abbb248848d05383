//! Debian version type, ordered as described in Section 5.6.12 of the Debian Policy Manual
//!
//! This crate can be used for dissecting and comparing Debian version strings of the form
//! `[epoch:]upstream_version[-debian_revision]`.
//!
//! Two kinds of sameness are kept apart: [`Version::compare`] tells whether two versions are
//! equivalent under Debian ordering, while `==` tells whether they are the same version string.
//! `"1.01"` and `"1.1"` compare as equal but are not `==`.
//!
//! # Example
//! ```
//! use debversion_order::Version;
//! use std::cmp::Ordering;
//!
//! let old: Version = "1.0~beta1-1".parse().unwrap();
//! let new: Version = "1:0.9".parse().unwrap();
//! assert_eq!(old.compare(&new), Ordering::Less);
//! assert_eq!(new.to_string(), "1:0.9");
//! ```

use lazy_regex::regex;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub mod revision;
pub mod segment;
pub mod upstream;

pub use revision::DebianRevision;
pub use segment::compare_segments;
pub use upstream::UpstreamVersion;

/// Error returned when a version string can not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not have the `[epoch:]upstream_version[-debian_revision]` shape.
    MalformedVersion {
        /// The offending input.
        raw: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl ParseError {
    pub(crate) fn malformed(raw: &str, reason: &'static str) -> Self {
        ParseError::MalformedVersion {
            raw: raw.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            ParseError::MalformedVersion { raw, .. } => raw,
        }
    }

    /// Short description of the problem.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::MalformedVersion { reason, .. } => reason,
        }
    }

    fn with_raw(self, raw: &str) -> Self {
        ParseError::malformed(raw, self.reason())
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Invalid debian version {:?}: {}", self.raw(), self.reason())
    }
}

impl std::error::Error for ParseError {}

/// A Debian version string
#[derive(Debug, Clone)]
pub struct Version {
    epoch: Option<u32>,
    upstream_version: UpstreamVersion,
    debian_revision: Option<DebianRevision>,
}

impl Version {
    /// Build a version from its parts.
    ///
    /// The upstream version and revision go through the same checks as when parsing.
    ///
    /// # Example
    /// ```
    /// use debversion_order::Version;
    /// let v = Version::from_parts(Some(2), "1.0~rc1", Some("3")).unwrap();
    /// assert_eq!(v.to_string(), "2:1.0~rc1-3");
    /// assert!(Version::from_parts(None, "", None).is_err());
    /// ```
    pub fn from_parts(
        epoch: Option<u32>,
        upstream_version: &str,
        debian_revision: Option<&str>,
    ) -> Result<Self, ParseError> {
        let raw = || {
            let mut raw = String::new();
            if let Some(epoch) = epoch {
                raw.push_str(&format!("{}:", epoch));
            }
            raw.push_str(upstream_version);
            if let Some(revision) = debian_revision {
                raw.push_str(&format!("-{}", revision));
            }
            raw
        };
        if epoch.is_none() && upstream_version.contains(':') {
            return Err(ParseError::malformed(&raw(), "colon without a numeric epoch"));
        }
        if debian_revision.is_none() && upstream_version.contains('-') {
            return Err(ParseError::malformed(&raw(), "hyphen without a debian revision"));
        }
        if debian_revision.is_some_and(|r| r.contains('-')) {
            return Err(ParseError::malformed(&raw(), "hyphen in debian revision"));
        }
        let upstream_version = upstream_version
            .parse()
            .map_err(|e: ParseError| e.with_raw(&raw()))?;
        let debian_revision = debian_revision
            .map(|r| r.parse().map_err(|e: ParseError| e.with_raw(&raw())))
            .transpose()?;
        Ok(Version {
            epoch,
            upstream_version,
            debian_revision,
        })
    }

    /// The smallest version, `0`, useful when nothing is installed yet.
    pub fn empty() -> Self {
        Version {
            epoch: None,
            upstream_version: UpstreamVersion::zero(),
            debian_revision: None,
        }
    }

    /// The epoch, only `Some` if it was given explicitly.
    pub fn epoch(&self) -> Option<u32> {
        self.epoch
    }

    /// The epoch used for ordering, `0` when absent.
    pub fn epoch_assumed(&self) -> u32 {
        self.epoch.unwrap_or(0)
    }

    pub fn upstream_version(&self) -> &UpstreamVersion {
        &self.upstream_version
    }

    pub fn debian_revision(&self) -> Option<&DebianRevision> {
        self.debian_revision.as_ref()
    }

    /// Compare two versions under Debian ordering.
    ///
    /// Unlike `==`, this reports [`Ordering::Equal`] for versions that merely sort the same,
    /// such as `1.01` and `1.1`.
    pub fn compare(&self, other: &Self) -> Ordering {
        compare_versions(self, other)
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::empty()
    }
}

/// The smallest version, equal to parsing `"0"`.
///
/// # Example
/// ```
/// use debversion_order::{empty_version, parse_version};
/// assert!(empty_version() < parse_version("0.0.1").unwrap());
/// assert_eq!(empty_version(), parse_version("0").unwrap());
/// ```
pub fn empty_version() -> Version {
    Version::empty()
}

/// Parse a version string.
pub fn parse_version(text: &str) -> Result<Version, ParseError> {
    text.parse()
}

/// Order two versions by epoch, then upstream version, then Debian revision.
///
/// A missing epoch counts as `0`. A version with a Debian revision sorts after the same version
/// without one. This can be handed directly to sorting functions.
///
/// # Example
/// ```
/// use debversion_order::{compare_versions, Version};
/// let mut versions: Vec<Version> = ["1.0-1", "1:0.1", "1.0~rc1", "1.0"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// versions.sort_by(compare_versions);
/// let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
/// assert_eq!(sorted, vec!["1.0~rc1", "1.0", "1.0-1", "1:0.1"]);
/// ```
pub fn compare_versions(a: &Version, b: &Version) -> Ordering {
    a.epoch_assumed()
        .cmp(&b.epoch_assumed())
        .then_with(|| a.upstream_version.cmp(&b.upstream_version))
        .then_with(|| match (&a.debian_revision, &b.debian_revision) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        })
}

/// Comparator object for places that want one rather than a function.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VersionComparator;

impl VersionComparator {
    pub fn compare(&self, a: &Version, b: &Version) -> Ordering {
        compare_versions(a, b)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let reject = |reason: &'static str| {
            log::debug!("Rejecting version {:?}: {}", text, reason);
            ParseError::malformed(text, reason)
        };

        if text.is_empty() {
            return Err(reject("empty version"));
        }
        let c = regex!(r"^(?:(?P<epoch>\d+):)?(?P<rest>.+)$")
            .captures(text)
            .ok_or_else(|| reject("expected [epoch:]upstream_version[-debian_revision]"))?;

        let epoch = c
            .name("epoch")
            .map(|e| e.as_str().parse::<u32>().map_err(|_| reject("epoch out of range")))
            .transpose()?;
        let rest = c.name("rest").map_or("", |r| r.as_str());
        if epoch.is_none() && rest.contains(':') {
            return Err(reject("colon without a numeric epoch"));
        }

        let (upstream_version, debian_revision) = match rest.rsplit_once('-') {
            Some((upstream, revision)) => (upstream, Some(revision)),
            None => (rest, None),
        };

        let upstream_version = upstream_version
            .parse::<UpstreamVersion>()
            .map_err(|e| reject(e.reason()))?;
        let debian_revision = debian_revision
            .map(|r| r.parse::<DebianRevision>().map_err(|e| reject(e.reason())))
            .transpose()?;

        log::trace!(
            "Parsed version {:?}: epoch={:?} upstream={:?} revision={:?}",
            text,
            epoch,
            upstream_version,
            debian_revision
        );

        Ok(Version {
            epoch,
            upstream_version,
            debian_revision,
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(epoch) = self.epoch {
            write!(f, "{}:", epoch)?;
        }
        write!(f, "{}", self.upstream_version)?;
        if let Some(debian_revision) = self.debian_revision.as_ref() {
            write!(f, "-{}", debian_revision)?;
        }
        Ok(())
    }
}

/// Two versions are equal when they render to the same string.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// Debian ordering, with ties between distinct strings broken on the rendered string so that
/// the order agrees with `==`. Use [`Version::compare`] for the plain Debian ordering.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(self, other).then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "sqlx")]
use sqlx::{postgres::PgTypeInfo, Postgres};

#[cfg(feature = "sqlx")]
impl sqlx::Type<Postgres> for Version {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("debversion")
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::Encode<'_, Postgres> for Version {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'_, Postgres>>::encode_by_ref(&self.to_string().as_str(), buf)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::Decode<'r, Postgres> for Version {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let text = <&'r str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        Ok(text.parse::<Version>()?)
    }
}

#[cfg(feature = "python-debian")]
impl<'py> pyo3::IntoPyObject<'py> for Version {
    type Target = pyo3::PyAny;
    type Output = pyo3::Bound<'py, pyo3::PyAny>;
    type Error = pyo3::PyErr;

    fn into_pyobject(self, py: pyo3::Python<'py>) -> Result<Self::Output, Self::Error> {
        use pyo3::prelude::*;
        let debian_support = py.import("debian.debian_support")?;
        debian_support.getattr("Version")?.call1((self.to_string(),))
    }
}

#[cfg(feature = "python-debian")]
impl<'py> pyo3::FromPyObject<'py> for Version {
    fn extract_bound(ob: &pyo3::Bound<'py, pyo3::PyAny>) -> pyo3::PyResult<Self> {
        use pyo3::prelude::*;
        let text: String = ob.str()?.extract()?;
        text.parse()
            .map_err(|e: ParseError| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }
}
