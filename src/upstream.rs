//! The upstream part of a Debian version.
//!
//! An upstream version looks like `version[~qualifier][+upgrade]`. A qualifier marks a
//! pre-release and sorts before the plain version; an upgrade marks a later point release and
//! sorts after it.

use crate::segment::compare_segments;
use crate::ParseError;
use std::cmp::Ordering;
use std::str::FromStr;

/// Upstream version component, as published by the original author.
#[derive(Debug, Clone)]
pub struct UpstreamVersion {
    version: String,
    qualifier: Option<String>,
    upgrade: Option<String>,
}

impl UpstreamVersion {
    pub(crate) fn zero() -> Self {
        UpstreamVersion {
            version: "0".to_string(),
            qualifier: None,
            upgrade: None,
        }
    }

    /// The leading version run, up to the first `~`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The pre-release qualifier after `~`, if any.
    ///
    /// `Some("")` means the version ended in a bare `~`.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// The upgrade suffix after the `+` that ends the qualifier, if any.
    pub fn upgrade(&self) -> Option<&str> {
        self.upgrade.as_deref()
    }
}

impl FromStr for UpstreamVersion {
    type Err = ParseError;

    /// Split an upstream version into its version, qualifier and upgrade.
    ///
    /// # Example
    /// ```
    /// use debversion_order::upstream::UpstreamVersion;
    /// let v: UpstreamVersion = "1.0~rc1+b2".parse().unwrap();
    /// assert_eq!(v.version(), "1.0");
    /// assert_eq!(v.qualifier(), Some("rc1"));
    /// assert_eq!(v.upgrade(), Some("b2"));
    /// ```
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(ParseError::malformed(text, "missing upstream version"));
        }
        if !text.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ParseError::malformed(
                text,
                "upstream version must start with a digit",
            ));
        }

        let Some((version, rest)) = text.split_once('~') else {
            return Ok(UpstreamVersion {
                version: text.to_string(),
                qualifier: None,
                upgrade: None,
            });
        };

        // A '+' directly after the '~' is part of the qualifier.
        let skip = usize::from(rest.starts_with('+'));
        let (qualifier, upgrade) = match rest[skip..].find('+') {
            Some(i) => (&rest[..skip + i], Some(&rest[skip + i + 1..])),
            None => (rest, None),
        };

        Ok(UpstreamVersion {
            version: version.to_string(),
            qualifier: Some(qualifier.to_string()),
            upgrade: upgrade.map(str::to_string),
        })
    }
}

impl std::fmt::Display for UpstreamVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.version)?;
        if let Some(qualifier) = self.qualifier.as_deref() {
            write!(f, "~{}", qualifier)?;
        }
        if let Some(upgrade) = self.upgrade.as_deref() {
            write!(f, "+{}", upgrade)?;
        }
        Ok(())
    }
}

impl Ord for UpstreamVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_segments(&self.version, &other.version)
            .then_with(|| match (self.qualifier.as_deref(), other.qualifier.as_deref()) {
                (Some(a), Some(b)) => compare_segments(a, b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| match (self.upgrade.as_deref(), other.upgrade.as_deref()) {
                (Some(a), Some(b)) => compare_segments(a, b),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for UpstreamVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for UpstreamVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for UpstreamVersion {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> (String, Option<String>, Option<String>) {
        let v: UpstreamVersion = text.parse().unwrap();
        (v.version, v.qualifier, v.upgrade)
    }

    #[test]
    fn test_parse() {
        assert_eq!(parts("1.0"), ("1.0".to_string(), None, None));
        assert_eq!(
            parts("1.0~beta1"),
            ("1.0".to_string(), Some("beta1".to_string()), None)
        );
        assert_eq!(
            parts("1.0~rc1+b2+b3"),
            (
                "1.0".to_string(),
                Some("rc1".to_string()),
                Some("b2+b3".to_string())
            )
        );
        assert_eq!(
            parts("1.0~+foo"),
            ("1.0".to_string(), Some("+foo".to_string()), None)
        );
        assert_eq!(
            parts("1.0~a~b"),
            ("1.0".to_string(), Some("a~b".to_string()), None)
        );
        // Without a qualifier, '+' stays in the version run.
        assert_eq!(parts("1.0+patch1"), ("1.0+patch1".to_string(), None, None));
    }

    #[test]
    fn test_parse_empty_suffixes() {
        assert_eq!(parts("1.0~"), ("1.0".to_string(), Some(String::new()), None));
        assert_eq!(
            parts("1.0~rc1+"),
            ("1.0".to_string(), Some("rc1".to_string()), Some(String::new()))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<UpstreamVersion>().is_err());
        assert!("a1.0".parse::<UpstreamVersion>().is_err());
        assert!("~1".parse::<UpstreamVersion>().is_err());
    }

    #[test]
    fn test_display() {
        for s in ["1.0", "1.0~", "1.0~rc1", "1.0~rc1+b1", "1.0~rc1+", "1.0~+x", "2+dfsg"] {
            assert_eq!(s.parse::<UpstreamVersion>().unwrap().to_string(), s);
        }
    }

    fn cmp(a: &str, b: &str) -> Ordering {
        a.parse::<UpstreamVersion>()
            .unwrap()
            .cmp(&b.parse::<UpstreamVersion>().unwrap())
    }

    #[test]
    fn test_qualifier_order() {
        assert_eq!(cmp("1.0~beta1", "1.0"), Ordering::Less);
        assert_eq!(cmp("1.0", "1.0~beta1"), Ordering::Greater);
        assert_eq!(cmp("1.0~beta1", "1.0~beta2"), Ordering::Less);
        assert_eq!(cmp("1.0~", "1.0"), Ordering::Less);
        assert_eq!(cmp("1.0~", "1.0~a"), Ordering::Less);
    }

    #[test]
    fn test_upgrade_order() {
        assert_eq!(cmp("1.0~rc1+b1", "1.0~rc1"), Ordering::Greater);
        assert_eq!(cmp("1.0~rc1", "1.0~rc1+b1"), Ordering::Less);
        assert_eq!(cmp("1.0~rc1+b1", "1.0~rc1+b2"), Ordering::Less);
        assert_eq!(cmp("1.0+patch1", "1.0"), Ordering::Greater);
    }

    #[test]
    fn test_eq_is_ordering_equivalence() {
        assert_eq!(
            "1.01".parse::<UpstreamVersion>().unwrap(),
            "1.1".parse::<UpstreamVersion>().unwrap()
        );
    }
}
