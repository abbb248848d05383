//! Segment-wise comparison of version strings.
//!
//! A version string is cut into maximal runs of ASCII digits, ASCII letters, or anything
//! else. Runs are compared pairwise, and the first pair that differs decides the ordering.

use num_bigint::BigUint;
use std::cmp::Ordering;

/// A maximal run of characters from one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A run of ASCII digits.
    Numeric(&'a str),

    /// A run of ASCII letters.
    Alphabetic(&'a str),

    /// A run of characters that are neither ASCII digits nor ASCII letters.
    Other(&'a str),
}

impl<'a> Segment<'a> {
    /// The text of the run.
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Numeric(s) | Segment::Alphabetic(s) | Segment::Other(s) => s,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Segment::Numeric(_) => 0,
            Segment::Alphabetic(_) => 1,
            Segment::Other(_) => 2,
        }
    }
}

fn numeric_value(digits: &str) -> BigUint {
    digits.bytes().fold(BigUint::ZERO, |acc, d| {
        acc * 10u32 + u32::from(d - b'0')
    })
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Numeric(a), Segment::Numeric(b)) => numeric_value(a).cmp(&numeric_value(b)),
            (Segment::Alphabetic(a), Segment::Alphabetic(b)) | (Segment::Other(a), Segment::Other(b)) => {
                a.cmp(b)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
    Digit,
    Letter,
    Other,
}

impl Class {
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            Class::Digit
        } else if c.is_ascii_alphabetic() {
            Class::Letter
        } else {
            Class::Other
        }
    }
}

/// Iterator over the segments of a string, see [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let class = Class::of(first);
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| Class::of(*c) != class)
            .map_or(self.rest.len(), |(i, _)| i);
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(match class {
            Class::Digit => Segment::Numeric(run),
            Class::Letter => Segment::Alphabetic(run),
            Class::Other => Segment::Other(run),
        })
    }
}

/// Split a string into its digit, letter and other runs.
///
/// # Example
/// ```
/// use debversion_order::segment::{segments, Segment};
/// let parts: Vec<_> = segments("1.0rc2").collect();
/// assert_eq!(parts, vec![
///     Segment::Numeric("1"),
///     Segment::Other("."),
///     Segment::Numeric("0"),
///     Segment::Alphabetic("rc"),
///     Segment::Numeric("2"),
/// ]);
/// ```
pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

/// Compare two version fragments segment by segment.
///
/// Digit runs compare by numeric value, a digit run sorts before anything else, and a letter
/// run sorts before a run of other characters. Runs of the same non-numeric class compare by
/// code point. When one side runs out of segments first, it is the smaller one.
///
/// # Example
/// ```
/// use debversion_order::segment::compare_segments;
/// use std::cmp::Ordering;
/// assert_eq!(compare_segments("1.0.10", "1.0.9"), Ordering::Greater);
/// assert_eq!(compare_segments("007", "7"), Ordering::Equal);
/// ```
pub fn compare_segments(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => {}
                res => return res,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        assert_eq!(segments("").count(), 0);
        assert_eq!(
            segments("10.b-~x").collect::<Vec<_>>(),
            vec![
                Segment::Numeric("10"),
                Segment::Other("."),
                Segment::Alphabetic("b"),
                Segment::Other("-~"),
                Segment::Alphabetic("x"),
            ]
        );
        // Non-ASCII letters are not letters here.
        assert_eq!(
            segments("aé1").collect::<Vec<_>>(),
            vec![
                Segment::Alphabetic("a"),
                Segment::Other("é"),
                Segment::Numeric("1"),
            ]
        );
    }

    #[test]
    fn test_segment_order() {
        assert!(Segment::Numeric("99") < Segment::Alphabetic("a"));
        assert!(Segment::Numeric("99") < Segment::Other("."));
        assert!(Segment::Alphabetic("zz") < Segment::Other("+"));
        assert!(Segment::Other("+") < Segment::Other("."));
        assert_eq!(
            Segment::Numeric("0010").cmp(&Segment::Numeric("10")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_numeric_beyond_u64() {
        assert_eq!(
            compare_segments("18446744073709551616", "18446744073709551615"),
            Ordering::Greater
        );
        assert_eq!(
            compare_segments("0000000000000000000000001", "1"),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_segments() {
        assert_eq!(compare_segments("", ""), Ordering::Equal);
        assert_eq!(compare_segments("10", "9"), Ordering::Greater);
        assert_eq!(compare_segments("a10", "a9"), Ordering::Greater);
        assert_eq!(compare_segments("1.0.10", "1.0.9"), Ordering::Greater);
        assert_eq!(compare_segments("1.0", "1.0.0"), Ordering::Less);
        assert_eq!(compare_segments("1.0a", "1.0"), Ordering::Greater);
        assert_eq!(compare_segments("1a", "1+"), Ordering::Less);
        assert_eq!(compare_segments("1+", "1a"), Ordering::Greater);
        assert_eq!(compare_segments("1", "a"), Ordering::Less);
        assert_eq!(compare_segments("abc", "abd"), Ordering::Less);
        assert_eq!(compare_segments("1.2", "1+2"), Ordering::Greater);
    }

    #[test]
    fn test_antisymmetric() {
        let samples = ["", "0", "1", "01", "1.0", "1a", "a1", "+", "1.0+b", "rc1", "~"];
        for a in samples {
            for b in samples {
                assert_eq!(compare_segments(a, b), compare_segments(b, a).reverse(), "{a} vs {b}");
            }
        }
    }
}
