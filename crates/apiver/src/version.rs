//! API version type and parsing
//!
//! Versions are `major.minor` pairs with one extra inhabitant: the
//! *unspecified* sentinel, used for requests that carry no version and for
//! lifecycle stages that were never declared. The sentinel compares `false`
//! against everything in all four relational directions (including itself),
//! the same model the standard library uses for `f64` NaN.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// API version using `major.minor` numbering
///
/// Supports formats like:
/// - `1`, `2` (major only, minor defaults to 0)
/// - `1.0`, `1.2` (major.minor)
/// - absent (the unspecified sentinel)
///
/// Construction via [`ApiVersion::parse`] is total: a malformed string
/// degrades to `0.0` (the lowest possible version) while the raw text is
/// preserved for display. This keeps route-table construction from ever
/// failing on a bad annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVersion {
    /// Numeric value, absent for the unspecified sentinel
    numeric: Option<(u32, u32)>,
    /// Original string as written, preserved even when parsing degraded
    raw: Option<String>,
}

impl ApiVersion {
    /// Create a version from explicit numbers
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            numeric: Some((major, minor)),
            raw: Some(format!("{}.{}", major, minor)),
        }
    }

    /// The unspecified sentinel (no version given)
    pub fn unspecified() -> Self {
        Self {
            numeric: None,
            raw: None,
        }
    }

    /// Parse an optional version string; never fails
    ///
    /// `None` yields the sentinel. A malformed string yields `0.0` with the
    /// raw text kept for display. Segments beyond `major.minor` are ignored.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            None => Self::unspecified(),
            Some(s) => s.parse().unwrap_or_else(|_| Self {
                numeric: Some((0, 0)),
                raw: Some(s.to_string()),
            }),
        }
    }

    /// Whether a version was actually given
    pub fn is_specified(&self) -> bool {
        self.numeric.is_some()
    }

    /// Major number, absent for the sentinel
    pub fn major(&self) -> Option<u32> {
        self.numeric.map(|(major, _)| major)
    }

    /// Minor number, absent for the sentinel
    pub fn minor(&self) -> Option<u32> {
        self.numeric.map(|(_, minor)| minor)
    }

    /// Format as a path segment (e.g. `v1.0`), using the raw spelling
    pub fn as_path_segment(&self) -> String {
        format!("v{}", self)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.write_str(raw),
            None => f.write_str("None"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut parts = s.split('.');
        let major = parts
            .next()
            .ok_or(VersionParseError::Empty)?
            .parse()
            .map_err(|_| VersionParseError::InvalidNumber)?;
        let minor = match parts.next() {
            Some(part) => part.parse().map_err(|_| VersionParseError::InvalidNumber)?,
            None => 0,
        };

        Ok(Self {
            numeric: Some((major, minor)),
            raw: Some(s.to_string()),
        })
    }
}

impl PartialEq for ApiVersion {
    /// Equality on the numeric value only; the sentinel equals nothing,
    /// itself included, keeping `==` consistent with [`PartialOrd`]
    fn eq(&self, other: &Self) -> bool {
        match (self.numeric, other.numeric) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for ApiVersion {
    /// `None` whenever either side is the sentinel, so every relational
    /// operator evaluates to `false` for unspecified versions
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.numeric, other.numeric) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

/// Error type for strict version parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    /// Invalid number in version string
    #[error("invalid number in version")]
    InvalidNumber,
    /// Empty version string
    #[error("empty version string")]
    Empty,
}
