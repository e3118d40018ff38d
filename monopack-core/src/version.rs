//! Lenient version comparison for npm-style version strings.
//!
//! Accepts partial versions (`1`, `1.2`), wildcard components (`1.x`, `1.*`),
//! an optional `v` prefix, pre-release tags and build metadata.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^v?\d+(\.([x*]|\d+)(\.([x*]|\d+)(\.([x*]|\d+))?(-[\da-z\-]+(\.[\da-z\-]+)*)?(\+[\da-z\-]+(\.[\da-z\-]+)*)?)?)?$",
    )
    .expect("version pattern is valid")
});

/// One dot-separated pre-release identifier.
///
/// Numeric identifiers sort below alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Identifier {
    Numeric(u64),
    Alpha(String),
}

impl Identifier {
    fn parse(part: &str) -> Self {
        match part.parse::<u64>() {
            Ok(n) => Identifier::Numeric(n),
            Err(_) => Identifier::Alpha(part.to_string()),
        }
    }
}

struct LooseVersion {
    /// `None` marks a wildcard component.
    core: Vec<Option<u64>>,
    /// Compared element-wise; a shorter list ranks lower when it is a prefix.
    pre: Option<Vec<Identifier>>,
}

impl LooseVersion {
    fn parse(input: &str) -> Result<Self> {
        if !VERSION_PATTERN.is_match(input) {
            return Err(Error::InvalidVersion(input.to_string()));
        }

        let stripped = input.strip_prefix(['v', 'V']).unwrap_or(input);
        let stripped = stripped.split('+').next().unwrap_or(stripped);
        let (core, pre) = match stripped.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (stripped, None),
        };

        let core = core
            .split('.')
            .map(|part| match part {
                "x" | "X" | "*" => Ok(None),
                digits => digits
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| Error::InvalidVersion(input.to_string())),
            })
            .collect::<Result<Vec<_>>>()?;

        let pre = pre.map(|p| p.split('.').map(Identifier::parse).collect());

        Ok(Self { core, pre })
    }
}

/// Compares two version strings.
///
/// Missing components count as `0` and wildcard components match anything.
/// A release ranks above any of its pre-releases. Build metadata is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidVersion`] if either string is not a valid version.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering> {
    let a = LooseVersion::parse(a)?;
    let b = LooseVersion::parse(b)?;

    let width = a.core.len().max(b.core.len());
    for i in 0..width {
        let left = a.core.get(i).copied().unwrap_or(Some(0));
        let right = b.core.get(i).copied().unwrap_or(Some(0));
        if let (Some(left), Some(right)) = (left, right) {
            match left.cmp(&right) {
                Ordering::Equal => {}
                other => return Ok(other),
            }
        }
    }

    Ok(match (&a.pre, &b.pre) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Removes range operators (`^`, `>`, `<`, `=`) from a version constraint.
pub fn strip_range_operators(constraint: &str) -> String {
    constraint
        .chars()
        .filter(|c| !matches!(c, '^' | '>' | '<' | '='))
        .collect()
}
