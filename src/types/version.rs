//! Version tags for emoji definition sources.

use std::cmp::Ordering;
use std::fmt;

/// One `.`-separated component of a version tag.
///
/// Numeric components sort before textual ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum VersionPart {
    Num(u64),
    Text(String),
}

/// A version tag such as `11.0` or `13.1`.
///
/// Ordering compares components numerically where possible, so `2.0`
/// sorts before `11.0`. Ties fall back to the raw tag text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    tag: String,
    parts: Vec<VersionPart>,
}

impl Version {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let parts = tag
            .split('.')
            .map(|part| match part.parse::<u64>() {
                Ok(n) => VersionPart::Num(n),
                Err(_) => VersionPart::Text(part.to_string()),
            })
            .collect();
        Self { tag, parts }
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts
            .cmp(&other.parts)
            .then_with(|| self.tag.cmp(&other.tag))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
