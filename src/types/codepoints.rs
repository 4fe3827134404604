//! Codepoint sequences, the identity key of every emoji.

use std::fmt;

/// Variation selector 16: requests emoji presentation of the preceding
/// character. Some artwork sets drop it from their file names.
pub const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// An ordered sequence of Unicode scalar values.
///
/// Two emojis are the same emoji iff their sequences are identical.
/// Displays as the emoji string itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codepoints(Vec<char>);

impl Codepoints {
    /// Create a sequence from individual scalar values.
    pub fn new(chars: Vec<char>) -> Self {
        Self(chars)
    }

    /// Split an emoji string into its scalar values.
    pub fn from_emoji(emoji: &str) -> Self {
        Self(emoji.chars().collect())
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the sequence contains `c` anywhere.
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// Copy of the sequence with every occurrence of `c` removed.
    pub fn without(&self, c: char) -> Self {
        Self(self.0.iter().copied().filter(|&x| x != c).collect())
    }

    /// Hyphen-joined lowercase hexadecimal form, e.g. `1f469-200d-1f4bb`.
    pub fn hex(&self) -> String {
        self.0
            .iter()
            .map(|c| format!("{:x}", *c as u32))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Codepoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl From<&str> for Codepoints {
    fn from(emoji: &str) -> Self {
        Self::from_emoji(emoji)
    }
}
