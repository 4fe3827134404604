//! Line-oriented emoji lists.
//!
//! Used by both category membership files and the skin-tone support file.
//! Each non-blank line starts with an emoji; anything after the first whitespace
//! is annotation and ignored:
//!
//! ```text
//! 😀 grinning face
//! ❤️
//! ```
//!
//! There is no comment syntax: `#️⃣` is a valid leading emoji.

use crate::types::Codepoints;

/// Parse an emoji list, keeping file order and duplicates.
pub fn parse_emoji_list(source: &str) -> Vec<Codepoints> {
    source
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(Codepoints::from_emoji)
        .collect()
}
