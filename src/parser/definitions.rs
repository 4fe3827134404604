//! Versioned emoji definition parsing.
//!
//! Parses `<version>.json` files into `EmojiDefinition` instances. Each file
//! is a JSON array of records:
//!
//! ```json
//! [
//!   { "char": "😀", "name": "grinning face", "keywords": "face | grin" },
//!   { "char": "👋", "name": "waving hand", "keywords": ["hand", "wave"] }
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{MojiError, Result};
use crate::types::{Codepoints, EmojiDefinition, Version};

#[derive(Debug, Deserialize)]
struct RawDefinition {
    #[serde(rename = "char")]
    emoji: String,
    name: String,
    #[serde(default)]
    keywords: RawKeywords,
}

/// Keywords come either `|`-joined or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKeywords {
    Joined(String),
    List(Vec<String>),
}

impl Default for RawKeywords {
    fn default() -> Self {
        RawKeywords::List(Vec::new())
    }
}

impl RawKeywords {
    fn into_vec(self) -> Vec<String> {
        match self {
            RawKeywords::Joined(joined) => joined.split('|').map(|s| s.to_string()).collect(),
            RawKeywords::List(list) => list,
        }
    }
}

/// Parse one definition file tagged with `version`.
///
/// `origin` is only used for error context.
pub fn parse_definitions(source: &str, version: &Version, origin: &Path) -> Result<Vec<EmojiDefinition>> {
    let raw: Vec<RawDefinition> = serde_json::from_str(source).map_err(|e| MojiError::MalformedSource {
        path: origin.to_path_buf(),
        message: format!("Invalid emoji definitions: {}", e),
        help: Some("Expected a JSON array of {\"char\", \"name\", \"keywords\"} records".to_string()),
    })?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            if record.emoji.is_empty() {
                return Err(MojiError::malformed(
                    origin,
                    format!("record {} has an empty `char`", index),
                ));
            }
            if record.name.trim().is_empty() {
                return Err(MojiError::malformed(
                    origin,
                    format!("record {} (`{}`) has an empty `name`", index, record.emoji),
                ));
            }

            Ok(EmojiDefinition::new(
                Codepoints::from_emoji(&record.emoji),
                &record.name,
                record.keywords.into_vec(),
                version.clone(),
            ))
        })
        .collect()
}
