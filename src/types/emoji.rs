//! Emoji definitions and merged emoji records.

use std::collections::BTreeSet;

use super::{Codepoints, Version};

/// One emoji as defined by a single version source, before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiDefinition {
    pub codepoints: Codepoints,
    /// Display name, first letter capitalized.
    pub name: String,
    /// Lowercase search terms, including the lowercased name.
    pub keywords: BTreeSet<String>,
    /// Version tag of the source that defined it.
    pub version: Version,
}

impl EmojiDefinition {
    /// Create a definition, normalising the raw name and keywords.
    ///
    /// The name gets its first character uppercased. Keywords are trimmed
    /// and lowercased, empty entries are dropped and the lowercased name is
    /// always included.
    pub fn new<I, S>(codepoints: Codepoints, raw_name: &str, raw_keywords: I, version: Version) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = capitalize(raw_name.trim());
        let mut keywords = BTreeSet::new();
        keywords.insert(name.to_lowercase());

        for keyword in raw_keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() {
                keywords.insert(keyword);
            }
        }

        Self {
            codepoints,
            name,
            keywords,
            version,
        }
    }
}

/// A merged, registry-owned emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiRecord {
    pub codepoints: Codepoints,
    pub name: String,
    pub keywords: BTreeSet<String>,
    pub skin_tone_support: bool,
    /// Version under which the emoji was first defined.
    pub version: Version,
}

impl EmojiRecord {
    pub fn from_definition(definition: EmojiDefinition, skin_tone_support: bool) -> Self {
        Self {
            codepoints: definition.codepoints,
            name: definition.name,
            keywords: definition.keywords,
            skin_tone_support,
            version: definition.version,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
