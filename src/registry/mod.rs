//! Emoji registry and the source merge that builds it.
//!
//! The registry is the canonical, deduplicated, ordered set of emoji records
//! for one build. Its order is first-reference order: the order in which
//! emojis are first met while walking categories in declaration order and
//! each category's members in file order. Atlas placement follows this
//! order, so it must be reproducible.
//!
//! # Example
//!
//! ```ignore
//! use mojipack::registry::RegistryBuilder;
//!
//! let mut builder = RegistryBuilder::new();
//! builder.add_definitions(definitions);
//! builder.add_skin_tones(skin_tones);
//! builder.add_category(category);
//!
//! let catalog = builder.build()?;
//! for record in catalog.registry.iter() { /* ... */ }
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::{MojiError, Result};
use crate::types::{Category, CategorySource, Codepoints, EmojiDefinition, EmojiRecord};

/// Ordered set of emoji records with lookup by codepoint sequence.
///
/// Immutable after construction; use `RegistryBuilder` to create one.
#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<EmojiRecord>,
    index: HashMap<Codepoints, usize>,
}

impl Registry {
    /// Get a record by codepoint sequence.
    pub fn get(&self, codepoints: &Codepoints) -> Option<&EmojiRecord> {
        self.index.get(codepoints).map(|&i| &self.records[i])
    }

    pub fn contains(&self, codepoints: &Codepoints) -> bool {
        self.index.contains_key(codepoints)
    }

    /// Position of an emoji in registry order.
    pub fn position(&self, codepoints: &Codepoints) -> Option<usize> {
        self.index.get(codepoints).copied()
    }

    /// Iterate records in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &EmojiRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[EmojiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, record: EmojiRecord) {
        self.index.insert(record.codepoints.clone(), self.records.len());
        self.records.push(record);
    }
}

/// The merged model: registry plus categories in declaration order.
#[derive(Debug)]
pub struct Catalog {
    pub registry: Registry,
    pub categories: Vec<Category>,
}

/// Builder collecting raw sources for the merge.
///
/// Sources may be added in any order; `build` sorts definitions by version
/// before merging.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: Vec<EmojiDefinition>,
    skin_tones: HashSet<Codepoints>,
    categories: Vec<CategorySource>,
}

impl RegistryBuilder {
    /// Create a new registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add definitions from one version source, in file order.
    pub fn add_definitions(&mut self, definitions: impl IntoIterator<Item = EmojiDefinition>) -> &mut Self {
        self.definitions.extend(definitions);
        self
    }

    /// Add emojis that support skin-tone modifiers.
    pub fn add_skin_tones(&mut self, skin_tones: impl IntoIterator<Item = Codepoints>) -> &mut Self {
        self.skin_tones.extend(skin_tones);
        self
    }

    /// Add a category. Categories keep the order they are added in.
    pub fn add_category(&mut self, category: CategorySource) -> &mut Self {
        self.categories.push(category);
        self
    }

    /// Add multiple categories.
    pub fn add_categories(&mut self, categories: impl IntoIterator<Item = CategorySource>) -> &mut Self {
        for category in categories {
            self.add_category(category);
        }
        self
    }

    /// Merge everything into a `Catalog`.
    ///
    /// Fails with `UnknownEmoji` on the first category member that no
    /// version source defines. Nothing is returned on failure.
    pub fn build(self) -> Result<Catalog> {
        let lookup = first_definitions(self.definitions);
        let mut registry = Registry::default();
        let mut categories = Vec::with_capacity(self.categories.len());

        for source in self.categories {
            let mut members: Vec<Codepoints> = Vec::new();
            let mut in_category: HashSet<&Codepoints> = HashSet::new();

            for emoji in &source.members {
                if !registry.contains(emoji) {
                    let definition = lookup.get(emoji).ok_or_else(|| MojiError::UnknownEmoji {
                        emoji: emoji.to_string(),
                        hex: emoji.hex(),
                        category: source.def.id.clone(),
                    })?;
                    let skin_tone_support = self.skin_tones.contains(emoji);
                    registry.push(EmojiRecord::from_definition(definition.clone(), skin_tone_support));
                }

                if in_category.insert(emoji) {
                    members.push(emoji.clone());
                }
            }

            categories.push(Category {
                id: source.def.id,
                name: source.def.name,
                members,
            });
        }

        Ok(Catalog {
            registry,
            categories,
        })
    }
}

/// Fold definitions into a lookup where the earliest version wins.
///
/// The sort is stable, so equal versions keep their insertion order and
/// the first of them wins too.
fn first_definitions(mut definitions: Vec<EmojiDefinition>) -> HashMap<Codepoints, EmojiDefinition> {
    definitions.sort_by(|a, b| a.version.cmp(&b.version));

    let mut lookup = HashMap::with_capacity(definitions.len());
    for definition in definitions {
        lookup.entry(definition.codepoints.clone()).or_insert(definition);
    }
    lookup
}
