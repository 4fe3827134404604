//! Category definitions and merged categories.

use super::Codepoints;

/// A category as declared in the category list: identity only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDef {
    pub id: String,
    pub name: String,
}

impl CategoryDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A declared category paired with its raw membership list in file order.
///
/// The list may contain duplicates; merging removes them.
#[derive(Debug, Clone)]
pub struct CategorySource {
    pub def: CategoryDef,
    pub members: Vec<Codepoints>,
}

impl CategorySource {
    pub fn new(def: CategoryDef, members: Vec<Codepoints>) -> Self {
        Self { def, members }
    }
}

/// A merged category: members in first-seen order, no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub members: Vec<Codepoints>,
}
