mod category;
mod codepoints;
mod emoji;
mod version;

pub use category::{Category, CategoryDef, CategorySource};
pub use codepoints::{Codepoints, VARIATION_SELECTOR_16};
pub use emoji::{EmojiDefinition, EmojiRecord};
pub use version::Version;
