//! mojipack - Emoji picker bundle builder
//!
//! Merges versioned emoji definitions and category lists into one ordered
//! registry, rasterizes SVG artwork at each requested size, and packs the
//! results into fixed-grid sprite atlases with per-glyph location indexes.

pub mod cli;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod output;
pub mod parser;
pub mod registry;
pub mod render;
pub mod types;

pub use discovery::{discover, Config, Project, SourcePaths};
pub use emit::{write_atlas, write_cats_json, write_emojis_json};
pub use error::{MojiError, Result};
pub use registry::{Catalog, Registry, RegistryBuilder};
pub use render::{
    asset_candidates, rasterize_all, resolve_asset, Atlas, AtlasLocation, AtlasPacker, Rasterize,
    SvgRasterizer,
};
pub use types::{Category, CategoryDef, CategorySource, Codepoints, EmojiDefinition, EmojiRecord, Version};
