//! Parsers for mojipack source files.
//!
//! Each parser turns the text of one source file into already-validated
//! records. Structural problems are reported as `MalformedSource` errors
//! naming the file.
//!
//! # Usage
//!
//! ```ignore
//! use mojipack::parser::parse_definitions;
//!
//! let source = std::fs::read_to_string("emoji/11.0.json")?;
//! let defs = parse_definitions(&source, &Version::new("11.0"), path)?;
//! ```

pub mod categories;
pub mod definitions;
pub mod lists;

pub use categories::parse_category_defs;
pub use definitions::parse_definitions;
pub use lists::parse_emoji_list;
