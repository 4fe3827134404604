//! Source loader - reads and parses every source file into a RegistryBuilder.

use std::fs;
use std::path::Path;

use crate::error::{MojiError, Result};
use crate::parser::{parse_category_defs, parse_definitions, parse_emoji_list};
use crate::registry::RegistryBuilder;
use crate::types::CategorySource;

use super::config::SourcePaths;
use super::scanner::scan_definitions;

/// Counts of what was loaded, for status output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub versions: usize,
    pub definitions: usize,
    pub skin_tones: usize,
    pub categories: usize,
}

/// Load all sources into a RegistryBuilder.
///
/// Definition files are added in ascending version order. The first
/// unreadable or malformed file aborts loading.
pub fn load_sources(paths: &SourcePaths) -> Result<(RegistryBuilder, LoadSummary)> {
    let mut builder = RegistryBuilder::new();
    let mut summary = LoadSummary::default();

    for (version, path) in scan_definitions(&paths.definitions)? {
        let source = read_source(&path)?;
        let definitions = parse_definitions(&source, &version, &path)?;
        summary.versions += 1;
        summary.definitions += definitions.len();
        builder.add_definitions(definitions);
    }

    let skin_tones = parse_emoji_list(&read_source(&paths.skin_tones)?);
    summary.skin_tones = skin_tones.len();
    builder.add_skin_tones(skin_tones);

    let defs = parse_category_defs(&read_source(&paths.categories)?, &paths.categories)?;
    for def in defs {
        let members = parse_emoji_list(&read_source(&paths.category_file(&def.id))?);
        builder.add_category(CategorySource::new(def, members));
        summary.categories += 1;
    }

    Ok((builder, summary))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| MojiError::io(path, "Failed to read source file", e))
}
