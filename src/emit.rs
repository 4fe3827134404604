//! Bundle writer.
//!
//! Serializes the registry, categories and atlases into the output
//! directory. Each artifact is encoded fully in memory, written to a
//! `.tmp` sibling and renamed into place, so a failure never leaves a
//! half-written file under the final name.

use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{MojiError, Result};
use crate::registry::Registry;
use crate::render::{Atlas, AtlasLocation};
use crate::types::Category;

/// Emoji metadata manifest.
pub const EMOJIS_FILE: &str = "emojis.json";

/// Category manifest.
pub const CATS_FILE: &str = "cats.json";

/// Atlas image file name for one size.
pub fn atlas_file_name(size: u32) -> String {
    format!("emojis-{}.png", size)
}

/// Location index file name for one size.
pub fn locations_file_name(size: u32) -> String {
    format!("emojis-png-locations-{}.json", size)
}

#[derive(Serialize)]
struct EmojiEntry<'a> {
    name: &'a str,
    keywords: &'a BTreeSet<String>,
    #[serde(rename = "has-skin-tone-support")]
    has_skin_tone_support: bool,
    version: &'a str,
}

/// `emojis.json` body: keyed by emoji string, in registry order.
struct EmojisJson<'a>(&'a Registry);

impl Serialize for EmojisJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for record in self.0.iter() {
            map.serialize_entry(
                &record.codepoints.to_string(),
                &EmojiEntry {
                    name: &record.name,
                    keywords: &record.keywords,
                    has_skin_tone_support: record.skin_tone_support,
                    version: record.version.as_str(),
                },
            )?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct CategoryEntry<'a> {
    id: &'a str,
    name: &'a str,
    emojis: Vec<String>,
}

/// Location index body: emoji string to `[x, y]`, in registry order.
struct LocationsJson<'a>(&'a [AtlasLocation]);

impl Serialize for LocationsJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for location in self.0 {
            map.serialize_entry(&location.emoji.to_string(), &[location.x, location.y])?;
        }
        map.end()
    }
}

/// Write `emojis.json` into `dir`.
pub fn write_emojis_json(registry: &Registry, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(EMOJIS_FILE);
    write_atomic(&path, &to_json(&EmojisJson(registry), &path)?)?;
    Ok(path)
}

/// Write `cats.json` into `dir`.
pub fn write_cats_json(categories: &[Category], dir: &Path) -> Result<PathBuf> {
    let entries: Vec<CategoryEntry> = categories
        .iter()
        .map(|cat| CategoryEntry {
            id: &cat.id,
            name: &cat.name,
            emojis: cat.members.iter().map(|m| m.to_string()).collect(),
        })
        .collect();

    let path = dir.join(CATS_FILE);
    write_atomic(&path, &to_json(&entries, &path)?)?;
    Ok(path)
}

/// Write one atlas image and its location index into `dir`.
///
/// Returns the image path and the index path.
pub fn write_atlas(atlas: &Atlas, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let image_path = dir.join(atlas_file_name(atlas.size));
    let mut png = Vec::new();
    atlas
        .canvas
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| MojiError::io(&image_path, "Failed to encode atlas", e))?;
    write_atomic(&image_path, &png)?;

    let index_path = dir.join(locations_file_name(atlas.size));
    write_atomic(&index_path, &to_json(&LocationsJson(&atlas.locations), &index_path)?)?;

    Ok((image_path, index_path))
}

fn to_json<T: Serialize>(value: &T, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| MojiError::io(path, "Failed to serialize", e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `bytes` to `path` via a temporary sibling and a rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, bytes).map_err(|e| MojiError::io(&tmp, "Failed to write", e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        MojiError::io(path, "Failed to move into place", e)
    })
}
