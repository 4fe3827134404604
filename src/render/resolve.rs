//! Codepoint-to-asset resolution.
//!
//! Raster assets are named by the hyphen-joined lowercase hex of their
//! codepoints. Artwork sets often drop U+FE0F from file names, so a
//! sequence containing it also gets a stripped candidate.

use std::path::{Path, PathBuf};

use crate::error::{MojiError, Result};
use crate::types::{Codepoints, VARIATION_SELECTOR_16};

/// File extension of rasterized assets.
pub const RASTER_EXT: &str = "png";

/// Candidate file stems for an emoji, most specific first.
///
/// Returns the full hex form, followed by the form without U+FE0F when the
/// sequence contains it. There are no other fallbacks.
pub fn asset_candidates(codepoints: &Codepoints) -> Vec<String> {
    let mut candidates = vec![codepoints.hex()];
    if codepoints.contains(VARIATION_SELECTOR_16) {
        candidates.push(codepoints.without(VARIATION_SELECTOR_16).hex());
    }
    candidates
}

/// Resolve an emoji to an existing raster asset in `dir`.
///
/// The first candidate that exists wins. `size` only feeds the error.
pub fn resolve_asset(dir: &Path, codepoints: &Codepoints, size: u32) -> Result<PathBuf> {
    let file_names: Vec<String> = asset_candidates(codepoints)
        .into_iter()
        .map(|stem| format!("{}.{}", stem, RASTER_EXT))
        .collect();

    file_names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| MojiError::MissingAsset {
            emoji: codepoints.to_string(),
            size,
            candidates: file_names,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_candidates_single() {
        let cp = Codepoints::from_emoji("😀");
        assert_eq!(asset_candidates(&cp), vec!["1f600"]);
    }

    #[test]
    fn test_candidates_with_variation_selector() {
        let cp = Codepoints::from_emoji("❤️");
        assert_eq!(asset_candidates(&cp), vec!["2764-fe0f", "2764"]);
    }

    #[test]
    fn test_candidates_strip_every_variation_selector() {
        let cp = Codepoints::new(vec!['\u{1F3F3}', '\u{FE0F}', '\u{200D}', '\u{1F308}']);
        assert_eq!(
            asset_candidates(&cp),
            vec!["1f3f3-fe0f-200d-1f308", "1f3f3-200d-1f308"]
        );
    }

    #[test]
    fn test_resolve_primary() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1f600.png"), b"").unwrap();

        let path = resolve_asset(dir.path(), &Codepoints::from_emoji("😀"), 32).unwrap();
        assert_eq!(path, dir.path().join("1f600.png"));
    }

    #[test]
    fn test_resolve_falls_back_to_stripped_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2764.png"), b"").unwrap();

        let path = resolve_asset(dir.path(), &Codepoints::from_emoji("❤️"), 32).unwrap();
        assert_eq!(path, dir.path().join("2764.png"));
    }

    #[test]
    fn test_resolve_prefers_first_candidate_when_both_exist() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2764.png"), b"").unwrap();
        fs::write(dir.path().join("2764-fe0f.png"), b"").unwrap();

        let path = resolve_asset(dir.path(), &Codepoints::from_emoji("❤️"), 32).unwrap();
        assert_eq!(path, dir.path().join("2764-fe0f.png"));
    }

    #[test]
    fn test_resolve_missing_lists_candidates() {
        let dir = tempdir().unwrap();

        let err = resolve_asset(dir.path(), &Codepoints::from_emoji("❤️"), 64).unwrap_err();
        match err {
            MojiError::MissingAsset { emoji, size, candidates } => {
                assert_eq!(emoji, "❤️");
                assert_eq!(size, 64);
                assert_eq!(candidates, vec!["2764-fe0f.png", "2764.png"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
