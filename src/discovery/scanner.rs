//! File system scanner for source directories.
//!
//! Finds versioned definition files and SVG artwork. Both scans are flat
//! (no recursion) and return paths in a deterministic order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MojiError, Result};
use crate::types::Version;

/// List files directly inside `dir` whose extension is `ext`, sorted by name.
fn scan_flat(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MojiError::Io {
            path: dir.to_path_buf(),
            message: "Source directory does not exist".to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| MojiError::io(dir, "Failed to scan directory", e))?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(ext) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Find `<version>.json` definition files, ordered by ascending version.
///
/// Files with equal versions keep file-name order.
pub fn scan_definitions(dir: &Path) -> Result<Vec<(Version, PathBuf)>> {
    let mut versioned: Vec<(Version, PathBuf)> = scan_flat(dir, "json")?
        .into_iter()
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?.to_string();
            Some((Version::new(stem), path))
        })
        .collect();

    versioned.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(versioned)
}

/// Find SVG vector assets, sorted by file name.
pub fn scan_vector_assets(dir: &Path) -> Result<Vec<PathBuf>> {
    scan_flat(dir, "svg")
}
