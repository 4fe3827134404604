//! Project configuration (mojipack.yaml) parsing.
//!
//! The config names the source files relative to the source root and the
//! atlas sizes to build. Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MojiError, Result};

/// Default atlas cell size in pixels.
pub const DEFAULT_SIZE: u32 = 32;

/// Project configuration loaded from mojipack.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory of versioned definition files (`<version>.json`).
    pub definitions: PathBuf,

    /// Ordered category list.
    pub categories: PathBuf,

    /// Directory of per-category membership lists (`<id>.txt`).
    pub category_dir: PathBuf,

    /// List of emojis supporting skin-tone modifiers.
    pub skin_tones: PathBuf,

    /// Directory of SVG artwork named by hex codepoints.
    pub svg: PathBuf,

    /// Atlas pixel sizes to build.
    pub sizes: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            definitions: PathBuf::from("emoji"),
            categories: PathBuf::from("cats.yml"),
            category_dir: PathBuf::from("cats"),
            skin_tones: PathBuf::from("with-skin-tone-support.txt"),
            svg: PathBuf::from("svg"),
            sizes: vec![DEFAULT_SIZE],
        }
    }
}

impl Config {
    /// Load config from a mojipack.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MojiError::io(path, "Failed to read config", e))?;

        Self::parse(&content).map_err(|e| match e {
            MojiError::MalformedSource { message, help, .. } => MojiError::MalformedSource {
                path: path.to_path_buf(),
                message,
                help,
            },
            other => other,
        })
    }

    /// Parse config from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| MojiError::MalformedSource {
            path: PathBuf::from(super::CONFIG_FILENAME),
            message: format!("Invalid config: {}", e),
            help: Some("Check mojipack.yaml syntax".to_string()),
        })
    }

    /// Resolve every source path against the source root.
    pub fn source_paths(&self, root: &Path) -> SourcePaths {
        SourcePaths {
            definitions: root.join(&self.definitions),
            categories: root.join(&self.categories),
            category_dir: root.join(&self.category_dir),
            skin_tones: root.join(&self.skin_tones),
            svg: root.join(&self.svg),
        }
    }
}

/// Absolute (root-joined) locations of every source input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub definitions: PathBuf,
    pub categories: PathBuf,
    pub category_dir: PathBuf,
    pub skin_tones: PathBuf,
    pub svg: PathBuf,
}

impl SourcePaths {
    /// Membership list for one category.
    pub fn category_file(&self, id: &str) -> PathBuf {
        self.category_dir.join(format!("{}.txt", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse("svg: twemoji-svg\nsizes: [16, 32, 64]\n").unwrap();
        assert_eq!(config.svg, PathBuf::from("twemoji-svg"));
        assert_eq!(config.sizes, vec![16, 32, 64]);
        assert_eq!(config.categories, PathBuf::from("cats.yml"));
    }

    #[test]
    fn test_unknown_field_is_malformed() {
        let err = Config::parse("colums: 16\n").unwrap_err();
        assert!(matches!(err, MojiError::MalformedSource { .. }));
    }

    #[test]
    fn test_source_paths_join_root() {
        let paths = Config::default().source_paths(Path::new("/data"));
        assert_eq!(paths.definitions, PathBuf::from("/data/emoji"));
        assert_eq!(paths.category_file("people"), PathBuf::from("/data/cats/people.txt"));
    }

    #[test]
    fn test_load_reports_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mojipack.yaml");
        std::fs::write(&path, "sizes: nope\n").unwrap();

        match Config::load(&path).unwrap_err() {
            MojiError::MalformedSource { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
