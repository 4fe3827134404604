//! Source discovery and loading for mojipack builds.
//!
//! A source root holds the emoji definitions, category lists and SVG
//! artwork. An optional `mojipack.yaml` in the root overrides the default
//! layout.
//!
//! # Example
//!
//! ```ignore
//! use mojipack::discovery::discover;
//!
//! let project = discover("./data", None)?;
//! let (builder, _) = project.load()?;
//! let catalog = builder.build()?;
//! ```

mod config;
mod loader;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::registry::RegistryBuilder;

pub use config::{Config, SourcePaths, DEFAULT_SIZE};
pub use loader::{load_sources, LoadSummary};
pub use scanner::{scan_definitions, scan_vector_assets};

/// The name of the config file looked up in the source root.
pub const CONFIG_FILENAME: &str = "mojipack.yaml";

/// A located source tree.
#[derive(Debug)]
pub struct Project {
    /// The source root directory.
    pub root: PathBuf,

    /// The loaded config (default if none was found).
    pub config: Config,

    /// Whether a config file was found.
    pub has_config: bool,

    /// Source paths resolved against `root`.
    pub paths: SourcePaths,
}

impl Project {
    /// Read and parse every source file.
    pub fn load(&self) -> Result<(RegistryBuilder, LoadSummary)> {
        load_sources(&self.paths)
    }
}

/// Locate a project rooted at `root`.
///
/// Uses `config_path` when given, otherwise `mojipack.yaml` in the root if
/// it exists, otherwise the default layout.
pub fn discover(root: impl AsRef<Path>, config_path: Option<&Path>) -> Result<Project> {
    let root = root.as_ref().to_path_buf();

    let (config, has_config) = match config_path {
        Some(path) => (Config::load(path)?, true),
        None => {
            let default_path = root.join(CONFIG_FILENAME);
            if default_path.exists() {
                (Config::load(&default_path)?, true)
            } else {
                (Config::default(), false)
            }
        }
    };

    let paths = config.source_paths(&root);

    Ok(Project {
        root,
        config,
        has_config,
        paths,
    })
}
