use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mojipack operations.
///
/// Every variant is fatal: a build either produces a complete bundle or
/// stops with one of these.
#[derive(Error, Diagnostic, Debug)]
pub enum MojiError {
    #[error("Usage error: {message}")]
    #[diagnostic(code(mojipack::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unknown emoji `{emoji}` ({hex}) in category `{category}`")]
    #[diagnostic(
        code(mojipack::unknown_emoji),
        help("Add a definition for it to one of the emoji version files, or remove it from the category list")
    )]
    UnknownEmoji {
        emoji: String,
        hex: String,
        category: String,
    },

    #[error("Cannot find {size}px raster asset for emoji `{emoji}`; candidates are {}", .candidates.join(", "))]
    #[diagnostic(
        code(mojipack::missing_asset),
        help("Add an SVG named after one of the candidates, then delete the stale raster directory for that size")
    )]
    MissingAsset {
        emoji: String,
        size: u32,
        candidates: Vec<String>,
    },

    #[error("Malformed source {path}: {message}")]
    #[diagnostic(code(mojipack::malformed_source))]
    MalformedSource {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mojipack::io))]
    Io { path: PathBuf, message: String },

    #[error("Cannot rasterize {path}: {message}")]
    #[diagnostic(code(mojipack::raster))]
    Raster { path: PathBuf, message: String },
}

impl MojiError {
    /// Build an `Io` error for `path` from any displayable cause.
    pub fn io(path: impl Into<PathBuf>, context: &str, cause: impl std::fmt::Display) -> Self {
        MojiError::Io {
            path: path.into(),
            message: format!("{}: {}", context, cause),
        }
    }

    /// Build a `MalformedSource` error without help text.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MojiError::MalformedSource {
            path: path.into(),
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MojiError>;
