//! Error types for texfrag-core

use std::path::{Path, PathBuf};

use texfrag_markup::MarkupError;
use texfrag_system_runtime::RuntimeError;
use thiserror::Error;

use crate::artifact::RenderError;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("No tabular content set before saving table '{name}'")]
    NoContent { name: String },

    #[error("Ambiguous float formatting for '{name}': need rounding or format")]
    MissingFormat { name: String },

    #[error("Value '{name}' is not a float; rounding and format specs only apply to floats")]
    InvalidScalarFormat { name: String },

    #[error("Invalid format spec '{spec}': {message}")]
    InvalidFormatSpec { spec: String, message: String },

    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    #[error("Nothing has been added to the container for '{name}'")]
    EmptyContainer { name: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Table conversion failed: {0}")]
    Markup(#[from] MarkupError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PublishError {
    pub(crate) fn filesystem(path: &Path, source: RuntimeError) -> Self {
        Self::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PublishError>;
