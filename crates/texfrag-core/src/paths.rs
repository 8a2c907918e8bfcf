/*
 * paths.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Two-tier folder convention.
//!
//! Raw artifact content (images, bare tabulars) lives in the *inner* folder.
//! Composed fragments that a document `\input`s live in the *outer* folder.
//! Both are subfolders of one root, and relative paths are expressed from
//! that root with `/` separators because that is what LaTeX sees.

use std::path::{Path, PathBuf};

use texfrag_system_runtime::SystemRuntime;
use tracing::debug;

use crate::error::{PublishError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConvention {
    root: PathBuf,
    outer_folder: String,
    inner_folder: String,
}

impl PathConvention {
    pub fn new(
        root: impl Into<PathBuf>,
        outer_folder: impl Into<String>,
        inner_folder: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            outer_folder: outer_folder.into(),
            inner_folder: inner_folder.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn outer_folder(&self) -> &str {
        &self.outer_folder
    }

    pub fn inner_folder(&self) -> &str {
        &self.inner_folder
    }

    pub fn outer_dir(&self) -> PathBuf {
        self.root.join(&self.outer_folder)
    }

    pub fn inner_dir(&self) -> PathBuf {
        self.root.join(&self.inner_folder)
    }

    pub fn resolve_inner(&self, name: &str) -> PathBuf {
        self.inner_dir().join(name)
    }

    pub fn resolve_outer(&self, name: &str) -> PathBuf {
        self.outer_dir().join(name)
    }

    pub fn relative_inner(&self, name: &str) -> String {
        format!("{}/{}", self.inner_folder, name)
    }

    pub fn relative_outer(&self, name: &str) -> String {
        format!("{}/{}", self.outer_folder, name)
    }

    /// Create both folders if absent. Safe to call repeatedly.
    pub fn ensure_folders(&self, runtime: &dyn SystemRuntime) -> Result<()> {
        for dir in [self.outer_dir(), self.inner_dir()] {
            debug!(dir = %dir.display(), "Ensuring folder");
            runtime
                .dir_create(&dir, true)
                .map_err(|e| PublishError::filesystem(&dir, e))?;
        }
        Ok(())
    }
}
