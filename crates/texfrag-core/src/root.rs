/*
 * root.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A publishing root: folder convention, manifest and runtime handle.

use std::path::Path;
use std::sync::Arc;

use texfrag_system_runtime::SystemRuntime;
use tracing::debug;

use crate::config::{ManifestMode, RootConfig};
use crate::error::{PublishError, Result};
use crate::manifest::{MANIFEST_FILE_NAME, ManifestLog};
use crate::paths::PathConvention;

/// Lives for one publishing session.
///
/// Construction creates both folders and prepares the manifest. Afterwards
/// the manifest is only appended to.
pub struct PublishRoot {
    paths: PathConvention,
    manifest: ManifestLog,
    runtime: Arc<dyn SystemRuntime>,
}

impl std::fmt::Debug for PublishRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishRoot")
            .field("paths", &self.paths)
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}

impl PublishRoot {
    pub fn new(config: &RootConfig, runtime: Arc<dyn SystemRuntime>) -> Result<Self> {
        let paths = PathConvention::new(
            &config.root_path,
            &config.outer_folder,
            &config.inner_folder,
        );
        paths.ensure_folders(runtime.as_ref())?;

        let mut manifest = ManifestLog::new(
            paths.resolve_outer(MANIFEST_FILE_NAME),
            Arc::clone(&runtime),
        );
        match config.manifest {
            ManifestMode::Fresh => manifest.initialize(&config.outer_folder)?,
            ManifestMode::Continue => manifest.initialize_if_missing(&config.outer_folder)?,
        }
        debug!(
            root = %paths.root().display(),
            outer = paths.outer_folder(),
            inner = paths.inner_folder(),
            "Publish root ready"
        );

        Ok(Self {
            paths,
            manifest,
            runtime,
        })
    }

    pub fn paths(&self) -> &PathConvention {
        &self.paths
    }

    pub fn manifest(&self) -> &ManifestLog {
        &self.manifest
    }

    pub fn manifest_mut(&mut self) -> &mut ManifestLog {
        &mut self.manifest
    }

    pub fn manifest_path(&self) -> &Path {
        self.manifest.path()
    }

    pub fn runtime(&self) -> &dyn SystemRuntime {
        self.runtime.as_ref()
    }

    /// Write a file and map failures to `Filesystem` errors carrying `path`.
    pub(crate) fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.runtime
            .file_write(path, contents.as_bytes())
            .map_err(|e| PublishError::filesystem(path, e))
    }
}
