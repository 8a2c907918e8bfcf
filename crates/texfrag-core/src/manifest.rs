/*
 * manifest.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Append-only log of every include directive issued for a root.
//!
//! Layout: a three-line banner followed by one block per published
//! fragment. Blocks carry their own leading blank line and trailing newline.
//!
//! ```text
//! =============================
//! SUMMARY OF ALL FIGURES INPUTS
//! =============================
//!
//! % Figure input: returns %
//! \input{Figures/returns}
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use texfrag_system_runtime::SystemRuntime;
use tracing::debug;

use crate::error::{PublishError, Result};

/// File name of the manifest inside the outer folder.
pub const MANIFEST_FILE_NAME: &str = "inputs.txt";

pub struct ManifestLog {
    path: PathBuf,
    runtime: Arc<dyn SystemRuntime>,
    appended: usize,
}

impl std::fmt::Debug for ManifestLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestLog")
            .field("path", &self.path)
            .field("appended", &self.appended)
            .finish()
    }
}

impl ManifestLog {
    pub fn new(path: impl Into<PathBuf>, runtime: Arc<dyn SystemRuntime>) -> Self {
        Self {
            path: path.into(),
            runtime,
            appended: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries appended through this log.
    pub fn appended(&self) -> usize {
        self.appended
    }

    /// The three banner lines for a root label.
    pub fn banner(root_label: &str) -> String {
        let title = format!("Summary of all {} inputs", root_label).to_uppercase();
        let rule = "=".repeat(title.chars().count());
        format!("{rule}\n{title}\n{rule}\n")
    }

    /// Truncate the manifest and write a fresh banner.
    pub fn initialize(&mut self, root_label: &str) -> Result<()> {
        debug!(manifest = %self.path.display(), "Initializing manifest");
        self.runtime
            .file_write(&self.path, Self::banner(root_label).as_bytes())
            .map_err(|e| PublishError::filesystem(&self.path, e))?;
        self.appended = 0;
        Ok(())
    }

    /// Keep an existing manifest; write the banner only if there is none.
    pub fn initialize_if_missing(&mut self, root_label: &str) -> Result<()> {
        let exists = self
            .runtime
            .is_file(&self.path)
            .map_err(|e| PublishError::filesystem(&self.path, e))?;
        if exists {
            debug!(manifest = %self.path.display(), "Continuing existing manifest");
            return Ok(());
        }
        self.initialize(root_label)
    }

    /// Append an entry verbatim.
    pub fn append(&mut self, entry: &str) -> Result<()> {
        self.runtime
            .file_append(&self.path, entry.as_bytes())
            .map_err(|e| PublishError::filesystem(&self.path, e))?;
        self.appended += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texfrag_system_runtime::NativeRuntime;

    fn log_in(dir: &Path) -> ManifestLog {
        ManifestLog::new(dir.join(MANIFEST_FILE_NAME), Arc::new(NativeRuntime::new()))
    }

    #[test]
    fn test_banner() {
        let rule = "=".repeat(28);
        assert_eq!(
            ManifestLog::banner("Tables"),
            format!("{rule}\nSUMMARY OF ALL TABLES INPUTS\n{rule}\n")
        );
    }

    #[test]
    fn test_initialize_truncates() {
        let temp = tempfile::tempdir().unwrap();
        let mut log = log_in(temp.path());

        log.initialize("Figures").unwrap();
        log.append("\n% one %\n").unwrap();
        assert_eq!(log.appended(), 1);

        let mut again = log_in(temp.path());
        again.initialize("Figures").unwrap();
        let content = std::fs::read_to_string(again.path()).unwrap();
        assert_eq!(content, ManifestLog::banner("Figures"));
        assert_eq!(again.appended(), 0);
    }

    #[test]
    fn test_append_is_verbatim_and_ordered() {
        let temp = tempfile::tempdir().unwrap();
        let mut log = log_in(temp.path());
        log.initialize("Values").unwrap();
        log.append("first\n").unwrap();
        log.append("first\n").unwrap();
        log.append("second").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let expected = format!("{}first\nfirst\nsecond", ManifestLog::banner("Values"));
        assert_eq!(content, expected);
    }

    #[test]
    fn test_initialize_if_missing_keeps_entries() {
        let temp = tempfile::tempdir().unwrap();
        let mut log = log_in(temp.path());
        log.initialize_if_missing("Figures").unwrap();
        log.append("kept\n").unwrap();

        let mut next = log_in(temp.path());
        next.initialize_if_missing("Figures").unwrap();
        let content = std::fs::read_to_string(next.path()).unwrap();
        assert!(content.ends_with("kept\n"));
    }

    #[test]
    fn test_append_failure_is_filesystem_error() {
        let temp = tempfile::tempdir().unwrap();
        let mut log = log_in(&temp.path().join("missing-dir"));
        let err = log.append("x").unwrap_err();
        assert!(matches!(err, PublishError::Filesystem { .. }));
        assert_eq!(log.appended(), 0);
    }
}
