/*
 * init.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Init command implementation
 */

//! `texfrag init`: write a default configuration and create the folders of
//! every category with a fresh manifest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use texfrag_core::{Category, FragmentPublisher, ManifestMode, TexfragConfig};

use super::native_runtime;

/// Arguments for the init command
#[derive(Debug)]
pub struct InitArgs {
    /// Directory to initialize
    pub dir: Option<PathBuf>,
    /// Explicit configuration file path
    pub config: Option<PathBuf>,
    /// Overwrite an existing configuration file
    pub force: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    run(args).map(|_| ())
}

/// Returns the configuration that was used.
pub fn run(args: InitArgs) -> Result<TexfragConfig> {
    let runtime = native_runtime();

    let config_path = match (&args.config, &args.dir) {
        (Some(path), _) => path.clone(),
        (None, Some(dir)) => dir.join(TexfragConfig::FILE_NAME),
        (None, None) => runtime
            .cwd()
            .context("Failed to get current directory")?
            .join(TexfragConfig::FILE_NAME),
    };
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        runtime
            .dir_create(parent, true)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let exists = runtime
        .is_file(&config_path)
        .with_context(|| format!("Failed to check {}", config_path.display()))?;
    if exists && !args.force {
        info!(config = %config_path.display(), "Keeping existing configuration");
    } else {
        let yaml = TexfragConfig::default()
            .to_yaml_string()
            .context("Failed to serialize default configuration")?;
        runtime
            .file_write(&config_path, yaml.as_bytes())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        info!(config = %config_path.display(), "Wrote configuration");
    }

    let config = TexfragConfig::load(&config_path, runtime.as_ref())
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    for category in [Category::Figure, Category::Table, Category::Value] {
        let publisher_config = config
            .publisher_config(category)
            .manifest_mode(ManifestMode::Fresh);
        FragmentPublisher::new(publisher_config, runtime.clone())
            .with_context(|| format!("Failed to prepare {} folders", category.as_str()))?;
    }
    info!(root = %config.root.display(), "Initialized publishing root");

    Ok(config)
}
