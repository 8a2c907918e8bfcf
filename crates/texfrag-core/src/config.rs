/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Publisher configuration and the `texfrag.yml` file.
//!
//! ```yaml
//! root: Latex
//! manifest: continue
//! echo: false
//! figures:
//!   outer: Figures
//!   inner: Graphics
//!   position: htbp
//!   width: 0.7\textwidth
//! tables:
//!   above: false
//!   zref: true
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use texfrag_system_runtime::SystemRuntime;
use tracing::debug;

use crate::category::Category;
use crate::error::{PublishError, Result};
use crate::options::FragmentOptions;

/// Root folder used when nothing else is configured.
pub const DEFAULT_ROOT: &str = "Latex";

/// Graphics width for plots placed directly in a float.
pub const DEFAULT_GRAPHICS_WIDTH: &str = r"0.8\textwidth";

/// What happens to an existing manifest when a root is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestMode {
    /// Truncate and rewrite the banner.
    #[default]
    Fresh,
    /// Keep existing entries; write the banner only for a new file.
    Continue,
}

/// Location of one publishing root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootConfig {
    pub root_path: PathBuf,
    pub outer_folder: String,
    pub inner_folder: String,
    pub manifest: ManifestMode,
}

impl RootConfig {
    pub fn new(
        root_path: impl Into<PathBuf>,
        outer_folder: impl Into<String>,
        inner_folder: impl Into<String>,
    ) -> Self {
        Self {
            root_path: root_path.into(),
            outer_folder: outer_folder.into(),
            inner_folder: inner_folder.into(),
            manifest: ManifestMode::Fresh,
        }
    }

    /// Root with the category's default folder names.
    pub fn for_category(root_path: impl Into<PathBuf>, category: Category) -> Self {
        Self::new(
            root_path,
            category.default_outer_folder(),
            category.default_inner_folder(),
        )
    }

    pub fn manifest_mode(mut self, mode: ManifestMode) -> Self {
        self.manifest = mode;
        self
    }
}

/// Everything a `FragmentPublisher` needs besides the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct PublisherConfig {
    pub category: Category,
    pub root: RootConfig,
    /// Float placement, e.g. `htbp`.
    pub position: Option<String>,
    pub centering: bool,
    /// Graphics width for plots in the float itself.
    pub graphics_width: String,
    /// Defaults applied when a call passes no options of its own.
    pub defaults: FragmentOptions,
    /// Print each include directive after publishing.
    pub echo: bool,
    /// Clear the container after every `publish`/`finish`.
    pub reset_after_publish: bool,
}

impl PublisherConfig {
    pub fn new(category: Category, root: RootConfig) -> Self {
        Self {
            category,
            root,
            position: None,
            centering: true,
            graphics_width: DEFAULT_GRAPHICS_WIDTH.to_string(),
            defaults: FragmentOptions::default(),
            echo: true,
            reset_after_publish: false,
        }
    }

    /// Category defaults under `root_path`.
    pub fn for_category(category: Category, root_path: impl Into<PathBuf>) -> Self {
        Self::new(category, RootConfig::for_category(root_path, category))
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn centering(mut self, centering: bool) -> Self {
        self.centering = centering;
        self
    }

    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn reset_after_publish(mut self, reset: bool) -> Self {
        self.reset_after_publish = reset;
        self
    }

    pub fn defaults(mut self, defaults: FragmentOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn manifest_mode(mut self, mode: ManifestMode) -> Self {
        self.root.manifest = mode;
        self
    }
}

/// Per-category section of `texfrag.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CategoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<String>,

    /// Float placement specifier (default: none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Emit `\centering` (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centering: Option<bool>,

    /// Graphics width (default: `0.8\textwidth`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Caption above the body (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<bool>,

    /// Use `\zlabel` (default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zref: Option<bool>,
}

/// Contents of `texfrag.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TexfragConfig {
    pub root: PathBuf,
    pub manifest: ManifestMode,
    pub echo: bool,
    pub figures: CategoryConfig,
    pub tables: CategoryConfig,
    pub values: CategoryConfig,
}

impl Default for TexfragConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            manifest: ManifestMode::Fresh,
            echo: true,
            figures: CategoryConfig::default(),
            tables: CategoryConfig::default(),
            values: CategoryConfig::default(),
        }
    }
}

impl TexfragConfig {
    pub const FILE_NAME: &'static str = "texfrag.yml";

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content).map_err(|e| PublishError::Config(e.to_string()))
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PublishError::Config(e.to_string()))
    }

    /// Load a config file. A relative `root` is resolved against the
    /// file's directory.
    pub fn load(path: &Path, runtime: &dyn SystemRuntime) -> Result<Self> {
        let content = runtime
            .file_read_string(path)
            .map_err(|e| PublishError::filesystem(path, e))?;
        let mut config = Self::parse(&content)
            .map_err(|e| PublishError::Config(format!("{}: {}", path.display(), e)))?;
        if let Some(dir) = path.parent() {
            config.root = dir.join(&config.root);
        }
        debug!(config = %path.display(), root = %config.root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `texfrag.yml` from `dir` if present, otherwise defaults rooted
    /// at `dir`.
    pub fn discover(dir: &Path, runtime: &dyn SystemRuntime) -> Result<Self> {
        let path = dir.join(Self::FILE_NAME);
        let exists = runtime
            .is_file(&path)
            .map_err(|e| PublishError::filesystem(&path, e))?;
        if exists {
            return Self::load(&path, runtime);
        }
        debug!(dir = %dir.display(), "No configuration file, using defaults");
        let mut config = Self::default();
        config.root = dir.join(&config.root);
        Ok(config)
    }

    pub fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Figure => &self.figures,
            Category::Table => &self.tables,
            Category::Value => &self.values,
        }
    }

    pub fn publisher_config(&self, category: Category) -> PublisherConfig {
        let section = self.category(category);
        let outer = section
            .outer
            .clone()
            .unwrap_or_else(|| category.default_outer_folder().to_string());
        // Values have no raw stage.
        let inner = match category {
            Category::Value => outer.clone(),
            _ => section
                .inner
                .clone()
                .unwrap_or_else(|| category.default_inner_folder().to_string()),
        };

        let root = RootConfig::new(&self.root, outer, inner).manifest_mode(self.manifest);
        let defaults = FragmentOptions::new()
            .above(section.above.unwrap_or(true))
            .zref(section.zref.unwrap_or(false));

        PublisherConfig {
            category,
            root,
            position: section.position.clone(),
            centering: section.centering.unwrap_or(true),
            graphics_width: section
                .width
                .clone()
                .unwrap_or_else(|| DEFAULT_GRAPHICS_WIDTH.to_string()),
            defaults,
            echo: self.echo,
            reset_after_publish: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texfrag_system_runtime::NativeRuntime;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(TexfragConfig::from_yaml_str("").unwrap(), TexfragConfig::default());
        assert_eq!(
            TexfragConfig::from_yaml_str("echo: true\n").unwrap(),
            TexfragConfig::default()
        );
    }

    #[test]
    fn test_parse_sections() {
        let yaml = r"
root: out/Latex
manifest: continue
echo: false
figures:
  outer: Plots
  position: htbp
  width: 0.7\textwidth
tables:
  above: false
  zref: true
";
        let config = TexfragConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.root, PathBuf::from("out/Latex"));
        assert_eq!(config.manifest, ManifestMode::Continue);
        assert!(!config.echo);

        let figures = config.publisher_config(Category::Figure);
        assert_eq!(figures.root.outer_folder, "Plots");
        assert_eq!(figures.root.inner_folder, "Graphics");
        assert_eq!(figures.position.as_deref(), Some("htbp"));
        assert_eq!(figures.graphics_width, r"0.7\textwidth");
        assert_eq!(figures.root.manifest, ManifestMode::Continue);

        let tables = config.publisher_config(Category::Table);
        assert!(!tables.defaults.above);
        assert!(tables.defaults.alternate_label_namespace);
        assert!(tables.centering);
    }

    #[test]
    fn test_value_inner_follows_outer() {
        let config = TexfragConfig::from_yaml_str("values:\n  outer: Numbers\n  inner: Ignored\n").unwrap();
        let values = config.publisher_config(Category::Value);
        assert_eq!(values.root.outer_folder, "Numbers");
        assert_eq!(values.root.inner_folder, "Numbers");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = TexfragConfig::from_yaml_str("manifest: sometimes\n").unwrap_err();
        assert!(matches!(err, PublishError::Config(_)));
    }

    #[test]
    fn test_load_error_names_file_once() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(TexfragConfig::FILE_NAME);
        std::fs::write(&path, "manifest: sometimes\n").unwrap();

        let err = TexfragConfig::load(&path, &NativeRuntime::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Configuration error: "));
        assert!(message.contains(&path.display().to_string()));
        assert_eq!(message.matches("Configuration error").count(), 1);
    }

    #[test]
    fn test_discover() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();

        let config = TexfragConfig::discover(temp.path(), &rt).unwrap();
        assert_eq!(config.root, temp.path().join(DEFAULT_ROOT));

        std::fs::write(temp.path().join(TexfragConfig::FILE_NAME), "root: Build\n").unwrap();
        let config = TexfragConfig::discover(temp.path(), &rt).unwrap();
        assert_eq!(config.root, temp.path().join("Build"));
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = TexfragConfig::default().to_yaml_string().unwrap();
        assert!(yaml.contains("root: Latex"));
        assert_eq!(TexfragConfig::from_yaml_str(&yaml).unwrap(), TexfragConfig::default());
    }
}
