//! Command implementations for the texfrag CLI
//!
//! Each command module handles the CLI interface and delegates to
//! texfrag-core for the actual publishing.

pub mod figure;
pub mod init;
pub mod table;
pub mod value;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use texfrag_core::{
    Category, FragmentOptions, FragmentPublisher, ManifestMode, Published, SizingParameters,
    TexfragConfig,
};
use texfrag_system_runtime::{NativeRuntime, SystemRuntime};

/// Decoration flags shared by `figure` and `table`.
#[derive(Debug, Clone, Default, Args)]
pub struct FragmentFlags {
    /// Caption text (defaults to the fragment name)
    #[arg(long, conflicts_with = "no_caption")]
    pub caption: Option<String>,

    /// Omit caption and label
    #[arg(long)]
    pub no_caption: bool,

    /// Label (defaults to the fragment name)
    #[arg(long)]
    pub label: Option<String>,

    /// Description set as \caption* next to the caption
    #[arg(long)]
    pub description: Option<String>,

    /// Put caption, description and label below the content
    #[arg(long)]
    pub below: bool,

    /// Shrink to the column width with \resizebox
    #[arg(long)]
    pub shrink: bool,

    /// Fit into the text block with \adjustbox
    #[arg(long)]
    pub fit: bool,

    /// Use \zlabel (zref-user) instead of \label
    #[arg(long)]
    pub zref: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl FragmentFlags {
    /// Layer the flags over configured defaults.
    pub fn apply(&self, mut options: FragmentOptions) -> FragmentOptions {
        if self.no_caption {
            options = options.no_caption();
        } else if let Some(caption) = &self.caption {
            options = options.caption(caption.as_str());
        }
        if let Some(label) = &self.label {
            options = options.label(label.as_str());
        }
        if let Some(description) = &self.description {
            options = options.description(description.as_str());
        }
        if self.below {
            options = options.below();
        }
        if self.shrink {
            options = options.shrink_to_fit(SizingParameters::shrink_default());
        }
        if self.fit {
            options = options.bounding_box_fit(SizingParameters::bounding_box_default());
        }
        if self.zref {
            options = options.zref(true);
        }
        options
    }
}

pub fn native_runtime() -> Arc<dyn SystemRuntime> {
    Arc::new(NativeRuntime::new())
}

/// Load `config` if given, otherwise discover `texfrag.yml` in the current
/// directory.
pub fn load_config(config: Option<&Path>, runtime: &dyn SystemRuntime) -> Result<TexfragConfig> {
    match config {
        Some(path) => TexfragConfig::load(path, runtime)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => {
            let cwd = runtime.cwd().context("Failed to get current directory")?;
            TexfragConfig::discover(&cwd, runtime).context("Failed to read configuration")
        }
    }
}

/// Publisher for one CLI invocation.
///
/// Every invocation is a new root, so the manifest is continued rather than
/// reset; `texfrag init` is the place to start a fresh one.
pub fn open_publisher(
    category: Category,
    config: &TexfragConfig,
    runtime: Arc<dyn SystemRuntime>,
    json: bool,
) -> Result<FragmentPublisher> {
    let publisher_config = config
        .publisher_config(category)
        .manifest_mode(ManifestMode::Continue)
        .echo(config.echo && !json);
    FragmentPublisher::new(publisher_config, runtime)
        .with_context(|| format!("Failed to prepare {} folders", category.as_str()))
}

pub fn report(published: &Published, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(published).context("Failed to serialize result")?;
        println!("{}", text);
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use texfrag_core::{Caption, SizingMode};

    #[test]
    fn test_flags_over_defaults() {
        let flags = FragmentFlags {
            caption: Some("Returns".to_string()),
            below: true,
            zref: true,
            ..Default::default()
        };
        let options = flags.apply(FragmentOptions::new());
        assert_eq!(options.caption, Caption::Text("Returns".to_string()));
        assert!(!options.above);
        assert!(options.alternate_label_namespace);
    }

    #[test]
    fn test_no_flags_keep_config_defaults() {
        let base = FragmentOptions::new().below().zref(true);
        let options = FragmentFlags::default().apply(base.clone());
        assert_eq!(options, base);
    }

    #[test]
    fn test_both_sizing_flags_conflict_in_core() {
        let flags = FragmentFlags {
            shrink: true,
            fit: true,
            ..Default::default()
        };
        let options = flags.apply(FragmentOptions::new());
        assert!(options.sizing().is_err());

        let flags = FragmentFlags {
            shrink: true,
            ..Default::default()
        };
        assert!(matches!(
            flags.apply(FragmentOptions::new()).sizing().unwrap(),
            SizingMode::ShrinkToFit(_)
        ));
    }

    #[test]
    fn test_load_config_resolves_root() {
        let temp = tempfile::tempdir().unwrap();
        let path = test_support::quiet_config(temp.path());
        let config = load_config(Some(&path), &NativeRuntime::new()).unwrap();
        assert_eq!(config.root, temp.path().join("Latex"));
        assert!(!config.echo);
    }
}
