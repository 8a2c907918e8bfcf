/*
 * publisher.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The publishing pipeline for one category.
//!
//! A [`FragmentPublisher`] owns a [`PublishRoot`], a serializer and the
//! container of nodes accumulated so far. `publish` runs the whole pipeline
//! for one artifact:
//!
//! 1. resolve and validate options (no I/O yet)
//! 2. serialize the artifact
//! 3. compose decorations around the body
//! 4. append the fragment to the container
//! 5. render the container into `<outer>/<name>.tex`
//! 6. append the include directive to the manifest and echo it
//!
//! Scalars stop after step 2; the serializer already wrote their outer file.
//! `add`/`add_sub` stop after step 4 and `finish` runs 5 and 6 for the
//! accumulated container.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use texfrag_markup::{Arg, Command, Environment, Node, NodeList};
use texfrag_system_runtime::SystemRuntime;
use tracing::{debug, info};

use crate::artifact::{Artifact, TableContent};
use crate::category::Category;
use crate::compose::{DEFAULT_SUB_WIDTH, DecorationComposer};
use crate::config::PublisherConfig;
use crate::error::{PublishError, Result};
use crate::options::{FragmentOptions, SizingMode};
use crate::root::PublishRoot;
use crate::serializer::{ArtifactSerializer, Serialized};

/// Graphics width inside a sub-artifact environment.
pub const SUB_GRAPHICS_WIDTH: &str = r"\linewidth";

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Published {
    pub name: String,
    pub category: Category,
    /// Manifest block, as appended.
    pub directive: String,
    pub outer_path: PathBuf,
    /// `<outer folder>/<name>`, the argument of `\input`.
    pub relative_path: String,
    /// `\usepackage` lines the fragment needs.
    pub packages: Vec<String>,
}

impl Published {
    pub fn input_command(&self) -> String {
        format!("\\input{{{}}}", self.relative_path)
    }
}

/// Include directive block for the manifest.
pub fn include_directive(category: Category, name: &str, relative: &str) -> String {
    format!(
        "\n% {} input: {} %\n\\input{{{}}}\n",
        category.display_name(),
        name,
        relative
    )
}

pub struct FragmentPublisher {
    config: PublisherConfig,
    root: PublishRoot,
    serializer: ArtifactSerializer,
    composer: DecorationComposer,
    container: NodeList,
}

impl std::fmt::Debug for FragmentPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentPublisher")
            .field("category", &self.config.category)
            .field("root", &self.root)
            .field("container", &self.container.len())
            .finish_non_exhaustive()
    }
}

impl FragmentPublisher {
    /// Create the root (folders and manifest) and an empty container.
    ///
    /// Figures and tables need distinct inner and outer folders: both stages
    /// are written as `<folder>/<name>.tex`.
    pub fn new(config: PublisherConfig, runtime: Arc<dyn SystemRuntime>) -> Result<Self> {
        if config.category != Category::Value
            && config.root.inner_folder == config.root.outer_folder
        {
            return Err(PublishError::Config(format!(
                "{} inner and outer folders must differ, both are '{}'",
                config.category.display_name(),
                config.root.outer_folder
            )));
        }
        let root = PublishRoot::new(&config.root, runtime)?;
        Ok(Self {
            composer: DecorationComposer::new(config.category),
            config,
            root,
            serializer: ArtifactSerializer::new(),
            container: NodeList::new(),
        })
    }

    /// Figures under `root_path` with default folders.
    pub fn figures(root_path: impl Into<PathBuf>, runtime: Arc<dyn SystemRuntime>) -> Result<Self> {
        Self::new(
            PublisherConfig::for_category(Category::Figure, root_path),
            runtime,
        )
    }

    pub fn tables(root_path: impl Into<PathBuf>, runtime: Arc<dyn SystemRuntime>) -> Result<Self> {
        Self::new(
            PublisherConfig::for_category(Category::Table, root_path),
            runtime,
        )
    }

    pub fn values(root_path: impl Into<PathBuf>, runtime: Arc<dyn SystemRuntime>) -> Result<Self> {
        Self::new(
            PublisherConfig::for_category(Category::Value, root_path),
            runtime,
        )
    }

    pub fn category(&self) -> Category {
        self.config.category
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    pub fn root(&self) -> &PublishRoot {
        &self.root
    }

    /// The configured default options, as a starting point for a call.
    pub fn options(&self) -> FragmentOptions {
        self.config.defaults.clone()
    }

    pub fn container(&self) -> &NodeList {
        &self.container
    }

    /// Keep tabular content for a later `Artifact::stored_table()`.
    pub fn set_table(&mut self, content: TableContent<'_>) -> Result<()> {
        self.serializer.set_table(content)
    }

    /// Serialize, compose and append to the container without writing the
    /// outer file.
    pub fn add(&mut self, artifact: Artifact<'_>, name: &str, options: &FragmentOptions) -> Result<()> {
        let decorations = options.resolve(name)?;
        let width = options
            .width
            .clone()
            .unwrap_or_else(|| self.config.graphics_width.clone());
        let node = match self.serializer.serialize(artifact, name, &self.root, &width)? {
            Serialized::Body { node, .. } => node,
            Serialized::Written { relative, .. } => input_node(&relative),
        };
        let fragment = self.composer.compose_resolved(node, &decorations);
        self.container.extend(fragment.nodes);
        debug!(artifact = name, nodes = self.container.len(), "Added to container");
        Ok(())
    }

    /// Like [`add`](Self::add), but wrapped in a `subfigure`/`subtable` of
    /// `width` (default `0.49\linewidth`).
    pub fn add_sub(
        &mut self,
        artifact: Artifact<'_>,
        name: &str,
        options: &FragmentOptions,
        width: Option<&str>,
    ) -> Result<()> {
        if self.category().sub_environment().is_none() {
            return Err(PublishError::Unsupported(format!(
                "{} fragments have no sub environment",
                self.category().display_name()
            )));
        }
        let decorations = options.resolve(name)?;
        let graphics_width = options.width.as_deref().unwrap_or(SUB_GRAPHICS_WIDTH);
        let node = match self
            .serializer
            .serialize(artifact, name, &self.root, graphics_width)?
        {
            Serialized::Body { node, .. } => node,
            Serialized::Written { relative, .. } => input_node(&relative),
        };
        let fragment = self.composer.compose_resolved(node, &decorations);
        let sub = self
            .composer
            .sub_environment(fragment, width.unwrap_or(DEFAULT_SUB_WIDTH))
            .ok_or_else(|| PublishError::Unsupported("sub environment".to_string()))?;
        self.container.append(sub);
        debug!(artifact = name, nodes = self.container.len(), "Added sub-artifact to container");
        Ok(())
    }

    /// Run the full pipeline for one artifact.
    pub fn publish(
        &mut self,
        artifact: Artifact<'_>,
        name: &str,
        options: &FragmentOptions,
    ) -> Result<Published> {
        let decorations = options.resolve(name)?;
        let width = options
            .width
            .clone()
            .unwrap_or_else(|| self.config.graphics_width.clone());

        match self.serializer.serialize(artifact, name, &self.root, &width)? {
            Serialized::Written { path, relative } => {
                self.record(name, path, relative, Vec::new(), None)
            }
            Serialized::Body { node, .. } => {
                let fragment = self.composer.compose_resolved(node, &decorations);
                let mut container = self.container.clone();
                container.extend(fragment.nodes);
                self.flush(name, container)
            }
        }
    }

    /// Decorate the accumulated container as a whole and write it.
    pub fn finish(&mut self, name: &str, options: &FragmentOptions) -> Result<Published> {
        if self.container.is_empty() {
            return Err(PublishError::EmptyContainer {
                name: name.to_string(),
            });
        }
        let decorations = options.resolve(name)?;
        if decorations.sizing != SizingMode::None {
            return Err(PublishError::Unsupported(
                "sizing wrappers apply to single artifacts, not to a finished container"
                    .to_string(),
            ));
        }

        let mut container = self.container.clone();
        self.composer.decorate(&mut container, &decorations);
        self.flush(name, container)
    }

    /// Clear the container and any stored tabular content.
    pub fn reset(&mut self) {
        self.container.clear();
        self.serializer.reset();
    }

    /// Render the current container as it would be written.
    pub fn render(&self) -> String {
        self.render_nodes(&self.container)
    }

    fn render_nodes(&self, nodes: &NodeList) -> String {
        let Some(env) = self.category().environment() else {
            return nodes.render();
        };

        let mut children = NodeList::new();
        if self.config.centering {
            children.append(Command::new("centering"));
        }
        children.extend(nodes.clone());

        let mut environment = Environment::new(env).children(children);
        if let Some(position) = &self.config.position {
            environment = environment.option(Arg::raw(position));
        }
        environment.render()
    }

    fn flush(&mut self, name: &str, container: NodeList) -> Result<Published> {
        let path = self.root.paths().resolve_outer(&format!("{}.tex", name));
        let content = self.render_nodes(&container);
        self.root.write(&path, &content)?;

        let packages = container.packages().iter().map(|p| p.usepackage()).collect();
        let relative = self.root.paths().relative_outer(name);
        self.record(name, path, relative, packages, Some(container))
    }

    /// Append to the manifest, then commit `container` if given.
    fn record(
        &mut self,
        name: &str,
        outer_path: PathBuf,
        relative_path: String,
        packages: Vec<String>,
        container: Option<NodeList>,
    ) -> Result<Published> {
        let directive = include_directive(self.category(), name, &relative_path);
        self.root.manifest_mut().append(&directive)?;
        if let Some(container) = container {
            self.container = container;
        }

        info!(
            category = self.category().as_str(),
            artifact = name,
            path = %outer_path.display(),
            "Published fragment"
        );
        if !packages.is_empty() {
            debug!(artifact = name, packages = ?packages, "Fragment requires packages");
        }
        if self.config.echo {
            self.root.runtime().print(directive.trim_end());
        }
        if self.config.reset_after_publish {
            self.reset();
        }

        Ok(Published {
            name: name.to_string(),
            category: self.category(),
            directive,
            outer_path,
            relative_path,
            packages,
        })
    }
}

fn input_node(relative: &str) -> Node {
    Command::new("input").arg(Arg::raw(relative)).into()
}
