/*
 * serializer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Type-dispatched serialization of artifacts.
//!
//! Plots and tables land in the inner folder and come back as a body node
//! referencing them. Scalars are written straight into the outer folder; there
//! is nothing to compose around them.

use std::path::PathBuf;

use texfrag_markup::{Arg, Command, Node, Package};
use tracing::debug;

use crate::artifact::{Artifact, PlotArtifact, RenderTarget, TableContent};
use crate::error::{PublishError, Result};
use crate::root::PublishRoot;
use crate::scalar::value_file_content;

/// Outcome of serializing one artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum Serialized {
    /// Content stored in the inner folder and the node that references it.
    Body { node: Node, inner_path: PathBuf },
    /// Final file already written to the outer folder.
    Written { path: PathBuf, relative: String },
}

/// Serializes artifacts and remembers the last tabular content set on it.
#[derive(Debug, Default)]
pub struct ArtifactSerializer {
    table: Option<String>,
}

impl ArtifactSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert and keep tabular content for a later `Artifact::stored_table()`.
    pub fn set_table(&mut self, content: TableContent<'_>) -> Result<()> {
        self.table = Some(content.into_markup()?);
        Ok(())
    }

    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    pub fn reset(&mut self) {
        self.table = None;
    }

    /// Serialize `artifact` under `name`.
    ///
    /// `width` is the graphics width used for plots.
    pub fn serialize(
        &mut self,
        artifact: Artifact<'_>,
        name: &str,
        root: &PublishRoot,
        width: &str,
    ) -> Result<Serialized> {
        match artifact {
            Artifact::Plot(plot) => self.serialize_plot(plot, name, root, width),
            Artifact::Table(content) => {
                if let Some(content) = content {
                    self.set_table(content)?;
                }
                self.serialize_table(name, root)
            }
            Artifact::Scalar(scalar) => {
                let content = value_file_content(&scalar, name)?;
                let path = root.paths().resolve_outer(&format!("{}.tex", name));
                root.write(&path, &content)?;
                debug!(path = %path.display(), "Wrote value");
                Ok(Serialized::Written {
                    path,
                    relative: root.paths().relative_outer(name),
                })
            }
        }
    }

    fn serialize_plot(
        &self,
        mut plot: PlotArtifact<'_>,
        name: &str,
        root: &PublishRoot,
        width: &str,
    ) -> Result<Serialized> {
        let file_name = if plot.extension.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", name, plot.extension)
        };
        let path = root.paths().resolve_inner(&file_name);
        let relative = root.paths().relative_inner(&file_name);

        let target = RenderTarget {
            path: &path,
            relative_path: &relative,
            runtime: root.runtime(),
        };
        plot.renderer.render(&target)?;
        debug!(path = %path.display(), "Rendered plot");

        let node = Command::new("includegraphics")
            .option(Arg::raw(format!("width={}", width)))
            .arg(Arg::raw(relative))
            .package(Package::new("graphicx"))
            .into();
        Ok(Serialized::Body {
            node,
            inner_path: path,
        })
    }

    fn serialize_table(&self, name: &str, root: &PublishRoot) -> Result<Serialized> {
        let markup = self.table.as_ref().ok_or_else(|| PublishError::NoContent {
            name: name.to_string(),
        })?;
        let path = root.paths().resolve_inner(&format!("{}.tex", name));
        root.write(&path, markup)?;
        debug!(path = %path.display(), "Wrote tabular");

        let node = Command::new("input")
            .arg(Arg::raw(root.paths().relative_inner(name)))
            .into();
        Ok(Serialized::Body {
            node,
            inner_path: path,
        })
    }
}
