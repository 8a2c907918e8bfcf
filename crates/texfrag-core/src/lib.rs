/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Artifact publishing pipeline for texfrag
//!
//! Computed artifacts (plots, tables, scalar values) are turned into LaTeX
//! fragments that a larger document can `\input`.
//!
//! # Architecture
//!
//! - [`PathConvention`] - inner folder for raw content, outer folder for fragments
//! - [`ManifestLog`] - append-only `inputs.txt` listing every include directive
//! - [`ArtifactSerializer`] - type-dispatched serialization of [`Artifact`]s
//! - [`DecorationComposer`] - caption, description, label and sizing wrappers
//! - [`FragmentPublisher`] - the pipeline for one [`Category`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use texfrag_core::{Artifact, FragmentOptions, FragmentPublisher, ScalarArtifact, TableContent};
//! use texfrag_system_runtime::NativeRuntime;
//!
//! # fn main() -> texfrag_core::Result<()> {
//! let runtime = Arc::new(NativeRuntime::new());
//!
//! let mut tables = FragmentPublisher::tables("Latex", runtime.clone())?;
//! tables.set_table(TableContent::markup("\\begin{tabular}{lr}\n...\\end{tabular}\n"))?;
//! tables.publish(
//!     Artifact::stored_table(),
//!     "returns",
//!     &FragmentOptions::new().caption("Monthly returns").below(),
//! )?;
//!
//! let mut values = FragmentPublisher::values("Latex", runtime)?;
//! values.publish(
//!     ScalarArtifact::new(0.0712).rounded(3).into(),
//!     "alpha",
//!     &FragmentOptions::new(),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod category;
pub mod compose;
pub mod config;
pub mod error;
pub mod manifest;
pub mod options;
pub mod paths;
pub mod publisher;
pub mod root;
pub mod scalar;
pub mod serializer;

// Re-export commonly used types
pub use artifact::{
    Artifact, CopyImage, ImageBytes, PlotArtifact, PlotRenderer, RenderError, RenderTarget,
    ScalarArtifact, ScalarFormat, ScalarValue, TableContent,
};
pub use category::Category;
pub use compose::{DEFAULT_SUB_WIDTH, DecorationComposer, Fragment};
pub use config::{
    CategoryConfig, DEFAULT_GRAPHICS_WIDTH, DEFAULT_ROOT, ManifestMode, PublisherConfig,
    RootConfig, TexfragConfig,
};
pub use error::{PublishError, Result};
pub use manifest::{MANIFEST_FILE_NAME, ManifestLog};
pub use options::{Caption, Decorations, FragmentOptions, SizingMode, SizingParameters};
pub use paths::PathConvention;
pub use publisher::{FragmentPublisher, Published, include_directive};
pub use root::PublishRoot;
pub use scalar::{FormatKind, FormatSpec, stringify};
pub use serializer::{ArtifactSerializer, Serialized};
