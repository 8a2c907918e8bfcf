/*
 * artifact.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Artifacts to publish: plots, tables and scalar values.
//!
//! Plot rendering is delegated to a [`PlotRenderer`]. The renderer receives
//! an explicit [`RenderTarget`] (where to write and which runtime to use)
//! instead of relying on whatever plotting state happens to be current.

use std::path::{Path, PathBuf};

use texfrag_markup::{TabularOptions, ToTabular};
use texfrag_system_runtime::{RuntimeError, SystemRuntime};

use crate::scalar::FormatSpec;

/// Opaque failure reported by a plot renderer.
///
/// Display and `source()` forward to the wrapped error unchanged.
#[derive(Debug)]
pub struct RenderError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl RenderError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(error.into())
    }

    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.0
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e)
    }
}

impl From<RuntimeError> for RenderError {
    fn from(e: RuntimeError) -> Self {
        Self::new(e)
    }
}

/// Where a renderer must persist its image.
pub struct RenderTarget<'a> {
    /// Absolute (root-joined) output path, extension included.
    pub path: &'a Path,
    /// Path as the document will reference it.
    pub relative_path: &'a str,
    pub runtime: &'a dyn SystemRuntime,
}

/// Produces image bytes at a target path.
pub trait PlotRenderer {
    fn render(&mut self, target: &RenderTarget<'_>) -> Result<(), RenderError>;
}

impl<F> PlotRenderer for F
where
    F: FnMut(&RenderTarget<'_>) -> Result<(), RenderError>,
{
    fn render(&mut self, target: &RenderTarget<'_>) -> Result<(), RenderError> {
        self(target)
    }
}

/// Renderer for an image that already exists on disk.
#[derive(Debug, Clone)]
pub struct CopyImage {
    pub source: PathBuf,
}

impl CopyImage {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Extension of the source file, if any.
    pub fn extension(&self) -> Option<&str> {
        self.source.extension().and_then(|e| e.to_str())
    }

    /// Whether the source already is the target file.
    fn is_target(&self, target: &RenderTarget<'_>) -> Result<bool, RuntimeError> {
        if !target.runtime.is_file(target.path)? {
            return Ok(false);
        }
        let source = target.runtime.canonicalize(&self.source)?;
        Ok(source == target.runtime.canonicalize(target.path)?)
    }
}

impl PlotRenderer for CopyImage {
    fn render(&mut self, target: &RenderTarget<'_>) -> Result<(), RenderError> {
        // Copying a file onto itself truncates it.
        if self.is_target(target)? {
            return Ok(());
        }
        target.runtime.file_copy(&self.source, target.path)?;
        Ok(())
    }
}

/// Renderer for image bytes produced in memory.
#[derive(Debug, Clone)]
pub struct ImageBytes(pub Vec<u8>);

impl PlotRenderer for ImageBytes {
    fn render(&mut self, target: &RenderTarget<'_>) -> Result<(), RenderError> {
        target.runtime.file_write(target.path, &self.0)?;
        Ok(())
    }
}

pub struct PlotArtifact<'a> {
    pub renderer: Box<dyn PlotRenderer + 'a>,
    pub extension: String,
}

/// Tabular content, either already rendered or structured.
pub enum TableContent<'a> {
    Markup(String),
    Structured(Box<dyn ToTabular + 'a>, TabularOptions),
}

impl<'a> TableContent<'a> {
    pub fn markup(s: impl Into<String>) -> Self {
        TableContent::Markup(s.into())
    }

    pub fn structured(table: impl ToTabular + 'a, options: TabularOptions) -> Self {
        TableContent::Structured(Box::new(table), options)
    }

    /// Resolve to markup text.
    pub fn into_markup(self) -> texfrag_markup::MarkupResult<String> {
        match self {
            TableContent::Markup(s) => Ok(s),
            TableContent::Structured(table, options) => table.to_tabular(&options),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Integer(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Integer(v.into())
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

/// How a float is turned into text. At most one applies.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScalarFormat {
    #[default]
    None,
    Spec(FormatSpec),
    Rounding(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarArtifact {
    pub value: ScalarValue,
    pub format: ScalarFormat,
}

impl ScalarArtifact {
    pub fn new(value: impl Into<ScalarValue>) -> Self {
        Self {
            value: value.into(),
            format: ScalarFormat::None,
        }
    }

    pub fn rounded(mut self, digits: usize) -> Self {
        self.format = ScalarFormat::Rounding(digits);
        self
    }

    pub fn formatted(mut self, spec: FormatSpec) -> Self {
        self.format = ScalarFormat::Spec(spec);
        self
    }
}

pub enum Artifact<'a> {
    Plot(PlotArtifact<'a>),
    /// `None` saves the content previously set on the publisher.
    Table(Option<TableContent<'a>>),
    Scalar(ScalarArtifact),
}

impl<'a> Artifact<'a> {
    pub fn plot(renderer: impl PlotRenderer + 'a, extension: impl Into<String>) -> Self {
        Artifact::Plot(PlotArtifact {
            renderer: Box::new(renderer),
            extension: extension.into(),
        })
    }

    /// Plot from a closure; the closure's argument type is inferred.
    pub fn plot_fn<F>(render: F, extension: impl Into<String>) -> Self
    where
        F: FnMut(&RenderTarget<'_>) -> Result<(), RenderError> + 'a,
    {
        Self::plot(render, extension)
    }

    pub fn table(content: TableContent<'a>) -> Self {
        Artifact::Table(Some(content))
    }

    /// Table whose content was set earlier with `set_table`.
    pub fn stored_table() -> Self {
        Artifact::Table(None)
    }

    pub fn scalar(value: impl Into<ScalarValue>) -> Self {
        Artifact::Scalar(ScalarArtifact::new(value))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::Plot(_) => "plot",
            Artifact::Table(_) => "table",
            Artifact::Scalar(_) => "scalar",
        }
    }
}

impl From<ScalarArtifact> for Artifact<'_> {
    fn from(s: ScalarArtifact) -> Self {
        Artifact::Scalar(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texfrag_markup::{Cell, Table};

    #[test]
    fn test_render_error_is_transparent() {
        let inner = std::io::Error::other("backend crashed");
        let err = RenderError::new(inner);
        assert_eq!(err.to_string(), "backend crashed");
        assert!(err.get_ref().downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_table_content_into_markup() {
        let raw = TableContent::markup("\\begin{tabular}{l}\\end{tabular}");
        assert_eq!(raw.into_markup().unwrap(), "\\begin{tabular}{l}\\end{tabular}");

        let mut table = Table::new(["x"]);
        table.push_row(None, vec![Cell::Int(1)]);
        let structured = TableContent::structured(table, TabularOptions::default());
        assert!(structured.into_markup().unwrap().contains("1 \\\\"));
    }

    #[test]
    fn test_copy_image_extension() {
        assert_eq!(CopyImage::new("plots/a.pdf").extension(), Some("pdf"));
        assert_eq!(CopyImage::new("plots/a").extension(), None);
    }

    #[test]
    fn test_scalar_builders() {
        let s = ScalarArtifact::new(1.5).rounded(1);
        assert_eq!(s.format, ScalarFormat::Rounding(1));
        assert_eq!(ScalarArtifact::new(3_i64).value, ScalarValue::Integer(3));
        assert_eq!(Artifact::scalar("x").kind(), "scalar");
    }
}
