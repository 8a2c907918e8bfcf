/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for markup conversion.

use thiserror::Error;

/// Errors that can occur while converting structured content to markup.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// A data row does not have one cell per column.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The index does not have one label per row.
    #[error("Index has {found} labels for {expected} rows")]
    IndexLength { expected: usize, found: usize },

    /// Conversion failed inside a user-provided converter.
    #[error("Conversion error: {message}")]
    Conversion { message: String },
}

/// Result type for markup operations.
pub type MarkupResult<T> = Result<T, MarkupError>;
