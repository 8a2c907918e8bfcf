/*
 * tabular.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conversion of structured tables to a LaTeX `tabular`.
//!
//! [`ToTabular`] is the seam for table sources. [`Table`] is the built-in
//! implementation: a small column-oriented frame that can be deserialized
//! from YAML or JSON and renders with booktabs rules.

use serde::{Deserialize, Serialize};

use crate::error::{MarkupError, MarkupResult};
use crate::escape::escape_latex;

/// Formatting options for table conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TabularOptions {
    /// Explicit column format (e.g. `l|rr`). Derived from the data when unset.
    pub column_format: Option<String>,
    /// Decimal digits for floating point cells.
    pub precision: usize,
    /// Escape LaTeX specials in text cells and headers.
    pub escape: bool,
    /// Use `\toprule`/`\midrule`/`\bottomrule` instead of `\hline`.
    pub booktabs: bool,
}

impl Default for TabularOptions {
    fn default() -> Self {
        Self {
            column_format: None,
            precision: 2,
            escape: false,
            booktabs: true,
        }
    }
}

/// Something that can be rendered as a LaTeX tabular.
pub trait ToTabular {
    fn to_tabular(&self, options: &TabularOptions) -> MarkupResult<String>;
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }

    fn render(&self, options: &TabularOptions) -> String {
        match self {
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format!("{:.*}", options.precision, f),
            Cell::Text(s) if options.escape => escape_latex(s),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

/// Row-major table with optional index column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Table {
    pub columns: Vec<String>,
    #[serde(default)]
    pub index_name: Option<String>,
    /// Row labels; empty means no index column.
    #[serde(default)]
    pub index: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_index(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Add a row. `label` is used only when the table has an index.
    pub fn push_row(&mut self, label: Option<&str>, cells: Vec<Cell>) {
        if let Some(label) = label {
            self.index.push(label.to_string());
        }
        self.rows.push(cells);
    }

    fn has_index(&self) -> bool {
        self.index_name.is_some() || !self.index.is_empty()
    }

    fn validate(&self) -> MarkupResult<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(MarkupError::RaggedRow {
                    row: i,
                    expected: self.columns.len(),
                    found: row.len(),
                });
            }
        }
        if self.has_index() && self.index.len() != self.rows.len() {
            return Err(MarkupError::IndexLength {
                expected: self.rows.len(),
                found: self.index.len(),
            });
        }
        Ok(())
    }

    fn derived_column_format(&self) -> String {
        let mut format = String::new();
        if self.has_index() {
            format.push('l');
        }
        for col in 0..self.columns.len() {
            let numeric = self.rows.iter().all(|row| row[col].is_numeric());
            format.push(if numeric { 'r' } else { 'l' });
        }
        format
    }
}

impl ToTabular for Table {
    fn to_tabular(&self, options: &TabularOptions) -> MarkupResult<String> {
        self.validate()?;

        let (top, mid, bottom) = if options.booktabs {
            (r"\toprule", r"\midrule", r"\bottomrule")
        } else {
            (r"\hline", r"\hline", r"\hline")
        };
        let text = |s: &str| {
            if options.escape {
                escape_latex(s)
            } else {
                s.to_string()
            }
        };

        let column_format = options
            .column_format
            .clone()
            .unwrap_or_else(|| self.derived_column_format());

        let mut lines = vec![format!("\\begin{{tabular}}{{{}}}", column_format), top.to_string()];

        let mut header: Vec<String> = Vec::with_capacity(self.columns.len() + 1);
        if self.has_index() {
            header.push(text(self.index_name.as_deref().unwrap_or("")));
        }
        header.extend(self.columns.iter().map(|c| text(c)));
        lines.push(format!("{} \\\\", header.join(" & ")));
        lines.push(mid.to_string());

        for (i, row) in self.rows.iter().enumerate() {
            let mut cells: Vec<String> = Vec::with_capacity(row.len() + 1);
            if self.has_index() {
                cells.push(text(&self.index[i]));
            }
            cells.extend(row.iter().map(|c| c.render(options)));
            lines.push(format!("{} \\\\", cells.join(" & ")));
        }

        lines.push(bottom.to_string());
        lines.push(r"\end{tabular}".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        let mut table = Table::new(["x", "y"]).with_index("index");
        for i in 1..=3_i64 {
            table.push_row(Some(&i.to_string()), vec![Cell::Int(i), Cell::Float(i as f64 / 3.0)]);
        }
        table
    }

    #[test]
    fn test_booktabs_with_index() {
        let out = sample().to_tabular(&TabularOptions::default()).unwrap();
        assert_eq!(
            out,
            "\\begin{tabular}{lrr}\n\
             \\toprule\n\
             index & x & y \\\\\n\
             \\midrule\n\
             1 & 1 & 0.33 \\\\\n\
             2 & 2 & 0.67 \\\\\n\
             3 & 3 & 1.00 \\\\\n\
             \\bottomrule\n\
             \\end{tabular}\n"
        );
    }

    #[test]
    fn test_precision_and_hline() {
        let options = TabularOptions {
            precision: 1,
            booktabs: false,
            column_format: Some("l|rr".to_string()),
            ..Default::default()
        };
        let out = sample().to_tabular(&options).unwrap();
        assert!(out.starts_with("\\begin{tabular}{l|rr}\n\\hline\n"));
        assert!(out.contains("3 & 3 & 1.0 \\\\"));
    }

    #[test]
    fn test_text_columns_are_left_aligned_and_escaped_on_request() {
        let mut table = Table::new(["name", "share"]);
        table.push_row(None, vec![Cell::from("R&D"), Cell::from(0.5)]);

        let raw = table.to_tabular(&TabularOptions::default()).unwrap();
        assert!(raw.starts_with("\\begin{tabular}{lr}"));
        assert!(raw.contains("R&D & 0.50"));

        let escaped = table
            .to_tabular(&TabularOptions {
                escape: true,
                ..Default::default()
            })
            .unwrap();
        assert!(escaped.contains(r"R\&D & 0.50"));
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(None, vec![Cell::Int(1)]);
        let err = table.to_tabular(&TabularOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            MarkupError::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_index_length_mismatch() {
        let mut table = Table::new(["a"]).with_index("i");
        table.push_row(None, vec![Cell::Int(1)]);
        let err = table.to_tabular(&TabularOptions::default()).unwrap_err();
        assert!(matches!(err, MarkupError::IndexLength { .. }));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = r#"
columns: [x, label]
index-name: idx
index: [a, b]
rows:
  - [1, one]
  - [2.5, two]
"#;
        let table: Table = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.rows[0][0], Cell::Int(1));
        assert_eq!(table.rows[1][1], Cell::Text("two".to_string()));

        let out = table.to_tabular(&TabularOptions::default()).unwrap();
        assert!(out.contains("idx & x & label \\\\"));
        assert!(out.contains("b & 2.50 & two \\\\"));
    }
}
