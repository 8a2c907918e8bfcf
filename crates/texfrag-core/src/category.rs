/*
 * category.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Artifact categories and their fixed conventions.

use serde::{Deserialize, Serialize};

/// The kind of fragment a publisher produces.
///
/// Each category fixes the float environment, the label namespace and the
/// default folder names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Figure,
    Table,
    Value,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Figure => "figure",
            Category::Table => "table",
            Category::Value => "value",
        }
    }

    /// Name used in include-directive comments.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Figure => "Figure",
            Category::Table => "Table",
            Category::Value => "Value",
        }
    }

    /// Float environment wrapping the fragment. Values are bare.
    pub fn environment(&self) -> Option<&'static str> {
        match self {
            Category::Figure => Some("figure"),
            Category::Table => Some("table"),
            Category::Value => None,
        }
    }

    /// Environment used for sub-artifacts inside one container.
    pub fn sub_environment(&self) -> Option<&'static str> {
        match self {
            Category::Figure => Some("subfigure"),
            Category::Table => Some("subtable"),
            Category::Value => None,
        }
    }

    /// Label namespace prefix (`fig:`, `tbl:`).
    pub fn label_prefix(&self) -> Option<&'static str> {
        match self {
            Category::Figure => Some("fig"),
            Category::Table => Some("tbl"),
            Category::Value => None,
        }
    }

    pub fn default_outer_folder(&self) -> &'static str {
        match self {
            Category::Figure => "Figures",
            Category::Table => "Tables",
            Category::Value => "Values",
        }
    }

    /// Values have no raw stage, so inner and outer coincide.
    pub fn default_inner_folder(&self) -> &'static str {
        match self {
            Category::Figure => "Graphics",
            Category::Table => "Tabulars",
            Category::Value => "Values",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "figure" | "figures" => Ok(Category::Figure),
            "table" | "tables" => Ok(Category::Table),
            "value" | "values" => Ok(Category::Value),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}
