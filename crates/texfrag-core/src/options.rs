/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Per-call decoration options and their resolution against an artifact name.

use serde::{Deserialize, Serialize};

use crate::error::{PublishError, Result};

/// Caption request for one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caption {
    /// Use the artifact name as caption text.
    #[default]
    Default,
    Text(String),
    /// No caption and no label.
    Suppressed,
}

impl From<&str> for Caption {
    fn from(s: &str) -> Self {
        Caption::Text(s.to_string())
    }
}

impl From<String> for Caption {
    fn from(s: String) -> Self {
        Caption::Text(s)
    }
}

/// Width and height expressions handed to a sizing wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingParameters {
    pub width: String,
    pub height: String,
}

impl SizingParameters {
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// `(\columnwidth, !)`: scale to the column, keep the aspect ratio.
    pub fn shrink_default() -> Self {
        Self::new(r"\columnwidth", "!")
    }

    /// `(\textwidth, 0.95\textheight)`.
    pub fn bounding_box_default() -> Self {
        Self::new(r"\textwidth", r"0.95\textheight")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SizingMode {
    #[default]
    None,
    ShrinkToFit(SizingParameters),
    BoundingBoxFit(SizingParameters),
}

/// Decorations requested for one publish call.
///
/// Unset caption and label fall back to the artifact's name when the
/// options are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentOptions {
    pub caption: Caption,
    pub description: Option<String>,
    pub label: Option<String>,
    /// Emit `\zlabel` (zref) instead of `\label`.
    pub alternate_label_namespace: bool,
    /// Caption block above the body rather than below it.
    pub above: bool,
    pub shrink_to_fit: Option<SizingParameters>,
    pub bounding_box_fit: Option<SizingParameters>,
    /// Graphics width for plots; the publisher default applies when unset.
    pub width: Option<String>,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            caption: Caption::Default,
            description: None,
            label: None,
            alternate_label_namespace: false,
            above: true,
            shrink_to_fit: None,
            bounding_box_fit: None,
            width: None,
        }
    }
}

impl FragmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caption(mut self, caption: impl Into<Caption>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn no_caption(mut self) -> Self {
        self.caption = Caption::Suppressed;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn zref(mut self, enabled: bool) -> Self {
        self.alternate_label_namespace = enabled;
        self
    }

    pub fn above(mut self, above: bool) -> Self {
        self.above = above;
        self
    }

    pub fn below(self) -> Self {
        self.above(false)
    }

    pub fn shrink_to_fit(mut self, params: SizingParameters) -> Self {
        self.shrink_to_fit = Some(params);
        self
    }

    pub fn bounding_box_fit(mut self, params: SizingParameters) -> Self {
        self.bounding_box_fit = Some(params);
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// The single sizing mode requested, or `ConflictingOptions`.
    pub fn sizing(&self) -> Result<SizingMode> {
        match (&self.shrink_to_fit, &self.bounding_box_fit) {
            (Some(_), Some(_)) => Err(PublishError::ConflictingOptions(
                "shrink-to-fit and bounding-box fit cannot both be requested".to_string(),
            )),
            (Some(p), None) => Ok(SizingMode::ShrinkToFit(p.clone())),
            (None, Some(p)) => Ok(SizingMode::BoundingBoxFit(p.clone())),
            (None, None) => Ok(SizingMode::None),
        }
    }

    /// Apply name defaults and validate.
    pub fn resolve(&self, name: &str) -> Result<Decorations> {
        let sizing = self.sizing()?;
        let caption = match &self.caption {
            Caption::Default => Some(name.to_string()),
            Caption::Text(text) => Some(text.clone()),
            Caption::Suppressed => None,
        };
        let (label, description) = if caption.is_some() {
            (
                Some(self.label.clone().unwrap_or_else(|| name.to_string())),
                self.description.clone(),
            )
        } else {
            (None, None)
        };

        Ok(Decorations {
            caption,
            description,
            label,
            alternate_label_namespace: self.alternate_label_namespace,
            above: self.above,
            sizing,
        })
    }
}

/// Fully resolved decorations. `caption == None` implies no label and no
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorations {
    pub caption: Option<String>,
    pub description: Option<String>,
    pub label: Option<String>,
    pub alternate_label_namespace: bool,
    pub above: bool,
    pub sizing: SizingMode,
}
