/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Value command implementation
 */

//! `texfrag value`: write a scalar into the values folder.

use std::path::PathBuf;

use anyhow::{Context, Result};

use texfrag_core::{Category, FormatSpec, FragmentOptions, Published, ScalarArtifact};

use super::{load_config, native_runtime, open_publisher, report};

/// Arguments for the value command
#[derive(Debug)]
pub struct ValueArgs {
    pub value: String,
    pub name: String,
    pub round: Option<usize>,
    pub format: Option<String>,
    pub json: bool,
    pub config: Option<PathBuf>,
}

/// Execute the value command
pub fn execute(args: ValueArgs) -> Result<()> {
    let json = args.json;
    let published = run(args)?;
    report(&published, json)
}

/// Integers first, then floats; anything else is text.
fn parse_value(raw: &str) -> ScalarArtifact {
    if let Ok(i) = raw.parse::<i64>() {
        return ScalarArtifact::new(i);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => ScalarArtifact::new(f),
        _ => ScalarArtifact::new(raw),
    }
}

pub fn run(args: ValueArgs) -> Result<Published> {
    let runtime = native_runtime();
    let config = load_config(args.config.as_deref(), runtime.as_ref())?;

    let scalar = parse_value(&args.value);
    let scalar = match (args.round, &args.format) {
        (Some(_), Some(_)) => anyhow::bail!("--round and --format cannot be combined"),
        (Some(digits), None) => scalar.rounded(digits),
        (None, Some(spec)) => {
            let spec: FormatSpec = spec.parse().context("Invalid --format")?;
            scalar.formatted(spec)
        }
        (None, None) => scalar,
    };

    let mut publisher = open_publisher(Category::Value, &config, runtime, args.json)?;
    publisher
        .publish(scalar.into(), &args.name, &FragmentOptions::new())
        .with_context(|| format!("Failed to publish value '{}'", args.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::quiet_config;
    use texfrag_core::{PublishError, ScalarValue};

    fn args(dir: &std::path::Path, value: &str) -> ValueArgs {
        ValueArgs {
            value: value.to_string(),
            name: "v".to_string(),
            round: None,
            format: None,
            json: false,
            config: Some(quiet_config(dir)),
        }
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("12").value, ScalarValue::Integer(12));
        assert_eq!(parse_value("-0.5").value, ScalarValue::Float(-0.5));
        assert_eq!(parse_value("n/a").value, ScalarValue::Text("n/a".to_string()));
        assert_eq!(parse_value("inf").value, ScalarValue::Text("inf".to_string()));
    }

    #[test]
    fn test_rounded_value() {
        let temp = tempfile::tempdir().unwrap();
        let published = run(ValueArgs {
            round: Some(1),
            ..args(temp.path(), "1.124")
        })
        .unwrap();
        assert_eq!(std::fs::read_to_string(published.outer_path).unwrap(), "1.1%");
    }

    #[test]
    fn test_formatted_value() {
        let temp = tempfile::tempdir().unwrap();
        let published = run(ValueArgs {
            format: Some(",.0f".to_string()),
            ..args(temp.path(), "1234567")
        });
        // Integers take no format.
        let err = published.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PublishError>(),
            Some(PublishError::InvalidScalarFormat { .. })
        ));

        let published = run(ValueArgs {
            format: Some(",.1f".to_string()),
            ..args(temp.path(), "1234567.375")
        })
        .unwrap();
        assert_eq!(
            std::fs::read_to_string(published.outer_path).unwrap(),
            "1,234,567.4%"
        );
    }

    #[test]
    fn test_float_needs_format() {
        let temp = tempfile::tempdir().unwrap();
        let err = run(args(temp.path(), "1.1221")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PublishError>(),
            Some(PublishError::MissingFormat { .. })
        ));
        assert!(!temp.path().join("Latex/Values/v.tex").exists());
    }
}
