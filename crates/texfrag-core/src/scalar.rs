/*
 * scalar.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Stringification of scalar values.
//!
//! Text is used verbatim and integers via `Display`. Floats need an explicit
//! decision, either a [`FormatSpec`] or a number of rounding digits; there is
//! no implicit default precision.

use std::str::FromStr;

use crate::artifact::{ScalarArtifact, ScalarFormat, ScalarValue};
use crate::error::{PublishError, Result};

/// Character appended to every written value so that `\input{...}` does not
/// introduce a trailing space in running text.
pub const VALUE_GUARD: char = '%';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// `f`: fixed point.
    Fixed,
    /// `%`: multiplied by 100, fixed point, followed by an escaped percent sign.
    Percent,
    /// `e`: mantissa and signed two-digit exponent.
    Exponent,
}

/// A compact number format: `[,][.precision]kind`, e.g. `.3f`, `,.2f`,
/// `.1%`, `.2e`. Precision defaults to 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub thousands: bool,
    pub precision: usize,
    pub kind: FormatKind,
}

impl FormatSpec {
    pub fn fixed(precision: usize) -> Self {
        Self {
            thousands: false,
            precision,
            kind: FormatKind::Fixed,
        }
    }

    pub fn apply(&self, value: f64) -> String {
        match self.kind {
            FormatKind::Fixed => {
                let s = format!("{:.*}", self.precision, value);
                if self.thousands { group_thousands(&s) } else { s }
            }
            FormatKind::Percent => {
                let s = format!("{:.*}", self.precision, value * 100.0);
                let s = if self.thousands { group_thousands(&s) } else { s };
                format!("{}\\%", s)
            }
            FormatKind::Exponent => {
                let s = format!("{:.*e}", self.precision, value);
                match s.split_once('e') {
                    Some((mantissa, exp)) => {
                        let (sign, digits) = match exp.strip_prefix('-') {
                            Some(d) => ('-', d),
                            None => ('+', exp),
                        };
                        format!("{}e{}{:0>2}", mantissa, sign, digits)
                    }
                    None => s,
                }
            }
        }
    }
}

impl FromStr for FormatSpec {
    type Err = PublishError;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = |message: &str| PublishError::InvalidFormatSpec {
            spec: spec.to_string(),
            message: message.to_string(),
        };

        let mut rest = spec;
        let thousands = match rest.strip_prefix(',') {
            Some(r) => {
                rest = r;
                true
            }
            None => false,
        };

        let kind_char = rest.chars().last().ok_or_else(|| invalid("empty spec"))?;
        let kind = match kind_char {
            'f' | 'F' => FormatKind::Fixed,
            '%' => FormatKind::Percent,
            'e' | 'E' => FormatKind::Exponent,
            _ => return Err(invalid("expected one of 'f', '%', 'e' at the end")),
        };
        rest = &rest[..rest.len() - kind_char.len_utf8()];

        let precision = if rest.is_empty() {
            6
        } else {
            let digits = rest
                .strip_prefix('.')
                .ok_or_else(|| invalid("precision must start with '.'"))?;
            digits
                .parse::<usize>()
                .map_err(|_| invalid("precision is not a number"))?
        };

        Ok(Self {
            thousands,
            precision,
            kind,
        })
    }
}

fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(u) => ("-", u),
        None => ("", s),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Turn a scalar artifact into the text that will be written.
///
/// `name` only feeds error messages.
pub fn stringify(scalar: &ScalarArtifact, name: &str) -> Result<String> {
    match (&scalar.value, &scalar.format) {
        (ScalarValue::Text(s), ScalarFormat::None) => Ok(s.clone()),
        (ScalarValue::Integer(i), ScalarFormat::None) => Ok(i.to_string()),
        (ScalarValue::Text(_) | ScalarValue::Integer(_), _) => {
            Err(PublishError::InvalidScalarFormat {
                name: name.to_string(),
            })
        }
        (ScalarValue::Float(f), ScalarFormat::Spec(spec)) => Ok(spec.apply(*f)),
        (ScalarValue::Float(f), ScalarFormat::Rounding(digits)) => Ok(format!("{:.*}", digits, f)),
        (ScalarValue::Float(_), ScalarFormat::None) => Err(PublishError::MissingFormat {
            name: name.to_string(),
        }),
    }
}

/// File content for a scalar: the value followed by the guard, no newline.
pub fn value_file_content(scalar: &ScalarArtifact, name: &str) -> Result<String> {
    let mut text = stringify(scalar, name)?;
    text.push(VALUE_GUARD);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> FormatSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_rounding() {
        let s = ScalarArtifact::new(1.124).rounded(1);
        assert_eq!(value_file_content(&s, "x").unwrap(), "1.1%");

        let s = ScalarArtifact::new(2.0).rounded(2);
        assert_eq!(stringify(&s, "x").unwrap(), "2.00");

        let s = ScalarArtifact::new(1234.5678).rounded(0);
        assert_eq!(stringify(&s, "x").unwrap(), "1235");
    }

    #[test]
    fn test_text_and_integer_verbatim() {
        assert_eq!(value_file_content(&ScalarArtifact::new("1"), "x").unwrap(), "1%");
        assert_eq!(
            value_file_content(&ScalarArtifact::new(-42_i64), "x").unwrap(),
            "-42%"
        );
    }

    #[test]
    fn test_float_without_format_is_ambiguous() {
        let err = stringify(&ScalarArtifact::new(1.1221), "beta").unwrap_err();
        match err {
            PublishError::MissingFormat { name } => assert_eq!(name, "beta"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_format_on_non_float_is_rejected() {
        let s = ScalarArtifact::new(3_i64).rounded(2);
        assert!(matches!(
            stringify(&s, "n"),
            Err(PublishError::InvalidScalarFormat { .. })
        ));
        let s = ScalarArtifact::new("abc").formatted(FormatSpec::fixed(1));
        assert!(matches!(
            stringify(&s, "n"),
            Err(PublishError::InvalidScalarFormat { .. })
        ));
    }

    #[test]
    fn test_format_spec_parse() {
        assert_eq!(spec(".3f"), FormatSpec::fixed(3));
        assert_eq!(
            spec(",.2f"),
            FormatSpec {
                thousands: true,
                precision: 2,
                kind: FormatKind::Fixed
            }
        );
        assert_eq!(spec("e").precision, 6);
        assert_eq!(spec(".1%").kind, FormatKind::Percent);

        assert!("".parse::<FormatSpec>().is_err());
        assert!(".2d".parse::<FormatSpec>().is_err());
        assert!("2f".parse::<FormatSpec>().is_err());
        assert!(".xf".parse::<FormatSpec>().is_err());
    }

    #[test]
    fn test_format_spec_apply() {
        assert_eq!(spec(".3f").apply(3.14159), "3.142");
        assert_eq!(spec(",.2f").apply(1234567.891), "1,234,567.89");
        assert_eq!(spec(",.0f").apply(-1234.0), "-1,234");
        assert_eq!(spec(",.1f").apply(999.94), "999.9");
        assert_eq!(spec(".1%").apply(0.1234), "12.3\\%");
        assert_eq!(spec(".2e").apply(12345.0), "1.23e+04");
        assert_eq!(spec(".1e").apply(0.00012), "1.2e-04");
    }

    #[test]
    fn test_spec_through_stringify() {
        let s = ScalarArtifact::new(0.5).formatted(spec(".1%"));
        assert_eq!(value_file_content(&s, "share").unwrap(), "50.0\\%%");
    }
}
