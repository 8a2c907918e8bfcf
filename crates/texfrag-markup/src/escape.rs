/*
 * escape.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Escaping of LaTeX special characters in plain text.

/// Escape a string so that it typesets literally.
///
/// Covers the ten characters that carry meaning in LaTeX body text.
pub fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\^{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_latex("Mean return"), "Mean return");
    }

    #[test]
    fn test_specials() {
        assert_eq!(escape_latex("5% & $3"), r"5\% \& \$3");
        assert_eq!(escape_latex("a_b#{c}"), r"a\_b\#\{c\}");
        assert_eq!(escape_latex("~^"), r"\textasciitilde{}\^{}");
        assert_eq!(escape_latex(r"\alpha"), r"\textbackslash{}alpha");
    }
}
