//! Line normalizer
//!
//! Removes blank lines and `//` comments. Lines that survive keep their
//! 1-based physical line number so diagnostics can point back at the input.

use serde::{Deserialize, Serialize};

pub const COMMENT_MARKER: &str = "//";

/// A comment-free, non-empty line of VM source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    pub line: usize,
    pub text: String,
}

/// Split `source` into instruction lines, in order
pub fn normalize(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
                return None;
            }
            let code = match trimmed.find(COMMENT_MARKER) {
                Some(pos) => trimmed[..pos].trim_end(),
                None => trimmed,
            };
            Some(SourceLine {
                line: i + 1,
                text: code.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_comments_and_blank_lines() {
        let source = "// header\n\npush constant 7 // seven\n   \n  add\n";
        let lines = normalize(source);
        assert_eq!(
            lines,
            vec![
                SourceLine { line: 3, text: "push constant 7".to_string() },
                SourceLine { line: 5, text: "add".to_string() },
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let lines = normalize("push constant 1\r\npop temp 0\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "pop temp 0");
        assert_eq!(lines[1].line, 2);
    }

    #[test]
    fn test_indented_comment_is_dropped() {
        assert!(normalize("    // nothing here\n\t\n").is_empty());
    }

    #[test]
    fn test_malformed_lines_pass_through() {
        let lines = normalize("foo bar baz");
        assert_eq!(lines[0].text, "foo bar baz");
    }
}
