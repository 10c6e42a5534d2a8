pub mod comments;
pub mod compute;
pub mod parser;

pub use compute::unified_diff;
pub use parser::{parse, FileIdentity};

/// Split source text into discrete lines, dropping trailing blank entries
/// so pre-processed input cannot produce spurious empty hunks.
#[must_use]
pub fn split_lines(source: &str) -> Vec<String> {
    let mut lines: Vec<String> = source.lines().map(str::to_string).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_drops_trailing_blanks() {
        let lines = split_lines("a\nb\n\n\n");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn split_lines_keeps_interior_blanks() {
        let lines = split_lines("a\n\nb\n");
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn split_lines_empty_input() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n\n").is_empty());
    }
}
