use serde::Serialize;

use crate::models::line::Line;

/// One contiguous change block inside a file diff.
///
/// Addition and deletion counts are always derived from the line sequence,
/// never stored, so they cannot disagree with the content. The parser only
/// constructs hunks with at least one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    /// The `@@ ... @@` header line that opened this hunk.
    pub name: String,
    pub lines: Vec<Line>,
}

impl Hunk {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Count of `Added` lines.
    #[must_use]
    pub fn additions(&self) -> u32 {
        self.lines.iter().filter(|l| l.is_added()).count() as u32
    }

    /// Count of `Removed` lines.
    #[must_use]
    pub fn deletions(&self) -> u32 {
        self.lines.iter().filter(|l| l.is_removed()).count() as u32
    }

    /// The hunk body as text, line texts joined with newlines.
    #[must_use]
    pub fn body(&self) -> String {
        let texts: Vec<&str> = self.lines.iter().map(|l| l.text.as_str()).collect();
        texts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::line::LineKind;

    fn sample() -> Hunk {
        let mut h = Hunk::new("@@ -1,3 +1,3 @@");
        h.push(Line::new(LineKind::Context, "int main() {"));
        h.push(Line::new(LineKind::Removed, "int x = 1;"));
        h.push(Line::new(LineKind::Added, "int x = 2;"));
        h.push(Line::new(LineKind::Context, "}"));
        h
    }

    #[test]
    fn counts_derive_from_lines() {
        let h = sample();
        assert_eq!(h.additions(), 1);
        assert_eq!(h.deletions(), 1);
    }

    #[test]
    fn counts_track_mutation() {
        let mut h = sample();
        h.push(Line::new(LineKind::Added, "int y = 3;"));
        assert_eq!(h.additions(), 2);
        assert_eq!(h.deletions(), 1);
    }

    #[test]
    fn body_joins_line_texts() {
        let h = sample();
        assert_eq!(h.body(), "int main() {\nint x = 1;\nint x = 2;\n}");
    }

    #[test]
    fn new_hunk_is_empty() {
        let h = Hunk::new("@@ -1 +1 @@");
        assert!(h.is_empty());
        assert_eq!(h.additions(), 0);
        assert_eq!(h.deletions(), 0);
    }
}
