use serde::Serialize;

/// The role a line plays inside a hunk body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Added,
    Removed,
    Context,
}

/// A single line of a hunk body, marker stripped, text otherwise verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    #[must_use]
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Classify a raw hunk-body line by its marker character.
    ///
    /// `+` and `-` markers are stripped. Context lines lose one leading
    /// space when present (the unified-diff context marker); anything else
    /// is kept verbatim so loosely formatted input still round-trips.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix('+') {
            Self::new(LineKind::Added, rest)
        } else if let Some(rest) = raw.strip_prefix('-') {
            Self::new(LineKind::Removed, rest)
        } else if let Some(rest) = raw.strip_prefix(' ') {
            Self::new(LineKind::Context, rest)
        } else {
            Self::new(LineKind::Context, raw)
        }
    }

    #[must_use]
    pub fn is_added(&self) -> bool {
        self.kind == LineKind::Added
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.kind == LineKind::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_strips_markers() {
        let added = Line::classify("+int x = 2;");
        assert_eq!(added.kind, LineKind::Added);
        assert_eq!(added.text, "int x = 2;");

        let removed = Line::classify("-int x = 1;");
        assert_eq!(removed.kind, LineKind::Removed);
        assert_eq!(removed.text, "int x = 1;");

        let context = Line::classify(" return x;");
        assert_eq!(context.kind, LineKind::Context);
        assert_eq!(context.text, "return x;");
    }

    #[test]
    fn classify_keeps_unmarked_lines_verbatim() {
        let line = Line::classify("no marker here");
        assert_eq!(line.kind, LineKind::Context);
        assert_eq!(line.text, "no marker here");
    }

    #[test]
    fn classify_preserves_inner_whitespace() {
        let line = Line::classify("+\tindented");
        assert_eq!(line.text, "\tindented");

        let context = Line::classify("  double space");
        assert_eq!(context.text, " double space");
    }
}
