use serde::Serialize;

use crate::models::hunk::Hunk;

/// One file's worth of change: identity plus one or more hunks.
///
/// All hunks in a file diff share the `name`/`lang` of the file they came
/// from; `name` is the file stem, `lang` the extension with its leading dot
/// (empty when the file has none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    pub name: String,
    pub lang: String,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    #[must_use]
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            hunks: Vec::new(),
        }
    }

    pub fn push(&mut self, hunk: Hunk) {
        self.hunks.push(hunk);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// One patch: an ordered sequence of file diffs.
///
/// A patch with zero file diffs is "empty", a valid terminal state meaning
/// no usable patch, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub files: Vec<FileDiff>,
}

impl Patch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: FileDiff) {
        self.files.push(file);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total hunk count across all file diffs.
    #[must_use]
    pub fn hunk_count(&self) -> usize {
        self.files.iter().map(|f| f.hunks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::line::{Line, LineKind};

    #[test]
    fn empty_patch_is_terminal_state() {
        let p = Patch::new();
        assert!(p.is_empty());
        assert_eq!(p.hunk_count(), 0);
    }

    #[test]
    fn hunk_count_sums_across_files() {
        let mut file_a = FileDiff::new("main", ".c");
        let mut h = Hunk::new("@@ -1 +1 @@");
        h.push(Line::new(LineKind::Added, "x"));
        file_a.push(h.clone());
        file_a.push(h.clone());

        let mut file_b = FileDiff::new("util", ".h");
        file_b.push(h);

        let mut p = Patch::new();
        p.push(file_a);
        p.push(file_b);
        assert_eq!(p.hunk_count(), 3);
        assert!(!p.is_empty());
    }
}
