use std::path::Path;

use crate::models::hunk::Hunk;
use crate::models::line::Line;
use crate::models::patch::{FileDiff, Patch};

/// File identity derived from a diff header path: stem plus dotted extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIdentity {
    pub name: String,
    pub lang: String,
}

impl FileIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    /// Parse an identity out of a `---`/`+++` header payload.
    ///
    /// Takes the first whitespace-delimited token (headers may carry a
    /// timestamp after a tab), strips the git `a/`/`b/` prefix, and splits
    /// into stem and extension.
    #[must_use]
    pub fn from_header_path(payload: &str) -> Self {
        let token = payload.split_whitespace().next().unwrap_or("");
        let token = token
            .strip_prefix("a/")
            .or_else(|| token.strip_prefix("b/"))
            .unwrap_or(token);

        let path = Path::new(token);
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let lang = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Self { name, lang }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.lang.is_empty()
    }
}

/// Streaming state for one pass over the diff text.
struct Parser<'a> {
    fallback: &'a FileIdentity,
    patch: Patch,
    current_file: Option<FileDiff>,
    /// Identity remembered from a `---` header until `+++` resolves it.
    pending_from: Option<FileIdentity>,
    current_hunk: Option<Hunk>,
}

impl<'a> Parser<'a> {
    fn new(fallback: &'a FileIdentity) -> Self {
        Self {
            fallback,
            patch: Patch::new(),
            current_file: None,
            pending_from: None,
            current_hunk: None,
        }
    }

    /// Close the open hunk; empty hunks are dropped, not errors.
    fn close_hunk(&mut self) {
        if let Some(hunk) = self.current_hunk.take() {
            if hunk.is_empty() {
                tracing::trace!(header = %hunk.name, "dropping empty hunk");
            } else if let Some(file) = self.current_file.as_mut() {
                file.push(hunk);
            }
        }
    }

    /// Close the open file diff; hunkless files are dropped, not errors.
    fn close_file(&mut self) {
        self.close_hunk();
        if let Some(file) = self.current_file.take() {
            if file.is_empty() {
                tracing::trace!(name = %file.name, "dropping file diff without hunks");
            } else {
                self.patch.push(file);
            }
        }
    }

    /// The identity for a hunk that arrives before any file header: the
    /// pending `---` side if one was seen, else the caller's fallback.
    fn implicit_identity(&mut self) -> FileIdentity {
        self.pending_from
            .take()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn feed(&mut self, raw: &str) {
        if raw.starts_with("diff ") {
            // `diff --git` (and friends) introduce the next file section.
            self.close_file();
            self.pending_from = None;
        } else if let Some(payload) = raw.strip_prefix("--- ") {
            self.close_file();
            self.pending_from = Some(FileIdentity::from_header_path(payload));
        } else if let Some(payload) = raw.strip_prefix("+++ ") {
            self.close_file();
            let to = FileIdentity::from_header_path(payload);
            let from = self.pending_from.take();
            // Deleted files diff against /dev/null on the to side.
            let identity = if payload.split_whitespace().next() == Some("/dev/null") {
                from.unwrap_or_else(|| self.fallback.clone())
            } else {
                to
            };
            self.current_file = Some(FileDiff::new(identity.name, identity.lang));
        } else if raw.starts_with("@@") {
            self.close_hunk();
            if self.current_file.is_none() {
                let identity = self.implicit_identity();
                self.current_file = Some(FileDiff::new(identity.name, identity.lang));
            }
            self.current_hunk = Some(Hunk::new(raw));
        } else if self.current_hunk.is_some() {
            if raw.starts_with('\\') {
                // "\ No newline at end of file" is not part of either side.
                return;
            }
            if let Some(hunk) = self.current_hunk.as_mut() {
                hunk.push(Line::classify(raw));
            }
        }
        // Lines outside any hunk (index, mode, binary notices) are ignored.
    }

    fn finish(mut self) -> Patch {
        self.close_file();
        self.patch
    }
}

/// Parse unified-diff text (one or more concatenated diffs) into a `Patch`.
///
/// The parser is lenient: malformed fragments degrade to "nothing produced"
/// rather than erroring, because upstream catalogs are uncontrolled. Input
/// with no recognizable structure yields an empty patch. Hunks seen before
/// any file header (GitHub per-file patch fragments) attach to a file diff
/// built from `fallback`.
#[must_use]
pub fn parse(text: &str, fallback: &FileIdentity) -> Patch {
    parse_lines(text.lines(), fallback)
}

/// Line-iterator form of [`parse`], for already-split input.
pub fn parse_lines<'a, I>(lines: I, fallback: &FileIdentity) -> Patch
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = Parser::new(fallback);
    for line in lines {
        parser.feed(line);
    }
    parser.finish()
}
