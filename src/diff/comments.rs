//! Comment stripping applied to full-file sources before diffing, so that
//! comment-only edits do not surface as code changes.

/// Comment grammar family for a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `//` line comments and `/* */` block comments, string/char aware.
    CFamily,
    /// No stripping.
    Plain,
}

/// Pick the comment grammar for a dotted extension (e.g. ".c").
#[must_use]
pub fn style_for(lang: &str) -> CommentStyle {
    match lang {
        ".c" | ".h" | ".cpp" | ".hpp" | ".cc" | ".cxx" | ".java" | ".js" | ".cs" | ".go"
        | ".rs" => CommentStyle::CFamily,
        _ => CommentStyle::Plain,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str,
    Char,
}

/// Remove comments from source text.
///
/// Line comments are dropped to end of line; block comment content is
/// dropped but newlines inside it are kept, so line numbering survives for
/// the line-level diff. String and char literals are never touched.
#[must_use]
pub fn strip_comments(source: &str, style: CommentStyle) -> String {
    if style == CommentStyle::Plain {
        return source.to_string();
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '"' => {
                    out.push(c);
                    state = State::Str;
                }
                '\'' => {
                    out.push(c);
                    state = State::Char;
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '\n' {
                    out.push(c);
                } else if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Str => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '"' {
                    state = State::Code;
                }
            }
            State::Char => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '\'' {
                    state = State::Code;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_comments() {
        let out = strip_comments("int x = 1; // set x\nint y = 2;\n", CommentStyle::CFamily);
        assert_eq!(out, "int x = 1; \nint y = 2;\n");
    }

    #[test]
    fn strips_block_comments_keeping_newlines() {
        let out = strip_comments("a;\n/* one\ntwo */\nb;\n", CommentStyle::CFamily);
        assert_eq!(out, "a;\n\n\nb;\n");
    }

    #[test]
    fn preserves_string_literals() {
        let src = "char *s = \"not // a comment\";\n";
        assert_eq!(strip_comments(src, CommentStyle::CFamily), src);

        let src = "char *u = \"not /* either */\";\n";
        assert_eq!(strip_comments(src, CommentStyle::CFamily), src);
    }

    #[test]
    fn preserves_escaped_quote_in_string() {
        let src = "char *s = \"quote \\\" then // text\";\n";
        assert_eq!(strip_comments(src, CommentStyle::CFamily), src);
    }

    #[test]
    fn preserves_char_literals() {
        let src = "char slash = '/'; char quote = '\\'';\n";
        assert_eq!(strip_comments(src, CommentStyle::CFamily), src);
    }

    #[test]
    fn division_is_not_a_comment() {
        let src = "int z = a / b / c;\n";
        assert_eq!(strip_comments(src, CommentStyle::CFamily), src);
    }

    #[test]
    fn plain_style_is_identity() {
        let src = "// looks like a comment\n";
        assert_eq!(strip_comments(src, CommentStyle::Plain), src);
    }

    #[test]
    fn style_for_maps_extensions() {
        assert_eq!(style_for(".c"), CommentStyle::CFamily);
        assert_eq!(style_for(".h"), CommentStyle::CFamily);
        assert_eq!(style_for(".py"), CommentStyle::Plain);
        assert_eq!(style_for(""), CommentStyle::Plain);
    }

    #[test]
    fn unterminated_block_comment_drops_rest() {
        let out = strip_comments("a;\n/* open\nstill open", CommentStyle::CFamily);
        assert_eq!(out, "a;\n\n");
    }
}
