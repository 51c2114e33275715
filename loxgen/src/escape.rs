//! String Literal Escaping
//!
//! Only `\` and `"` are escaped. Newlines, tabs and non-ASCII text are legal
//! inside a Rust string literal and pass through untouched.

/// Escapes `raw` for interpolation between `"` delimiters.
///
/// Backslashes are escaped first. Escaping quotes first would double the
/// backslash introduced in front of each quote.
///
/// A carriage return not followed by `\n` is passed through as is and
/// rustc rejects it inside a string literal, so sources must use `\n` or
/// `\r\n` line endings.
pub fn escape_literal(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Reverses [`escape_literal`].
///
/// Returns `None` if `escaped` contains an escape sequence that
/// [`escape_literal`] never produces, including a dangling backslash.
pub fn unescape_literal(escaped: &str) -> Option<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(e @ ('\\' | '"')) => out.push(e),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_literal("print 1 + 2;"), "print 1 + 2;");
    }

    #[test]
    fn test_quotes_and_backslashes() {
        assert_eq!(escape_literal(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_literal(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_backslash_before_quote() {
        // `a\"b` must become `a\\\"b`, not `a\\\\"b` or `a\\"b`.
        assert_eq!(escape_literal(r#"a\"b"#), r#"a\\\"b"#);
        assert_eq!(unescape_literal(r#"a\\\"b"#).as_deref(), Some(r#"a\"b"#));
    }

    #[test]
    fn test_whitespace_and_unicode_pass_through() {
        let raw = "line one\n\tline two ünïcödé\n";
        assert_eq!(escape_literal(raw), raw);
    }

    #[test]
    fn test_unescape_rejects_foreign_sequences() {
        assert_eq!(unescape_literal(r"\n"), None);
        assert_eq!(unescape_literal("trailing\\"), None);
    }

    proptest! {
        #[test]
        fn escape_round_trips(raw in ".*") {
            prop_assert_eq!(unescape_literal(&escape_literal(&raw)), Some(raw));
        }

        #[test]
        fn escape_round_trips_dense(raw in r#"[\\"ab\n]{0,32}"#) {
            let escaped = escape_literal(&raw);
            // Every quote in the output is preceded by an odd run of backslashes.
            let bytes = escaped.as_bytes();
            for (i, b) in bytes.iter().enumerate() {
                if *b == b'"' {
                    let run = bytes[..i].iter().rev().take_while(|c| **c == b'\\').count();
                    prop_assert!(run % 2 == 1, "unescaped quote in {:?}", escaped);
                }
            }
            prop_assert_eq!(unescape_literal(&escaped), Some(raw));
        }
    }
}
