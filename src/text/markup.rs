//! Markup helpers: tag stripping and entity escaping.

use super::encoding::Encoding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Tag { quote: Option<u8> },
    Comment,
    Instruction,
}

/// Remove tags, comments and processing instructions, keeping the text.
///
/// A `<` followed by whitespace or by the end of input is kept literally.
/// Inside a tag, `>` within single or double quotes does not close it.
/// An unterminated construct swallows the rest of the input.
///
/// ```
/// use primitive_wrappers::text::markup::strip_markup;
///
/// assert_eq!(strip_markup(b"<p>Hello <b>world</b></p>"), b"Hello world".to_vec());
/// assert_eq!(strip_markup(b"1 < 2"), b"1 < 2".to_vec());
/// ```
pub fn strip_markup(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Text;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            State::Text => {
                if byte == b'<' {
                    let rest = &bytes[i + 1..];
                    match rest.first() {
                        None => out.push(byte),
                        Some(next) if next.is_ascii_whitespace() => out.push(byte),
                        Some(_) if rest.starts_with(b"!--") => {
                            state = State::Comment;
                            i += 3;
                        }
                        Some(b'?') => {
                            state = State::Instruction;
                            i += 1;
                        }
                        Some(_) => state = State::Tag { quote: None },
                    }
                } else {
                    out.push(byte);
                }
            }
            State::Tag { quote: Some(q) } => {
                if byte == q {
                    state = State::Tag { quote: None };
                }
            }
            State::Tag { quote: None } => match byte {
                b'"' | b'\'' => state = State::Tag { quote: Some(byte) },
                b'>' => state = State::Text,
                _ => {}
            },
            State::Comment => {
                if bytes[i..].starts_with(b"-->") {
                    state = State::Text;
                    i += 2;
                }
            }
            State::Instruction => {
                if bytes[i..].starts_with(b"?>") {
                    state = State::Text;
                    i += 1;
                }
            }
        }
        i += 1;
    }

    out
}

/// Escape `&`, `<`, `>`, `"` and `'` as entities.
///
/// Malformed UTF-8 units are replaced with U+FFFD so the output is always
/// valid UTF-8.
pub fn escape_for_markup(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 8);
    for unit in Encoding::Utf8.units(bytes) {
        match unit.ch {
            Some('&') => out.push_str("&amp;"),
            Some('<') => out.push_str("&lt;"),
            Some('>') => out.push_str("&gt;"),
            Some('"') => out.push_str("&quot;"),
            Some('\'') => out.push_str("&#039;"),
            Some(c) => out.push(c),
            None => out.push(char::REPLACEMENT_CHARACTER),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(s: &str) -> String {
        String::from_utf8(strip_markup(s.as_bytes())).unwrap()
    }

    #[test]
    fn strips_nested_tags() {
        assert_eq!(strip("<div><p>Hi <em>there</em></p></div>"), "Hi there");
        assert_eq!(strip("<br/>line<br />"), "line");
    }

    #[test]
    fn quoted_gt_does_not_close_tag() {
        assert_eq!(strip(r#"<a title="a > b" href='x>y'>link</a>"#), "link");
    }

    #[test]
    fn drops_comments_and_instructions() {
        assert_eq!(strip("a<!-- <b>hidden</b> -->b"), "ab");
        assert_eq!(strip("<?php echo 1; ?>text"), "text");
        assert_eq!(strip("<!DOCTYPE html>body"), "body");
    }

    #[test]
    fn literal_less_than_is_kept() {
        assert_eq!(strip("a < b"), "a < b");
        assert_eq!(strip("tail <"), "tail <");
        assert_eq!(strip("x > y"), "x > y");
    }

    #[test]
    fn unterminated_tag_swallows_rest() {
        assert_eq!(strip("keep<b unterminated"), "keep");
        assert_eq!(strip("keep<!-- open"), "keep");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(strip("<p>日本語</p>"), "日本語");
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            escape_for_markup(br#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_for_markup(b"plain"), "plain");
    }

    #[test]
    fn escape_substitutes_malformed_bytes() {
        assert_eq!(escape_for_markup(b"a\xFFb"), "a\u{FFFD}b");
    }
}
