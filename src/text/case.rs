//! Case-boundary tokenization: snake, kebab and camel case.
//!
//! All three conversions share one notion of a word boundary:
//!
//! - (a) an ASCII lowercase letter or digit immediately followed by an ASCII
//!   uppercase letter (`helloWorld` → `hello|World`), or
//! - (b) a run of whitespace or of the separators *other than* the target
//!   one (`hello--world` → `hello|world` when converting to snake case).
//!   Target separators touching the run belong to it, so `hello_ world`
//!   is one boundary.
//!
//! Rule (a) inserts the separator between the two characters, rule (b)
//! replaces the whole run, so consecutive separators collapse to one. A run
//! made only of the target separator is not a boundary and is kept.
//! Both rules only inspect ASCII, which keeps multibyte text intact and
//! makes `to_snake(to_snake(x)) == to_snake(x)` hold: after the final
//! lowercase pass no ASCII uppercase letter is left to trigger rule (a).
//!
//! The functions here work on raw bytes so they never fail, even on text
//! that is not valid UTF-8.

use std::sync::OnceLock;

use regex::bytes::{Captures, Regex};

use super::encoding::Encoding;

fn snake_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])|[\s_-]*[\s-][\s_-]*").expect("static pattern"))
}

fn kebab_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])|[\s_-]*[\s_][\s_-]*").expect("static pattern"))
}

fn camel_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:[_ -]+|^)([a-zA-Z0-9])").expect("static pattern"))
}

fn snake_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").expect("static pattern"))
}

/// Lowercase every well-formed character; malformed bytes pass through.
pub fn to_lower(bytes: &[u8]) -> Vec<u8> {
    map_chars(bytes, |c, out| out.extend(c.to_lowercase()))
}

/// Uppercase every well-formed character; malformed bytes pass through.
pub fn to_upper(bytes: &[u8]) -> Vec<u8> {
    map_chars(bytes, |c, out| out.extend(c.to_uppercase()))
}

fn map_chars(bytes: &[u8], mut f: impl FnMut(char, &mut String)) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut buf = String::new();
    for unit in Encoding::Utf8.units(bytes) {
        match unit.ch {
            Some(c) => {
                buf.clear();
                f(c, &mut buf);
                out.extend_from_slice(buf.as_bytes());
            }
            None => out.extend_from_slice(unit.bytes),
        }
    }
    out
}

/// Apply `f` to the first well-formed character only.
pub(crate) fn map_first(bytes: &[u8], f: impl FnOnce(char) -> String) -> Vec<u8> {
    match Encoding::Utf8.units(bytes).next() {
        Some(unit) => {
            let mut out = Vec::with_capacity(bytes.len());
            match unit.ch {
                Some(c) => out.extend_from_slice(f(c).as_bytes()),
                None => out.extend_from_slice(unit.bytes),
            }
            out.extend_from_slice(&bytes[unit.bytes.len()..]);
            out
        }
        None => Vec::new(),
    }
}

fn separate(bytes: &[u8], boundary: &Regex, separator: u8) -> Vec<u8> {
    let joined = boundary.replace_all(bytes, |caps: &Captures<'_>| {
        match (caps.get(1), caps.get(2)) {
            (Some(lower), Some(upper)) => {
                let mut piece = Vec::with_capacity(3);
                piece.extend_from_slice(lower.as_bytes());
                piece.push(separator);
                piece.extend_from_slice(upper.as_bytes());
                piece
            }
            _ => vec![separator],
        }
    });
    to_lower(&joined)
}

/// `helloWorld`, `Hello World`, `hello-world` → `hello_world`.
pub fn to_snake(bytes: &[u8]) -> Vec<u8> {
    separate(bytes, snake_boundary(), b'_')
}

/// `helloWorld`, `Hello World`, `hello_world` → `hello-world`.
pub fn to_kebab(bytes: &[u8]) -> Vec<u8> {
    separate(bytes, kebab_boundary(), b'-')
}

/// `hello_world`, `hello-world`, `Hello World` → `helloWorld`.
pub fn to_camel(bytes: &[u8]) -> Vec<u8> {
    let joined = camel_boundary().replace_all(bytes, |caps: &Captures<'_>| {
        caps[1].to_ascii_uppercase()
    });
    map_first(&joined, |c| c.to_lowercase().collect())
}

/// Whether `bytes` are already normalized snake case.
pub fn is_snake(bytes: &[u8]) -> bool {
    snake_shape().is_match(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(s: &str) -> String {
        String::from_utf8(to_snake(s.as_bytes())).unwrap()
    }

    fn kebab(s: &str) -> String {
        String::from_utf8(to_kebab(s.as_bytes())).unwrap()
    }

    fn camel(s: &str) -> String {
        String::from_utf8(to_camel(s.as_bytes())).unwrap()
    }

    mod snake_case {
        use super::*;

        #[test]
        fn splits_lower_upper_transitions() {
            assert_eq!(snake("helloWorld"), "hello_world");
            assert_eq!(snake("HelloWorld"), "hello_world");
            assert_eq!(snake("version2Beta"), "version2_beta");
        }

        #[test]
        fn replaces_whitespace_and_dashes() {
            assert_eq!(snake("Hello World"), "hello_world");
            assert_eq!(snake("hello--world"), "hello_world");
            assert_eq!(snake("hello - \t world"), "hello_world");
        }

        #[test]
        fn leading_run_collapses_to_one_separator() {
            assert_eq!(snake("  hello"), "_hello");
            assert_eq!(snake("--hello"), "_hello");
        }

        #[test]
        fn mixed_runs_collapse() {
            assert_eq!(snake("hello_ world"), "hello_world");
            assert_eq!(snake("hello_-world"), "hello_world");
            assert_eq!(snake("hello -_ world"), "hello_world");
            assert_eq!(snake("_ hello"), "_hello");
            assert_eq!(snake(" _hello"), "_hello");
        }

        #[test]
        fn own_separator_is_not_a_boundary() {
            assert_eq!(snake("hello__world"), "hello__world");
        }

        #[test]
        fn no_boundary_only_lowercases() {
            assert_eq!(snake("HELLO"), "hello");
            assert_eq!(snake("plain"), "plain");
            assert_eq!(snake(""), "");
        }

        #[test]
        fn multibyte_passes_through() {
            assert_eq!(snake("Привет Мир"), "привет_мир");
            assert_eq!(snake("日本語テキスト"), "日本語テキスト");
        }

        #[test]
        fn malformed_bytes_survive() {
            assert_eq!(to_snake(b"ab\xFFCd"), b"ab\xffcd".to_vec());
            assert_eq!(to_snake(b"aB \xFF"), b"a_b_\xff".to_vec());
        }
    }

    mod kebab_case {
        use super::*;

        #[test]
        fn sentence() {
            assert_eq!(kebab("Lorem ipsum dolor sit amet"), "lorem-ipsum-dolor-sit-amet");
        }

        #[test]
        fn underscores_and_humps() {
            assert_eq!(kebab("hello_world"), "hello-world");
            assert_eq!(kebab("helloWorld"), "hello-world");
            assert_eq!(kebab("hello__ world"), "hello-world");
            assert_eq!(kebab("hello--world"), "hello--world");
        }

        #[test]
        fn mixed_runs_collapse() {
            assert_eq!(kebab("hello- world"), "hello-world");
            assert_eq!(kebab("hello-_world"), "hello-world");
            assert_eq!(kebab("- hello"), "-hello");
        }
    }

    mod camel_case {
        use super::*;

        #[test]
        fn joins_words() {
            assert_eq!(camel("hello_world"), "helloWorld");
            assert_eq!(camel("hello-world"), "helloWorld");
            assert_eq!(camel("Hello World"), "helloWorld");
        }

        #[test]
        fn separator_runs_are_dropped() {
            assert_eq!(camel("hello__world"), "helloWorld");
            assert_eq!(camel("_hello_world"), "helloWorld");
            assert_eq!(camel("hello - world"), "helloWorld");
        }

        #[test]
        fn keeps_existing_humps_and_digits() {
            assert_eq!(camel("helloWorld"), "helloWorld");
            assert_eq!(camel("item_2_name"), "item2Name");
        }

        #[test]
        fn first_codepoint_is_lowered_even_when_multibyte() {
            assert_eq!(camel("Über_cool"), "überCool");
            assert_eq!(camel(""), "");
        }
    }

    #[test]
    fn snake_shape_recognition() {
        assert!(is_snake(b"hello_world"));
        assert!(is_snake(b"a1_b2_c3"));
        assert!(!is_snake(b"hello-world"));
        assert!(!is_snake(b"Hello_world"));
        assert!(!is_snake(b"hello__world"));
        assert!(!is_snake(b"_hello"));
        assert!(!is_snake(b""));
    }

    #[test]
    fn case_mapping_is_multibyte_safe() {
        assert_eq!(to_upper("straße".as_bytes()), "STRASSE".as_bytes());
        assert_eq!(to_lower("ÀÉÎ".as_bytes()), "àéî".as_bytes());
        assert_eq!(to_lower(b"A\xFFB"), b"a\xffb".to_vec());
    }
}
