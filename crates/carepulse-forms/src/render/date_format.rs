//! Date format patterns
//!
//! Field specifications carry patterns in the Unicode-style token syntax
//! used by the date picker (`MM/dd/yyyy  -  h:mm aa`). Display strings are
//! produced with chrono, so patterns are translated to strftime.

use chrono::NaiveDateTime;
use std::fmt::Write as _;

pub const DEFAULT_DATE_FORMAT: &str = "MM/dd/yyyy";

/// Longest tokens first so `MMMM` wins over `MM`
const TOKENS: [(&str, &str); 19] = [
    ("yyyy", "%Y"),
    ("yy", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("dd", "%d"),
    ("d", "%-d"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("EEEE", "%A"),
    ("aa", "%p"),
    ("a", "%p"),
];

/// Translate a picker pattern to a chrono strftime string.
///
/// Text between single quotes is copied literally; `''` is a quote.
pub fn to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '\'' {
            if let Some(stripped) = rest.strip_prefix("''") {
                out.push('\'');
                rest = stripped;
                continue;
            }
            rest = &rest[1..];
            loop {
                match rest.find('\'') {
                    None => {
                        push_literal(&mut out, rest);
                        rest = "";
                        break;
                    }
                    Some(end) => {
                        push_literal(&mut out, &rest[..end]);
                        rest = &rest[end + 1..];
                        match rest.strip_prefix('\'') {
                            Some(stripped) => {
                                out.push('\'');
                                rest = stripped;
                            }
                            None => break,
                        }
                    }
                }
            }
            continue;
        }

        for (token, spec) in TOKENS {
            if let Some(stripped) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = stripped;
                continue 'outer;
            }
        }

        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

/// Format a picked value with a picker pattern
pub fn format_datetime(value: &NaiveDateTime, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", value.format(&to_strftime(pattern))).ok()?;
    Some(out)
}
