//! # String Escaping
//!
//! Quoting rules for JSON strings and YAML scalars.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Substrings that may not appear in a plain YAML scalar.
/// Brackets, braces and commas are only forbidden inside flow collections,
/// but plain scalars never contain them here.
const YAML_PLAIN_FORBIDDEN: &[&str] = &[": ", " #", "[", "]", "{", "}", ","];

/// Characters a plain YAML scalar may not start with.
const YAML_INDICATORS: &[char] = &[
    '-', '?', ':', ',', '{', '}', '[', ']', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

/// Characters a plain YAML scalar may not end with.
const YAML_PLAIN_FORBIDDEN_TERMINALS: &[char] = &[':'];

/// Boolean spellings of YAML 1.1 and 1.2, compared case-insensitively.
const YAML_BOOLEANS: &[&str] = &["true", "false", "yes", "no", "on", "off", "y", "n"];

/// Escapes a string into a quoted JSON string literal.
///
/// Backslashes go first so the escapes added afterwards are not doubled.
pub fn json_compatible_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn yaml_control_escape(c: char) -> Option<&'static str> {
    Some(match c {
        '\0' => "\\0",
        '\u{01}' => "\\x01",
        '\u{02}' => "\\x02",
        '\u{03}' => "\\x03",
        '\u{04}' => "\\x04",
        '\u{05}' => "\\x05",
        '\u{06}' => "\\x06",
        '\u{07}' => "\\a",
        '\u{08}' => "\\b",
        '\t' => "\\t",
        '\n' => "\\n",
        '\u{0b}' => "\\v",
        '\u{0c}' => "\\f",
        '\r' => "\\r",
        '\u{0e}' => "\\x0e",
        '\u{0f}' => "\\x0f",
        '\u{10}' => "\\x10",
        '\u{11}' => "\\x11",
        '\u{12}' => "\\x12",
        '\u{13}' => "\\x13",
        '\u{14}' => "\\x14",
        '\u{15}' => "\\x15",
        '\u{16}' => "\\x16",
        '\u{17}' => "\\x17",
        '\u{18}' => "\\x18",
        '\u{19}' => "\\x19",
        '\u{1a}' => "\\x1a",
        '\u{1b}' => "\\e",
        '\u{1c}' => "\\x1c",
        '\u{1d}' => "\\x1d",
        '\u{1e}' => "\\x1e",
        '\u{1f}' => "\\x1f",
        _ => return None,
    })
}

fn looks_like_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
}

fn looks_like_boolean(value: &str) -> bool {
    YAML_BOOLEANS.iter().any(|b| b.eq_ignore_ascii_case(value))
}

/// Renders a string as a YAML scalar, quoting only when a plain scalar would be
/// read back differently.
pub fn yaml_compatible_string(value: &str) -> String {
    match value {
        "" => return "''".to_string(),
        "null" | "Null" | "NULL" => return format!("'{}'", value),
        "~" => return "'~'".to_string(),
        _ => {}
    }

    if value.chars().any(|c| yaml_control_escape(c).is_some()) {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                c => match yaml_control_escape(c) {
                    Some(escaped) => out.push_str(escaped),
                    None => out.push(c),
                },
            }
        }
        out.push('"');
        return out;
    }

    let needs_single_quotes = YAML_PLAIN_FORBIDDEN.iter().any(|f| value.contains(f))
        || value.starts_with(YAML_INDICATORS)
        || value.ends_with(YAML_PLAIN_FORBIDDEN_TERMINALS)
        || value.trim() != value;
    if needs_single_quotes {
        return format!("'{}'", value.replace('\'', "''"));
    }

    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    let number_re = NUMBER_RE.get_or_init(|| {
        Regex::new(r"^[-+]?(\d+(\.\d*)?|\.\d+)([eE][-+]?\d+)?$").expect("Invalid regex")
    });

    static HEX_RE: OnceLock<Regex> = OnceLock::new();
    let hex_re = HEX_RE.get_or_init(|| Regex::new(r"^0[xX][0-9a-fA-F]+$").expect("Invalid regex"));

    if number_re.is_match(value)
        || hex_re.is_match(value)
        || looks_like_boolean(value)
        || looks_like_timestamp(value)
    {
        return format!("'{}'", value);
    }

    value.to_string()
}
