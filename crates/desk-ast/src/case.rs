//! Identifier case conversion.
//!
//! Inputs are compound identifiers whose words are separated by underscores and/or an
//! uppercase letter starting the next word (`my_value`, `MyValue`). Boundaries are
//! found by looking at the *next* character, never the previous one, so `HTTPServer`
//! splits before every capital: `h_t_t_p_server`.
//!
//! Letters are classified as ASCII; anything else passes through untouched.

use alloc::string::String;
use core::fmt::{self, Write};

/// A naming convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Case {
    /// `My Value`
    Spaced,
    /// `my_value`
    LowerSnake,
    /// `MY_VALUE`
    UpperSnake,
    /// `MyValue`
    UpperCamel,
    /// `myValue`
    LowerCamel,
}

fn next_is_upper(next: Option<char>) -> bool {
    next.is_some_and(|c| c.is_ascii_uppercase())
}

fn write_spaced<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            continue;
        }
        out.write_char(c)?;
        let next = chars.peek().copied();
        if next_is_upper(next) || next == Some('_') {
            out.write_char(' ')?;
        }
    }
    Ok(())
}

fn write_snake<W: Write>(out: &mut W, text: &str, upper: bool) -> fmt::Result {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.write_char(if upper {
            c.to_ascii_uppercase()
        } else {
            c.to_ascii_lowercase()
        })?;
        if next_is_upper(chars.peek().copied()) {
            out.write_char('_')?;
        }
    }
    Ok(())
}

fn write_camel<W: Write>(out: &mut W, text: &str, lower_first: bool) -> fmt::Result {
    let mut capitalize = true;
    let mut first = true;
    for c in text.chars() {
        if c == '_' {
            capitalize = true;
            continue;
        }
        let c = if first && lower_first {
            c.to_ascii_lowercase()
        } else if capitalize {
            c.to_ascii_uppercase()
        } else {
            c
        };
        out.write_char(c)?;
        capitalize = false;
        first = false;
    }
    Ok(())
}

/// Write `text` in `case` to any formatter sink.
pub fn write_case<W: Write>(out: &mut W, text: &str, case: Case) -> fmt::Result {
    match case {
        Case::Spaced => write_spaced(out, text),
        Case::LowerSnake => write_snake(out, text, false),
        Case::UpperSnake => write_snake(out, text, true),
        Case::UpperCamel => write_camel(out, text, false),
        Case::LowerCamel => write_camel(out, text, true),
    }
}

/// Convert `text` to `case`.
pub fn convert(text: &str, case: Case) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    // Writing into a String cannot fail.
    let _ = write_case(&mut out, text, case);
    out
}

/// `MyValue` -> `My Value`
pub fn to_spaced(text: &str) -> String {
    convert(text, Case::Spaced)
}

/// `MyValue` -> `my_value`
pub fn to_lower_snake(text: &str) -> String {
    convert(text, Case::LowerSnake)
}

/// `MyValue` -> `MY_VALUE`
pub fn to_upper_snake(text: &str) -> String {
    convert(text, Case::UpperSnake)
}

/// `my_value` -> `MyValue`
pub fn to_upper_camel(text: &str) -> String {
    convert(text, Case::UpperCamel)
}

/// `my_value` -> `myValue`
pub fn to_lower_camel(text: &str) -> String {
    convert(text, Case::LowerCamel)
}
