//! Text cleanup applied by callers before validation
//!
//! Sanitizing is not part of the rule engine. Secret fields are never
//! sanitized: control and whitespace characters may be intentional password
//! content.

use crate::field::Field;
use crate::form::FormInput;
use crate::value::FieldValue;

/// Strip control characters, collapse whitespace runs, and trim both ends
///
/// Control characters are code points below 0x20 plus 0x7F. They are removed
/// before whitespace is collapsed, so a tab or newline joins its neighbours.
pub fn sanitize_input(value: &str) -> String {
    value
        .chars()
        .filter(|c| !is_control(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_control(c: char) -> bool {
    (c as u32) < 0x20 || c == '\u{7f}'
}

/// Sanitize every non-secret text value in a form
///
/// Secret fields and non-text values pass through unchanged.
pub fn sanitize_form(input: &FormInput) -> FormInput {
    input
        .iter()
        .map(|(key, value)| {
            let secret = key.parse::<Field>().map(|f| f.is_secret()).unwrap_or(false);
            let cleaned = match value {
                FieldValue::Text(text) if !secret => FieldValue::Text(sanitize_input(text)),
                other => other.clone(),
            };
            (key.clone(), cleaned)
        })
        .collect()
}
