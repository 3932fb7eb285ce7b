// File: src/rules.rs
// Purpose: Data-described field rules and the checks they run

use crate::error::FieldError;
use crate::field::Field;
use crate::password::PasswordPolicy;
use crate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static PERSON_NAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z '-]+$").expect("person name pattern compiles"));

pub(crate) static USERNAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern compiles"));

pub(crate) static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub(crate) static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-+()]{10,}$").expect("phone pattern compiles"));

/// Whether a missing value is an error or simply skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Length-bounded text restricted to a character set
#[derive(Debug, Clone)]
pub struct TextRule {
    /// Bounds apply to the trimmed value, counted in characters
    pub min_length: usize,
    pub max_length: usize,
    /// Matched against the untrimmed value
    pub charset: &'static Lazy<Regex>,
    pub charset_message: &'static str,
}

/// Email shape plus an overall length cap
#[derive(Debug, Clone)]
pub struct EmailRule {
    pub pattern: &'static Lazy<Regex>,
    pub max_length: usize,
}

/// Whole number within inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerRange {
    pub min: i64,
    pub max: i64,
}

/// Free-form text that must match a single pattern
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: &'static Lazy<Regex>,
    pub message: &'static str,
}

/// What a rule checks once a value is present
#[derive(Debug, Clone)]
pub enum Check {
    Text(TextRule),
    Email(EmailRule),
    Password(PasswordPolicy),
    /// Exact equality with another field's raw value
    Confirms(Field),
    Integer(IntegerRange),
    Pattern(PatternRule),
}

/// One field's complete rule
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: Field,
    pub presence: Presence,
    pub check: Check,
}

impl FieldRule {
    pub fn required(field: Field, check: Check) -> Self {
        Self {
            field,
            presence: Presence::Required,
            check,
        }
    }

    pub fn optional(field: Field, check: Check) -> Self {
        Self {
            field,
            presence: Presence::Optional,
            check,
        }
    }

    /// Run the rule against a field value
    ///
    /// `other` is the raw value of the field named by [`Check::Confirms`],
    /// ignored by every other check.
    pub fn evaluate(
        &self,
        value: Option<&FieldValue>,
        other: Option<&FieldValue>,
    ) -> Result<(), FieldError> {
        // Required fields treat whitespace as missing; optional ones only skip null
        let value = match (value, self.presence) {
            (Some(value), Presence::Required) if !value.is_blank() => value,
            (Some(value), Presence::Optional) if *value != FieldValue::Null => value,
            (_, Presence::Required) => return Err(FieldError::required(self.field)),
            (_, Presence::Optional) => return Ok(()),
        };

        match &self.check {
            Check::Text(rule) => check_text(self.field, rule, &text_of(value)),
            Check::Email(rule) => check_email(self.field, rule, &text_of(value)),
            Check::Password(policy) => policy.check(&text_of(value)),
            Check::Confirms(_) => {
                let expected = other.and_then(FieldValue::as_text).unwrap_or_default();
                if text_of(value) == expected.as_ref() {
                    Ok(())
                } else {
                    Err(FieldError::Mismatch)
                }
            }
            Check::Integer(range) => check_integer(self.field, range, value),
            Check::Pattern(rule) => {
                let text = text_of(value);
                if text.is_empty() || rule.pattern.is_match(&text) {
                    Ok(())
                } else {
                    Err(FieldError::invalid_format(rule.message))
                }
            }
        }
    }
}

fn text_of(value: &FieldValue) -> String {
    value
        .as_text()
        .map(|text| text.into_owned())
        .unwrap_or_default()
}

fn check_text(field: Field, rule: &TextRule, value: &str) -> Result<(), FieldError> {
    // Minimum counts the trimmed text, maximum the raw text
    let trimmed = value.trim().chars().count();
    let raw = value.chars().count();
    let actual = if trimmed < rule.min_length {
        Some(trimmed)
    } else if raw > rule.max_length {
        Some(raw)
    } else {
        None
    };

    if let Some(actual) = actual {
        return Err(FieldError::LengthOutOfRange {
            label: field.label(),
            min: rule.min_length,
            max: rule.max_length,
            actual,
        });
    }

    if !rule.charset.is_match(value) {
        return Err(FieldError::invalid_format(format!(
            "{} {}",
            field.label(),
            rule.charset_message
        )));
    }

    Ok(())
}

fn check_email(field: Field, rule: &EmailRule, value: &str) -> Result<(), FieldError> {
    if !rule.pattern.is_match(value) {
        return Err(FieldError::invalid_format("Please enter a valid email address"));
    }

    if value.chars().count() > rule.max_length {
        return Err(FieldError::TooLong {
            label: email_label(field),
            max: rule.max_length,
        });
    }

    Ok(())
}

fn email_label(field: Field) -> &'static str {
    match field {
        Field::Email => "Email address",
        other => other.label(),
    }
}

fn check_integer(field: Field, range: &IntegerRange, value: &FieldValue) -> Result<(), FieldError> {
    let number = value
        .as_integer()
        .ok_or_else(|| FieldError::invalid_format(format!("{} must be a valid number", field.label())))?;

    if number < range.min || number > range.max {
        return Err(FieldError::OutOfRange {
            min: range.min,
            max: range.max,
            actual: number,
        });
    }

    Ok(())
}
