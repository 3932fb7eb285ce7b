// File: src/error.rs
// Purpose: Field-level validation errors and probe errors

use crate::field::Field;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Category of a field error, stable for clients that branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    InvalidFormat,
    LengthOutOfRange,
    TooLong,
    PolicyViolation,
    Mismatch,
    OutOfRange,
}

/// A single user-correctable problem with one field
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: &'static str },

    #[error("{message}")]
    InvalidFormat { message: String },

    #[error("{}", length_message(.label, .min, .max, .actual))]
    LengthOutOfRange {
        label: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("{label} is too long")]
    TooLong { label: &'static str, max: usize },

    #[error("{}", PolicyList(.0))]
    PolicyViolation(Vec<PasswordViolation>),

    #[error("Passwords do not match")]
    Mismatch,

    #[error("{}", range_message(.min, .actual))]
    OutOfRange { min: i64, max: i64, actual: i64 },
}

impl FieldError {
    pub fn required(field: Field) -> Self {
        FieldError::Required {
            label: field.label(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        FieldError::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::Required { .. } => ErrorKind::Required,
            FieldError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            FieldError::LengthOutOfRange { .. } => ErrorKind::LengthOutOfRange,
            FieldError::TooLong { .. } => ErrorKind::TooLong,
            FieldError::PolicyViolation(_) => ErrorKind::PolicyViolation,
            FieldError::Mismatch => ErrorKind::Mismatch,
            FieldError::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }

    /// Password rules that failed, empty for every other kind of error
    pub fn violations(&self) -> &[PasswordViolation] {
        match self {
            FieldError::PolicyViolation(violations) => violations,
            _ => &[],
        }
    }
}

fn length_message(label: &str, min: &usize, max: &usize, actual: &usize) -> String {
    if actual < min {
        format!("{} must be at least {} characters", label, min)
    } else {
        format!("{} is too long (max {} characters)", label, max)
    }
}

fn range_message(min: &i64, actual: &i64) -> String {
    if actual < min {
        format!("You must be at least {} years old to register", min)
    } else {
        "Please enter a valid age".to_string()
    }
}

/// One failed password composition rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordViolation {
    TooShort { min: usize },
    TooLong { max: usize },
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecial,
}

impl fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordViolation::TooShort { min } => {
                write!(f, "Password must be at least {} characters long", min)
            }
            PasswordViolation::TooLong { max } => {
                write!(f, "Password is too long (max {} characters)", max)
            }
            PasswordViolation::MissingUppercase => {
                f.write_str("Password must contain at least one uppercase letter")
            }
            PasswordViolation::MissingLowercase => {
                f.write_str("Password must contain at least one lowercase letter")
            }
            PasswordViolation::MissingDigit => f.write_str("Password must contain at least one number"),
            PasswordViolation::MissingSpecial => {
                f.write_str("Password must contain at least one special character")
            }
        }
    }
}

struct PolicyList<'a>(&'a [PasswordViolation]);

impl fmt::Display for PolicyList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Errors from probing a single field outside a full validation run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("Unknown field")]
    UnknownField(String),

    #[error("Missing field or value")]
    MissingValue,
}
