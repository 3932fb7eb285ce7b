//! Password policy
//!
//! Every rule is evaluated, so a rejected password reports all of its
//! problems at once instead of only the first.

use crate::error::{FieldError, PasswordViolation};

/// Password composition and length policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl PasswordPolicy {
    /// 8-128 characters with uppercase, lowercase, digit, and special character
    pub const fn strong() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }

    /// All rules the password breaks, in a fixed order
    pub fn violations(&self, password: &str) -> Vec<PasswordViolation> {
        let length = password.chars().count();

        let checks = [
            (
                length >= self.min_length,
                PasswordViolation::TooShort {
                    min: self.min_length,
                },
            ),
            (
                length <= self.max_length,
                PasswordViolation::TooLong {
                    max: self.max_length,
                },
            ),
            (
                !self.require_uppercase || password.chars().any(char::is_uppercase),
                PasswordViolation::MissingUppercase,
            ),
            (
                !self.require_lowercase || password.chars().any(char::is_lowercase),
                PasswordViolation::MissingLowercase,
            ),
            (
                !self.require_digit || password.chars().any(|c| c.is_ascii_digit()),
                PasswordViolation::MissingDigit,
            ),
            (
                !self.require_special || password.chars().any(is_special),
                PasswordViolation::MissingSpecial,
            ),
        ];

        checks
            .into_iter()
            .filter(|(valid, _)| !valid)
            .map(|(_, violation)| violation)
            .collect()
    }

    pub fn check(&self, password: &str) -> Result<(), FieldError> {
        let violations = self.violations(password);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(FieldError::PolicyViolation(violations))
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::strong()
    }
}

/// Special characters are the ASCII punctuation set: !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
pub fn is_special(c: char) -> bool {
    c.is_ascii_punctuation()
}
