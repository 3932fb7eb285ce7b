// File: src/ruleset.rs
// Purpose: Ordered rule collections and the validation engine that runs them

use crate::error::{FieldError, ProbeError};
use crate::field::Field;
use crate::form::FormInput;
use crate::outcome::ValidationOutcome;
use crate::password::PasswordPolicy;
use crate::rules::{
    Check, EmailRule, FieldRule, IntegerRange, PatternRule, Presence, TextRule, EMAIL_PATTERN,
    PERSON_NAME_CHARSET, PHONE_PATTERN, USERNAME_CHARSET,
};
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Which built-in field set a rule set validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// first_name + last_name
    #[default]
    Names,
    /// username
    Username,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Names => "names",
            Profile::Username => "username",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown validation profile '{0}', expected 'names' or 'username'")]
pub struct ProfileError(pub String);

impl FromStr for Profile {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "names" => Ok(Profile::Names),
            "username" => Ok(Profile::Username),
            other => Err(ProfileError(other.to_string())),
        }
    }
}

/// An immutable, ordered set of field rules
///
/// Validation never mutates the rule set, so one instance can be shared by
/// any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Build from rules in evaluation order
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Names => Self::names(),
            Profile::Username => Self::username(),
        }
    }

    /// first_name, last_name, email, password, confirm_password, age?, phone?
    pub fn names() -> Self {
        let mut rules = vec![
            FieldRule::required(Field::FirstName, Check::Text(person_name())),
            FieldRule::required(Field::LastName, Check::Text(person_name())),
        ];
        rules.extend(shared_rules());
        Self::new(rules)
    }

    /// username, email, password, confirm_password, age?, phone?
    pub fn username() -> Self {
        let mut rules = vec![FieldRule::required(
            Field::Username,
            Check::Text(TextRule {
                min_length: 3,
                max_length: 20,
                charset: &USERNAME_CHARSET,
                charset_message: "can only contain letters, numbers, and underscores",
            }),
        )];
        rules.extend(shared_rules());
        Self::new(rules)
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.iter().map(|rule| rule.field)
    }

    /// Number of rules that fail on blank input
    pub fn required_count(&self) -> usize {
        self.rules
            .iter()
            .filter(|rule| rule.presence == Presence::Required)
            .count()
    }

    /// Validate a whole form
    ///
    /// Every rule runs; a failing field never hides errors on the fields
    /// after it.
    pub fn validate(&self, input: &FormInput) -> ValidationOutcome {
        let errors: BTreeMap<Field, FieldError> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let other = match rule.check {
                    Check::Confirms(target) => input.field(target),
                    _ => None,
                };
                rule.evaluate(input.field(rule.field), other)
                    .err()
                    .map(|error| (rule.field, error))
            })
            .collect();

        debug!(
            fields = self.rules.len(),
            errors = errors.len(),
            "validated registration input"
        );

        ValidationOutcome::from_errors(errors)
    }

    /// Validate one field in isolation
    ///
    /// Fields outside this rule set are unknown, and so are confirmation
    /// fields, which cannot be judged without the value they confirm.
    pub fn validate_field(&self, field: &str, value: &FieldValue) -> Result<Result<(), FieldError>, ProbeError> {
        let rule = field
            .parse::<Field>()
            .ok()
            .and_then(|field| self.rule(field))
            .filter(|rule| !matches!(rule.check, Check::Confirms(_)))
            .ok_or_else(|| ProbeError::UnknownField(field.to_string()))?;

        Ok(rule.evaluate(Some(value), None))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::names()
    }
}

fn person_name() -> TextRule {
    TextRule {
        min_length: 2,
        max_length: 50,
        charset: &PERSON_NAME_CHARSET,
        charset_message: "can only contain letters, spaces, hyphens, and apostrophes",
    }
}

fn shared_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::required(
            Field::Email,
            Check::Email(EmailRule {
                pattern: &EMAIL_PATTERN,
                max_length: 254,
            }),
        ),
        FieldRule::required(Field::Password, Check::Password(PasswordPolicy::strong())),
        FieldRule::required(Field::ConfirmPassword, Check::Confirms(Field::Password)),
        FieldRule::optional(Field::Age, Check::Integer(IntegerRange { min: 13, max: 150 })),
        FieldRule::optional(
            Field::Phone,
            Check::Pattern(PatternRule {
                pattern: &PHONE_PATTERN,
                message: "Invalid phone number format",
            }),
        ),
    ]
}
