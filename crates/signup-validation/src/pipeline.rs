// File: src/pipeline.rs
// Purpose: Turn a validated form into a typed registration, or keep the errors and safe values for re-display

use crate::field::Field;
use crate::form::FormInput;
use crate::outcome::ValidationOutcome;
use crate::ruleset::RuleSet;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Result of submitting a form through a rule set
#[derive(Debug)]
pub enum Submission {
    /// Validation passed, data is ready for processing
    Accepted(Registration),
    /// Validation failed, contains errors and the non-secret submitted values
    Rejected(FormContext),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }

    /// Extract the registration if validation passed
    pub fn accepted(self) -> Option<Registration> {
        match self {
            Submission::Accepted(registration) => Some(registration),
            Submission::Rejected(_) => None,
        }
    }

    /// Extract the form context if validation failed
    pub fn rejected(self) -> Option<FormContext> {
        match self {
            Submission::Accepted(_) => None,
            Submission::Rejected(context) => Some(context),
        }
    }
}

/// A registration whose every field passed validation
///
/// `Debug` and `Serialize` leave the password out.
#[derive(Clone, Serialize)]
pub struct Registration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    #[serde(skip)]
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Registration {
    /// The accepted password, for the caller to hash
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("age", &self.age)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Errors plus the submitted non-secret values, for showing a form again
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormContext {
    pub outcome: ValidationOutcome,
    /// Submitted text of non-secret fields, keyed by field name
    pub values: BTreeMap<&'static str, String>,
}

impl FormContext {
    pub fn has_error(&self, field: Field) -> bool {
        self.outcome.error(field).is_some()
    }

    /// Get the error message for a field
    pub fn error_message(&self, field: Field) -> Option<String> {
        self.outcome.error(field).map(ToString::to_string)
    }

    /// Get the submitted value for a field
    pub fn value(&self, field: Field) -> Option<&str> {
        self.values.get(field.as_str()).map(String::as_str)
    }
}

impl RuleSet {
    /// Validate and convert the input into a [`Registration`]
    pub fn submit(&self, input: &FormInput) -> Submission {
        let outcome = self.validate(input);

        if outcome.has_errors() {
            return Submission::Rejected(FormContext {
                outcome,
                values: public_values(self, input),
            });
        }

        let text = |field: Field| {
            self.rule(field)
                .and_then(|_| input.text(field))
                .filter(|value| !value.trim().is_empty())
        };

        Submission::Accepted(Registration {
            first_name: text(Field::FirstName),
            last_name: text(Field::LastName),
            username: text(Field::Username),
            email: text(Field::Email).unwrap_or_default(),
            password: input.text(Field::Password).unwrap_or_default(),
            age: self
                .rule(Field::Age)
                .and_then(|_| input.field(Field::Age))
                .and_then(|value| value.as_integer()),
            phone: text(Field::Phone),
        })
    }
}

/// Non-secret fields of the rule set that were submitted with a value
pub fn public_values(rules: &RuleSet, input: &FormInput) -> BTreeMap<&'static str, String> {
    rules
        .fields()
        .filter(|field| !field.is_secret())
        .filter_map(|field| input.text(field).map(|value| (field.as_str(), value)))
        .collect()
}
