//! # signup-validation
//!
//! Registration form validation: names or a username, email, password with
//! confirmation, and optional age and phone.
//!
//! A [`RuleSet`] is an immutable list of data-described field rules. Running
//! it over a [`FormInput`] returns a fresh [`ValidationOutcome`] holding every
//! failing field's error, in evaluation order. Nothing is short-circuited.
//!
//! ```rust
//! use signup_validation::{validate_registration, Field, FormInput};
//!
//! let input = FormInput::new()
//!     .with("first_name", "John")
//!     .with("last_name", "Doe")
//!     .with("email", "john.doe@example.com")
//!     .with("password", "SecurePass123!")
//!     .with("confirm_password", "SecurePass123!");
//!
//! let outcome = validate_registration(&input);
//! assert!(outcome.is_valid());
//!
//! let outcome = validate_registration(&FormInput::new().with("email", "user@domain"));
//! assert!(!outcome.is_valid());
//! assert_eq!(
//!     outcome.error(Field::Email).map(ToString::to_string).as_deref(),
//!     Some("Please enter a valid email address"),
//! );
//! ```
//!
//! Callers sanitize non-secret text with [`sanitize_form`] before validating.

pub mod error;
pub mod field;
pub mod form;
pub mod outcome;
pub mod password;
pub mod pipeline;
pub mod rules;
pub mod ruleset;
pub mod sanitize;
pub mod value;

pub use error::{ErrorKind, FieldError, PasswordViolation, ProbeError};
pub use field::{Field, UnknownField};
pub use form::FormInput;
pub use outcome::{ErrorMap, ValidationOutcome};
pub use password::PasswordPolicy;
pub use pipeline::{FormContext, Registration, Submission};
pub use rules::{Check, FieldRule, Presence};
pub use ruleset::{Profile, ProfileError, RuleSet};
pub use sanitize::{sanitize_form, sanitize_input};
pub use value::FieldValue;

static NAMES_RULES: once_cell::sync::Lazy<RuleSet> = once_cell::sync::Lazy::new(RuleSet::names);

/// Validate a first name / last name registration form
pub fn validate_registration(input: &FormInput) -> ValidationOutcome {
    NAMES_RULES.validate(input)
}
