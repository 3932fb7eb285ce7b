// File: src/outcome.rs
// Purpose: Result of one validation run

use crate::error::FieldError;
use crate::field::Field;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Verdict plus field-keyed errors from one validation call
///
/// Validity is derived from the error map, so the two can never disagree.
/// Errors iterate in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationOutcome {
    /// Create a successful outcome
    pub fn success() -> Self {
        Self::default()
    }

    /// Create an outcome from collected errors
    pub fn from_errors(errors: BTreeMap<Field, FieldError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the error for a specific field
    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &BTreeMap<Field, FieldError> {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Field name to user-facing message, in evaluation order
    pub fn messages(&self) -> Vec<(&'static str, String)> {
        self.errors
            .iter()
            .map(|(field, error)| (field.as_str(), error.to_string()))
            .collect()
    }

    /// The `(is_valid, errors)` pair callers of the plain contract expect
    pub fn into_parts(self) -> (bool, BTreeMap<Field, FieldError>) {
        (self.errors.is_empty(), self.errors)
    }

    /// Serializable view of the error map alone
    pub fn error_map(&self) -> ErrorMap<'_> {
        ErrorMap(&self.errors)
    }
}

/// Serializes as `{ "field_name": "message", ... }` in evaluation order
#[derive(Debug, Clone, Copy)]
pub struct ErrorMap<'a>(&'a BTreeMap<Field, FieldError>);

impl Serialize for ErrorMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, error) in self.0 {
            map.serialize_entry(field.as_str(), &error.to_string())?;
        }
        map.end()
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationOutcome", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.error_map())?;
        state.end()
    }
}
