// File: src/form.rs
// Purpose: Raw form input keyed by field name

use crate::field::Field;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Submitted form fields, untrusted and unvalidated
///
/// A missing key and an explicit `null` both mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput {
    fields: BTreeMap<String, FieldValue>,
}

impl FormInput {
    /// Create empty form input
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a JSON object
    ///
    /// Returns `None` when the JSON is not an object.
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        let map = json.as_object()?;
        let fields = map
            .iter()
            .map(|(key, value)| (key.clone(), FieldValue::from(value)))
            .collect();
        Some(Self { fields })
    }

    /// Set a field by name, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder form of [`FormInput::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a raw value by name
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get a raw value for a known field
    pub fn field(&self, field: Field) -> Option<&FieldValue> {
        self.get(field.as_str())
    }

    /// Get a field's value as text, treating `null` as absent
    pub fn text(&self, field: Field) -> Option<String> {
        self.field(field)
            .and_then(|value| value.as_text())
            .map(|text| text.into_owned())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { fields }
    }
}
