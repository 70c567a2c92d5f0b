//! Per-field validation errors shared by the submission forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key under which errors not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Ordered map from field name to the messages raised for it.
///
/// # Examples
/// ```
/// use backend::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// assert!(errors.is_empty());
/// errors.add("slug", "already taken");
/// assert_eq!(errors.for_field("slug"), ["already taken".to_owned()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    /// Record a message that applies to the form as a whole.
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// Messages recorded for `field`, empty when the field is clean.
    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// `true` when `field` has at least one error.
    pub fn has(&self, field: &str) -> bool {
        !self.for_field(field).is_empty()
    }

    /// `true` when no error was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
