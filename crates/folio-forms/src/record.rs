//! Record-level validation
//!
//! Where a [`FieldValidator`](crate::FieldValidator) only sees its own value,
//! a [`RecordValidator`] rule sees the whole record, which is what cross-field
//! checks such as "passwords match" need.

use crate::state::{FieldErrors, FormValues};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

type RecordRule = Arc<dyn Fn(&str, &FormValues) -> Option<String> + Send + Sync>;

/// Rules keyed by field name, evaluated over a whole [`FormValues`] record
#[derive(Clone, Default)]
pub struct RecordValidator {
	rules: IndexMap<String, RecordRule>,
}

impl RecordValidator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add (or replace) the rule for `field`
	///
	/// # Examples
	///
	/// ```
	/// use folio_forms::{FormValues, RecordValidator};
	///
	/// let validator = RecordValidator::new().rule("confirm", |value, values| {
	///     (Some(value) != values.get("password").map(String::as_str))
	///         .then(|| "Passwords do not match".to_string())
	/// });
	///
	/// let mut values = FormValues::new();
	/// values.insert("password".into(), "hunter2".into());
	/// values.insert("confirm".into(), "hunter3".into());
	///
	/// let errors = validator.validate(&values);
	/// assert_eq!(errors.get("confirm").map(String::as_str), Some("Passwords do not match"));
	/// ```
	pub fn rule<F>(mut self, field: impl Into<String>, f: F) -> Self
	where
		F: Fn(&str, &FormValues) -> Option<String> + Send + Sync + 'static,
	{
		self.rules.insert(field.into(), Arc::new(f));
		self
	}

	/// Run every rule; only failing fields appear in the result
	///
	/// A rule whose field is missing from `values` sees an empty string.
	pub fn validate(&self, values: &FormValues) -> FieldErrors {
		self.rules
			.iter()
			.filter_map(|(field, rule)| {
				let value = values.get(field).map(String::as_str).unwrap_or_default();
				let error = rule(value, values).filter(|e| !e.is_empty())?;
				Some((field.clone(), error))
			})
			.collect()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}

impl fmt::Debug for RecordValidator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RecordValidator")
			.field("fields", &self.rules.keys().collect::<Vec<_>>())
			.finish()
	}
}
