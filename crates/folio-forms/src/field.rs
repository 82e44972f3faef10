//! Form fields
//!
//! A [`FormField`] bundles one input's current value, its error, whether it is
//! required, and an optional custom validator.

use std::fmt;
use std::sync::Arc;

/// Custom per-field check
///
/// Returns `Some(message)` when the value is rejected.
#[derive(Clone)]
pub struct FieldValidator(Arc<dyn Fn(&str) -> Option<String> + Send + Sync>);

impl FieldValidator {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	/// Run the check against `value`
	pub fn check(&self, value: &str) -> Option<String> {
		(self.0)(value)
	}

	fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for FieldValidator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("FieldValidator(..)")
	}
}

/// How a field's value is interpreted by the built-in checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	Text,
	/// Non-empty values must look like `local@domain.tld`
	Email,
}

impl FieldKind {
	/// Kind implied by a field name.
	///
	/// Any name containing `email` (case-insensitive) is an email field, so
	/// `emailOptIn` counts as one too. Use [`FormField::with_kind`] to opt out.
	///
	/// # Examples
	///
	/// ```
	/// use folio_forms::FieldKind;
	///
	/// assert_eq!(FieldKind::infer("workEmail"), FieldKind::Email);
	/// assert_eq!(FieldKind::infer("name"), FieldKind::Text);
	/// ```
	pub fn infer(name: &str) -> Self {
		if name.to_lowercase().contains("email") {
			Self::Email
		} else {
			Self::Text
		}
	}
}

/// A single input's state
#[derive(Debug, Clone, Default)]
pub struct FormField {
	pub value: String,
	pub error: Option<String>,
	pub required: bool,
	validate: Option<FieldValidator>,
	kind: Option<FieldKind>,
}

impl FormField {
	/// Create an optional field with an initial value
	///
	/// # Examples
	///
	/// ```
	/// use folio_forms::FormField;
	///
	/// let field = FormField::new("Ada").required();
	/// assert_eq!(field.value, "Ada");
	/// assert!(field.required);
	/// assert!(field.error.is_none());
	/// ```
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			..Self::default()
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Attach a custom validator, run after the built-in checks
	///
	/// # Examples
	///
	/// ```
	/// use folio_forms::FormField;
	///
	/// let field = FormField::new("").with_validator(|value| {
	///     (value.len() > 500).then(|| "Keep it under 500 characters".to_string())
	/// });
	/// assert!(field.validator().is_some());
	/// ```
	pub fn with_validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		self.validate = Some(FieldValidator::new(f));
		self
	}

	/// Attach a prebuilt validator such as [`validators::phone`](crate::validators::phone)
	pub fn with_field_validator(mut self, validator: FieldValidator) -> Self {
		self.validate = Some(validator);
		self
	}

	/// Declare the field kind instead of inferring it from the name
	pub fn with_kind(mut self, kind: FieldKind) -> Self {
		self.kind = Some(kind);
		self
	}

	/// Start with an error already attached
	pub fn with_error(mut self, error: impl Into<String>) -> Self {
		self.error = Some(error.into());
		self
	}

	pub fn validator(&self) -> Option<&FieldValidator> {
		self.validate.as_ref()
	}

	/// Declared kind, falling back to [`FieldKind::infer`] on `name`
	pub fn kind_for(&self, name: &str) -> FieldKind {
		self.kind.unwrap_or_else(|| FieldKind::infer(name))
	}

	/// Empty or whitespace-only value
	pub fn is_blank(&self) -> bool {
		self.value.trim().is_empty()
	}

	/// Carries a non-empty error
	pub fn has_error(&self) -> bool {
		self.error.as_deref().is_some_and(|e| !e.is_empty())
	}
}

impl PartialEq for FormField {
	fn eq(&self, other: &Self) -> bool {
		let same_validator = match (&self.validate, &other.validate) {
			(Some(a), Some(b)) => a.ptr_eq(b),
			(None, None) => true,
			_ => false,
		};
		self.value == other.value
			&& self.error == other.error
			&& self.required == other.required
			&& self.kind == other.kind
			&& same_validator
	}
}
