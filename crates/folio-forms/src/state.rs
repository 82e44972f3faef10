//! Form state and its reducer
//!
//! [`FormState`] is a plain value: every transition goes through
//! [`FormState::apply`] (or the free-standing [`reduce`]) with a [`FormAction`],
//! so any UI layer, or none at all, can drive it.
//!
//! ```text
//!            ValidateAll
//!   Idle ───────────────▶ (errors?) ──yes──▶ Invalid
//!                              │
//!                              no
//!                              ▼
//!                         Submitting ──▶ Succeeded | Failed | Cancelled
//! ```

use crate::field::{FieldKind, FormField};
use crate::validators::validate_email;
use folio_conf::MessageSettings;
use indexmap::IndexMap;
use std::sync::Arc;

/// Flat field name → value record handed to submit handlers
pub type FormValues = IndexMap<String, String>;

/// Field name → error message for every field currently in error
pub type FieldErrors = IndexMap<String, String>;

/// Where the form is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
	#[default]
	Idle,
	/// Last submit attempt stopped at validation
	Invalid,
	Submitting,
	Succeeded,
	Failed,
	Cancelled,
}

/// Transitions understood by [`FormState::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
	/// User edit; recomputes the field's error
	Change { name: String, value: String },
	/// Programmatic edit; recomputes the field's error
	SetValue { name: String, value: String },
	/// Direct error assignment without recomputation
	SetError { name: String, error: Option<String> },
	/// Restore the fields supplied at construction
	Reset,
	/// Recompute every field's error ahead of submission
	ValidateAll,
	SubmitRejected,
	SubmitStarted,
	SubmitSucceeded,
	SubmitFailed { message: String },
	SubmitCancelled,
}

/// Complete state of one form instance
#[derive(Debug, Clone)]
pub struct FormState {
	fields: IndexMap<String, FormField>,
	initial: Arc<IndexMap<String, FormField>>,
	status: FormStatus,
	submit_error: Option<String>,
	messages: Arc<MessageSettings>,
}

impl FormState {
	/// Create a state from its initial fields
	///
	/// The field set is fixed from here on.
	///
	/// # Examples
	///
	/// ```
	/// use folio_forms::{FormField, FormState};
	///
	/// let state = FormState::new([
	///     ("name", FormField::new("").required()),
	///     ("email", FormField::new("").required()),
	/// ]);
	/// assert_eq!(state.fields().len(), 2);
	/// assert!(!state.is_valid());
	/// ```
	pub fn new<I, K>(fields: I) -> Self
	where
		I: IntoIterator<Item = (K, FormField)>,
		K: Into<String>,
	{
		let fields: IndexMap<String, FormField> = fields
			.into_iter()
			.map(|(name, field)| (name.into(), field))
			.collect();

		Self {
			initial: Arc::new(fields.clone()),
			fields,
			status: FormStatus::Idle,
			submit_error: None,
			messages: Arc::new(MessageSettings::default()),
		}
	}

	/// Use custom messages for the built-in checks
	pub fn with_messages(mut self, messages: MessageSettings) -> Self {
		self.messages = Arc::new(messages);
		self
	}

	pub fn fields(&self) -> &IndexMap<String, FormField> {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FormField> {
		self.fields.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Fields as supplied at construction
	pub fn initial(&self) -> &IndexMap<String, FormField> {
		&self.initial
	}

	pub fn status(&self) -> FormStatus {
		self.status
	}

	pub fn is_submitting(&self) -> bool {
		self.status == FormStatus::Submitting
	}

	/// Message of the last failed submission, cleared when a new one starts
	pub fn submit_error(&self) -> Option<&str> {
		self.submit_error.as_deref()
	}

	pub fn messages(&self) -> &MessageSettings {
		&self.messages
	}

	/// No field carries an error and no required field is blank
	pub fn is_valid(&self) -> bool {
		!self
			.fields
			.values()
			.any(|field| field.has_error() || (field.required && field.is_blank()))
	}

	/// Current values keyed by field name
	pub fn values(&self) -> FormValues {
		self.fields
			.iter()
			.map(|(name, field)| (name.clone(), field.value.clone()))
			.collect()
	}

	/// Current non-empty errors keyed by field name
	pub fn errors(&self) -> FieldErrors {
		self.fields
			.iter()
			.filter(|(_, field)| field.has_error())
			.filter_map(|(name, field)| Some((name.clone(), field.error.clone()?)))
			.collect()
	}

	/// Error `value` would produce for the field `name`
	///
	/// Checks run in order and the first failure wins:
	///
	/// 1. required but blank
	/// 2. email field with a non-empty value that is not an address
	/// 3. the field's custom validator
	///
	/// Unknown fields never produce an error.
	pub fn validate_field(&self, name: &str, value: &str) -> Option<String> {
		let field = self.fields.get(name)?;

		if field.required && value.trim().is_empty() {
			return Some(self.messages.required.clone());
		}

		if field.kind_for(name) == FieldKind::Email && !value.is_empty() && !validate_email(value) {
			return Some(self.messages.invalid_email.clone());
		}

		field
			.validator()
			.and_then(|validator| validator.check(value))
			.filter(|error| !error.is_empty())
	}

	/// Apply one transition in place
	pub fn apply(&mut self, action: FormAction) {
		match action {
			FormAction::Change { name, value } => {
				tracing::debug!(field = %name, "Field changed");
				self.set_value(name, value);
			}
			FormAction::SetValue { name, value } => self.set_value(name, value),
			FormAction::SetError { name, error } => match self.fields.get_mut(&name) {
				Some(field) => field.error = error.filter(|e| !e.is_empty()),
				None => tracing::warn!(field = %name, "Ignoring error for unknown field"),
			},
			FormAction::Reset => {
				self.fields = (*self.initial).clone();
				self.status = FormStatus::Idle;
				self.submit_error = None;
			}
			FormAction::ValidateAll => {
				let errors: Vec<(String, String)> = self
					.fields
					.iter()
					.filter_map(|(name, field)| {
						let error = self.validate_field(name, &field.value)?;
						Some((name.clone(), error))
					})
					.collect();
				// Fields that pass keep whatever error they already had.
				for (name, error) in errors {
					if let Some(field) = self.fields.get_mut(&name) {
						field.error = Some(error);
					}
				}
			}
			FormAction::SubmitRejected => self.status = FormStatus::Invalid,
			FormAction::SubmitStarted => {
				self.status = FormStatus::Submitting;
				self.submit_error = None;
			}
			FormAction::SubmitSucceeded => self.status = FormStatus::Succeeded,
			FormAction::SubmitFailed { message } => {
				self.status = FormStatus::Failed;
				self.submit_error = Some(message);
			}
			FormAction::SubmitCancelled => self.status = FormStatus::Cancelled,
		}
	}

	fn set_value(&mut self, name: String, value: String) {
		if !self.fields.contains_key(&name) {
			tracing::warn!(field = %name, "Ignoring value for unknown field");
			return;
		}
		let error = self.validate_field(&name, &value);
		if let Some(field) = self.fields.get_mut(&name) {
			field.value = value;
			field.error = error;
		}
	}
}

/// Pure reducer over [`FormState`]
///
/// # Examples
///
/// ```
/// use folio_forms::{FormAction, FormField, FormState, reduce};
///
/// let state = FormState::new([("email", FormField::new(""))]);
/// let state = reduce(
///     state,
///     FormAction::Change { name: "email".into(), value: "nope".into() },
/// );
/// assert_eq!(
///     state.field("email").unwrap().error.as_deref(),
///     Some("Please enter a valid email address"),
/// );
/// ```
pub fn reduce(mut state: FormState, action: FormAction) -> FormState {
	state.apply(action);
	state
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn contact_state() -> FormState {
		FormState::new([
			("name", FormField::new("").required()),
			("email", FormField::new("").required()),
			("message", FormField::new("").required()),
		])
	}

	fn change(name: &str, value: &str) -> FormAction {
		FormAction::Change {
			name: name.to_string(),
			value: value.to_string(),
		}
	}

	#[rstest]
	fn test_required_error_wins_over_email(contact_state: FormState) {
		// Act
		let state = reduce(contact_state, change("email", "   "));

		// Assert
		assert_eq!(
			state.field("email").unwrap().error.as_deref(),
			Some("This field is required")
		);
	}

	#[rstest]
	fn test_email_error_wins_over_custom() {
		// Arrange
		let state = FormState::new([(
			"email",
			FormField::new("").with_validator(|_| Some("custom".to_string())),
		)]);

		// Act
		let invalid = reduce(state.clone(), change("email", "bad"));
		let valid = reduce(state, change("email", "a@b.co"));

		// Assert
		assert_eq!(
			invalid.field("email").unwrap().error.as_deref(),
			Some("Please enter a valid email address")
		);
		assert_eq!(valid.field("email").unwrap().error.as_deref(), Some("custom"));
	}

	#[rstest]
	fn test_optional_email_accepts_empty() {
		// Arrange
		let state = FormState::new([("email", FormField::new("x"))]);

		// Act
		let state = reduce(state, change("email", ""));

		// Assert
		assert!(state.field("email").unwrap().error.is_none());
		assert!(state.is_valid());
	}

	#[rstest]
	fn test_unknown_field_leaves_state_untouched(contact_state: FormState) {
		// Act
		let state = reduce(contact_state.clone(), change("phone", "555"));

		// Assert
		assert_eq!(state.fields(), contact_state.fields());
		assert!(!state.contains("phone"));
	}

	#[rstest]
	fn test_set_error_assigns_without_recomputing(contact_state: FormState) {
		// Arrange
		let state = reduce(contact_state, change("name", "Ada"));

		// Act
		let state = reduce(
			state,
			FormAction::SetError {
				name: "name".to_string(),
				error: Some("Name already taken".to_string()),
			},
		);

		// Assert
		assert_eq!(state.field("name").unwrap().value, "Ada");
		assert_eq!(
			state.errors().get("name").map(String::as_str),
			Some("Name already taken")
		);
	}

	#[rstest]
	fn test_set_empty_error_clears(contact_state: FormState) {
		// Arrange
		let state = reduce(contact_state, change("name", ""));
		assert!(state.field("name").unwrap().has_error());

		// Act
		let state = reduce(
			state,
			FormAction::SetError {
				name: "name".to_string(),
				error: Some(String::new()),
			},
		);

		// Assert
		assert!(state.field("name").unwrap().error.is_none());
	}

	#[rstest]
	fn test_validate_all_flags_untouched_fields(contact_state: FormState) {
		// Act
		let state = reduce(contact_state, FormAction::ValidateAll);

		// Assert
		let errors = state.errors();
		assert_eq!(errors.len(), 3);
		assert!(errors.values().all(|e| e == "This field is required"));
	}

	#[rstest]
	fn test_validate_all_keeps_injected_errors(contact_state: FormState) {
		// Arrange
		let mut state = contact_state;
		for (name, value) in [("name", "Ada"), ("email", "ada@example.com"), ("message", "Hi")] {
			state.apply(change(name, value));
		}
		state.apply(FormAction::SetError {
			name: "email".to_string(),
			error: Some("Already subscribed".to_string()),
		});

		// Act
		state.apply(FormAction::ValidateAll);

		// Assert
		assert_eq!(
			state.field("email").unwrap().error.as_deref(),
			Some("Already subscribed")
		);
		assert!(!state.is_valid());
	}

	#[rstest]
	fn test_is_valid_requires_non_blank_required_fields() {
		// Arrange: no error recorded yet, but the required field is blank
		let state = FormState::new([("name", FormField::new(" ").required())]);

		// Act + Assert
		assert!(state.errors().is_empty());
		assert!(!state.is_valid());
	}

	#[rstest]
	fn test_reset_restores_initial_fields(contact_state: FormState) {
		// Arrange
		let initial = contact_state.fields().clone();
		let mut state = contact_state;
		state.apply(change("name", "Ada"));
		state.apply(FormAction::SubmitFailed {
			message: "boom".to_string(),
		});

		// Act
		state.apply(FormAction::Reset);
		let once = state.fields().clone();
		state.apply(FormAction::Reset);

		// Assert
		assert_eq!(once, initial);
		assert_eq!(state.fields(), &initial);
		assert_eq!(state.status(), FormStatus::Idle);
		assert!(state.submit_error().is_none());
	}

	#[rstest]
	#[case(FormAction::SubmitRejected, FormStatus::Invalid)]
	#[case(FormAction::SubmitStarted, FormStatus::Submitting)]
	#[case(FormAction::SubmitSucceeded, FormStatus::Succeeded)]
	#[case(FormAction::SubmitFailed { message: "x".to_string() }, FormStatus::Failed)]
	#[case(FormAction::SubmitCancelled, FormStatus::Cancelled)]
	fn test_status_transitions(
		contact_state: FormState,
		#[case] action: FormAction,
		#[case] expected: FormStatus,
	) {
		let state = reduce(contact_state, action);

		assert_eq!(state.status(), expected);
	}

	#[rstest]
	fn test_custom_messages_are_used() {
		// Arrange
		let messages = MessageSettings {
			required: "Required!".to_string(),
			..MessageSettings::default()
		};
		let state = FormState::new([("name", FormField::new("x").required())]).with_messages(messages);

		// Act
		let state = reduce(state, change("name", ""));

		// Assert
		assert_eq!(state.field("name").unwrap().error.as_deref(), Some("Required!"));
	}

	#[rstest]
	fn test_values_keep_field_order(contact_state: FormState) {
		let keys: Vec<String> = contact_state.values().into_keys().collect();

		assert_eq!(keys, vec!["name", "email", "message"]);
	}
}
