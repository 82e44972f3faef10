//! Form validation and submission driver
//!
//! [`FormValidator`] owns a [`FormState`] and a [`SubmitHandler`] and turns
//! the usual form events (change, programmatic set, reset, submit) into
//! [`FormAction`]s.
//!
//! ## Example
//!
//! ```
//! use folio_forms::{FormField, FormValidator, FormValues, SubmitError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut form = FormValidator::new(
//!     [
//!         ("name", FormField::new("").required()),
//!         ("email", FormField::new("").required()),
//!     ],
//!     |values: FormValues| async move {
//!         println!("sending {values:?}");
//!         Ok::<(), SubmitError>(())
//!     },
//! );
//!
//! form.handle_change("name", "Ada").unwrap();
//! form.handle_change("email", "ada@example.com").unwrap();
//!
//! assert!(form.is_valid());
//! assert!(form.handle_submit().await);
//! assert!(!form.is_submitting());
//! # }
//! ```

use crate::error::{FormError, FormResult, SubmitError};
use crate::field::FormField;
use crate::record::RecordValidator;
use crate::state::{FieldErrors, FormAction, FormState, FormStatus, FormValues};
use async_trait::async_trait;
use folio_conf::MessageSettings;
use futures::FutureExt;
use indexmap::IndexMap;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tokio_util::sync::CancellationToken;

/// Receives validated form values
///
/// Implemented for async closures taking [`FormValues`].
#[async_trait]
pub trait SubmitHandler: Send + Sync {
	async fn submit(&self, values: FormValues) -> Result<(), SubmitError>;
}

#[async_trait]
impl<F, Fut> SubmitHandler for F
where
	F: Fn(FormValues) -> Fut + Send + Sync,
	Fut: Future<Output = Result<(), SubmitError>> + Send + 'static,
{
	async fn submit(&self, values: FormValues) -> Result<(), SubmitError> {
		(self)(values).await
	}
}

/// Result of a submit attempt
#[derive(Debug)]
pub enum SubmitOutcome {
	/// The handler accepted the values
	Submitted,
	/// Validation failed; the handler was not called
	Invalid(FieldErrors),
	/// The handler returned an error or panicked
	Failed(SubmitError),
	/// The cancellation token fired before the handler finished
	Cancelled,
}

impl SubmitOutcome {
	pub fn is_submitted(&self) -> bool {
		matches!(self, Self::Submitted)
	}
}

/// Validation and submission state machine for one form
pub struct FormValidator<H> {
	state: FormState,
	handler: H,
	record_validator: Option<RecordValidator>,
	// Errors most recently injected by `record_validator`, keyed by field
	record_errors: FieldErrors,
}

impl<H: SubmitHandler> FormValidator<H> {
	/// Create a validator over a fixed set of fields
	pub fn new<I, K>(fields: I, handler: H) -> Self
	where
		I: IntoIterator<Item = (K, FormField)>,
		K: Into<String>,
	{
		Self::from_state(FormState::new(fields), handler)
	}

	/// Drive an existing state
	pub fn from_state(state: FormState, handler: H) -> Self {
		Self {
			state,
			handler,
			record_validator: None,
			record_errors: FieldErrors::new(),
		}
	}

	/// Use custom messages for the built-in checks
	pub fn with_messages(mut self, messages: MessageSettings) -> Self {
		self.state = self.state.with_messages(messages);
		self
	}

	/// Run `validator` on submit, after the per-field checks
	pub fn with_record_validator(mut self, validator: RecordValidator) -> Self {
		self.record_validator = Some(validator);
		self
	}

	pub fn state(&self) -> &FormState {
		&self.state
	}

	pub fn fields(&self) -> &IndexMap<String, FormField> {
		self.state.fields()
	}

	pub fn values(&self) -> FormValues {
		self.state.values()
	}

	pub fn errors(&self) -> FieldErrors {
		self.state.errors()
	}

	pub fn status(&self) -> FormStatus {
		self.state.status()
	}

	pub fn is_valid(&self) -> bool {
		self.state.is_valid()
	}

	pub fn is_submitting(&self) -> bool {
		self.state.is_submitting()
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}

	/// Record a user edit and recompute the field's error
	pub fn handle_change(&mut self, name: &str, value: impl Into<String>) -> FormResult<()> {
		self.ensure_field(name)?;
		self.state.apply(FormAction::Change {
			name: name.to_string(),
			value: value.into(),
		});
		Ok(())
	}

	/// Record a checkbox toggle as `"true"` / `"false"`
	pub fn handle_checkbox(&mut self, name: &str, checked: bool) -> FormResult<()> {
		self.handle_change(name, checked.to_string())
	}

	/// Set a value programmatically; the error is recomputed
	pub fn set_field_value(&mut self, name: &str, value: impl Into<String>) -> FormResult<()> {
		self.ensure_field(name)?;
		self.state.apply(FormAction::SetValue {
			name: name.to_string(),
			value: value.into(),
		});
		Ok(())
	}

	/// Attach an error directly, e.g. one reported by the server
	pub fn set_field_error(&mut self, name: &str, error: impl Into<String>) -> FormResult<()> {
		self.ensure_field(name)?;
		self.state.apply(FormAction::SetError {
			name: name.to_string(),
			error: Some(error.into()),
		});
		Ok(())
	}

	pub fn clear_field_error(&mut self, name: &str) -> FormResult<()> {
		self.ensure_field(name)?;
		self.state.apply(FormAction::SetError {
			name: name.to_string(),
			error: None,
		});
		Ok(())
	}

	/// Restore the fields supplied at construction
	pub fn reset_form(&mut self) {
		self.record_errors.clear();
		self.state.apply(FormAction::Reset);
	}

	/// Apply any action directly
	pub fn dispatch(&mut self, action: FormAction) {
		self.state.apply(action);
	}

	/// Validate and submit, reporting only success
	///
	/// Handler errors are logged and turned into `false`; they never reach
	/// the caller. Use [`submit`](Self::submit) to inspect them.
	pub async fn handle_submit(&mut self) -> bool {
		self.submit().await.is_submitted()
	}

	/// Validate and submit
	///
	/// Every field is re-validated first, so fields the user never touched
	/// are caught. Errors left by the previous record validation are cleared
	/// and the rules run again. The handler is only called when the form is
	/// valid and no record rule fails, including rules keyed to names that
	/// are not fields. A panicking handler is reported as
	/// [`SubmitOutcome::Failed`].
	pub async fn submit(&mut self) -> SubmitOutcome {
		self.run_submit(None).await
	}

	/// Like [`submit`](Self::submit), abandoning the handler once `token` fires
	pub async fn submit_cancellable(&mut self, token: &CancellationToken) -> SubmitOutcome {
		self.run_submit(Some(token)).await
	}

	async fn run_submit(&mut self, cancel: Option<&CancellationToken>) -> SubmitOutcome {
		self.clear_record_errors();
		self.state.apply(FormAction::ValidateAll);

		// Errors for rule keys that name no field; they still block submission.
		let mut orphaned = FieldErrors::new();
		if let Some(record_validator) = &self.record_validator {
			for (name, error) in record_validator.validate(&self.state.values()) {
				if !self.state.contains(&name) {
					tracing::warn!(field = %name, "Record rule failed for a field the form does not have");
					orphaned.insert(name, error);
					continue;
				}
				self.record_errors.insert(name.clone(), error.clone());
				self.state.apply(FormAction::SetError {
					name,
					error: Some(error),
				});
			}
		}

		if !self.state.is_valid() || !orphaned.is_empty() {
			self.state.apply(FormAction::SubmitRejected);
			let mut errors = self.state.errors();
			errors.extend(orphaned);
			tracing::debug!(errors = errors.len(), "Form submission blocked by validation");
			return SubmitOutcome::Invalid(errors);
		}

		let values = self.state.values();
		self.state.apply(FormAction::SubmitStarted);
		tracing::info!(fields = values.len(), "Submitting form");

		let handler = &self.handler;
		// Clears the submitting flag even if this future is dropped mid-flight.
		let mut state = scopeguard::guard(&mut self.state, |state| {
			if state.is_submitting() {
				tracing::warn!("Form submission dropped before completion");
				state.apply(FormAction::SubmitCancelled);
			}
		});

		let call = AssertUnwindSafe(async move { handler.submit(values).await })
			.catch_unwind()
			.map(|result| result.unwrap_or_else(|payload| Err(panic_error(payload))));

		let result = match cancel {
			Some(token) => tokio::select! {
				biased;
				_ = token.cancelled() => None,
				result = call => Some(result),
			},
			None => Some(call.await),
		};

		match result {
			Some(Ok(())) => {
				state.apply(FormAction::SubmitSucceeded);
				tracing::info!("Form submitted");
				SubmitOutcome::Submitted
			}
			Some(Err(error)) => {
				tracing::error!(error = %error, "Form submission error");
				state.apply(FormAction::SubmitFailed {
					message: error.to_string(),
				});
				SubmitOutcome::Failed(error)
			}
			None => {
				tracing::info!("Form submission cancelled");
				state.apply(FormAction::SubmitCancelled);
				SubmitOutcome::Cancelled
			}
		}
	}

	/// Drop errors left by the previous record validation that are still unchanged
	///
	/// An error the user has since replaced (by editing the field, or via
	/// `set_field_error`) is left alone.
	fn clear_record_errors(&mut self) {
		for (name, injected) in std::mem::take(&mut self.record_errors) {
			let unchanged = self
				.state
				.field(&name)
				.is_some_and(|field| field.error.as_deref() == Some(injected.as_str()));
			if unchanged {
				self.state.apply(FormAction::SetError { name, error: None });
			}
		}
	}

	fn ensure_field(&self, name: &str) -> FormResult<()> {
		if self.state.contains(name) {
			Ok(())
		} else {
			Err(FormError::UnknownField(name.to_string()))
		}
	}
}

/// Turn a handler panic into a submission failure
fn panic_error(payload: Box<dyn Any + Send>) -> SubmitError {
	let message = payload
		.downcast_ref::<&str>()
		.map(|s| s.to_string())
		.or_else(|| payload.downcast_ref::<String>().cloned())
		.unwrap_or_else(|| "unknown panic".to_string());
	SubmitError::Other(anyhow::anyhow!("Submit handler panicked: {message}"))
}

impl<H> std::fmt::Debug for FormValidator<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormValidator")
			.field("state", &self.state)
			.field("record_validator", &self.record_validator)
			.finish_non_exhaustive()
	}
}
