/// Errors raised by form operations
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	/// The form's field set is fixed at construction
	#[error("Unknown field: {0}")]
	UnknownField(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Errors returned by a submit handler
///
/// These never escape [`FormValidator::handle_submit`](crate::FormValidator::handle_submit);
/// they are logged and reported as a failed submission.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
	/// The receiving side refused the submission
	#[error("{0}")]
	Rejected(String),
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl SubmitError {
	pub fn rejected(message: impl Into<String>) -> Self {
		Self::Rejected(message.into())
	}
}
