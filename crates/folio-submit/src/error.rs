use folio_forms::SubmitError;

/// Errors raised while talking to a form endpoint
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The endpoint answered with a non-2xx status
	///
	/// `message` is the server's `message` field when it supplied one.
	#[error("{message}")]
	Status { status: u16, message: String },

	/// JSON encoding of the request or decoding of the response failed
	#[error("JSON error: {0}")]
	Serialize(#[from] serde_json::Error),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("No form endpoint configured")]
	MissingEndpoint,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for SubmitError {
	fn from(error: ClientError) -> Self {
		match error {
			ClientError::Status { message, .. } => SubmitError::Rejected(message),
			other => SubmitError::Other(other.into()),
		}
	}
}
