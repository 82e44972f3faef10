//! # Folio
//!
//! Form state, validation and submission for Rust applications.
//!
//! Folio keeps a form as a plain value: a fixed set of named fields, each with
//! a value, an optional error, a required flag and an optional custom check.
//! Every edit goes through a reducer, and a small async state machine drives
//! submission to a caller-supplied handler or an HTTP endpoint.
//!
//! ## Feature Flags
//!
//! - `full` (default) - Everything below
//! - `forms` - Fields, reducer, validators and [`FormValidator`]
//! - `submit` - HTTP client, multipart payloads and [`EndpointSubmitter`]
//!
//! Settings ([`conf`]) and [`logging`] are always available.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use folio::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! folio::logging::init();
//!
//! let settings = FolioSettings::load(None)?;
//! let submitter = EndpointSubmitter::from_settings(&settings.client)?;
//!
//! let mut form = FormValidator::new(
//!     [
//!         ("name", FormField::new("").required()),
//!         ("email", FormField::new("").required()),
//!         ("message", FormField::new("").required()),
//!     ],
//!     submitter,
//! )
//! .with_messages(settings.messages.clone());
//!
//! form.handle_change("name", "Ada")?;
//! form.handle_change("email", "ada@example.com")?;
//! form.handle_change("message", "Hello!")?;
//!
//! match form.submit().await {
//!     SubmitOutcome::Submitted => println!("sent"),
//!     SubmitOutcome::Invalid(errors) => println!("fix {errors:?}"),
//!     SubmitOutcome::Failed(error) => println!("server said: {error}"),
//!     SubmitOutcome::Cancelled => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;
pub mod logging;
#[cfg(feature = "submit")]
pub mod submit;

pub use folio_conf::{Env, FolioSettings, SettingsError};

#[cfg(feature = "forms")]
pub use folio_forms::{
	FieldKind, FormError, FormField, FormState, FormValidator, FormValues, SubmitError,
	SubmitHandler, SubmitOutcome,
};

#[cfg(feature = "submit")]
pub use folio_submit::{ClientError, EndpointSubmitter, FormClient, FormData, UploadFile};

/// Common imports
pub mod prelude {
	pub use folio_conf::{ClientSettings, Env, FolioSettings, MessageSettings};

	#[cfg(feature = "forms")]
	pub use folio_forms::{
		CancellationToken, FieldKind, FormAction, FormField, FormState, FormStatus, FormValidator,
		FormValues, RecordValidator, SubmitError, SubmitHandler, SubmitOutcome, reduce,
		validators,
	};

	#[cfg(feature = "submit")]
	pub use folio_submit::{ClientError, EndpointSubmitter, FormClient, FormData, UploadFile};
}
