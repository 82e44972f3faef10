//! Form state and validation for Folio
//!
//! This crate provides:
//! - A fixed set of named [`FormField`]s with required flags and custom validators
//! - Built-in email and phone checks in [`validators`]
//! - A pure reducer ([`FormState`], [`FormAction`], [`reduce`]) over the form's state
//! - Cross-field checks with [`RecordValidator`]
//! - [`FormValidator`], which runs the submit lifecycle against a [`SubmitHandler`]
//!
//! ## Example
//!
//! ```
//! use folio_forms::{FormField, FormValidator, FormValues, SubmitError, SubmitOutcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut form = FormValidator::new(
//!     [("email", FormField::new("").required())],
//!     |_values: FormValues| async { Ok::<(), SubmitError>(()) },
//! );
//!
//! form.handle_change("email", "not-an-email").unwrap();
//! assert_eq!(
//!     form.errors().get("email").map(String::as_str),
//!     Some("Please enter a valid email address"),
//! );
//!
//! assert!(matches!(form.submit().await, SubmitOutcome::Invalid(_)));
//! # }
//! ```

pub mod error;
pub mod field;
pub mod record;
pub mod state;
pub mod validator;
pub mod validators;

pub use error::{FormError, FormResult, SubmitError};
pub use field::{FieldKind, FieldValidator, FormField};
pub use record::RecordValidator;
pub use state::{FieldErrors, FormAction, FormState, FormStatus, FormValues, reduce};
pub use validator::{FormValidator, SubmitHandler, SubmitOutcome};

// Re-exported so callers can build cancellation tokens without a direct dependency.
pub use tokio_util::sync::CancellationToken;
