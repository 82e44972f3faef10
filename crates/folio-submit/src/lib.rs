//! HTTP submission for Folio forms
//!
//! - [`FormClient`] posts JSON records, multipart payloads and file uploads
//! - [`FormData`] flattens a JSON record into multipart parts
//! - [`EndpointSubmitter`] plugs a [`FormClient`] into a
//!   [`FormValidator`](folio_forms::FormValidator) as its submit handler
//!
//! ## Example
//!
//! ```no_run
//! use folio_conf::FolioSettings;
//! use folio_forms::{FormField, FormValidator};
//! use folio_submit::EndpointSubmitter;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = FolioSettings::from_toml_str(
//!     r#"
//!     [client]
//!     endpoint = "https://example.com/api/contact"
//!     "#,
//! )?;
//! let submitter = EndpointSubmitter::from_settings(&settings.client)?;
//!
//! let mut form = FormValidator::new([("email", FormField::new("").required())], submitter);
//! form.handle_change("email", "ada@example.com")?;
//! let sent = form.handle_submit().await;
//! # let _ = sent;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod form_data;
pub mod submitter;

pub use client::FormClient;
pub use error::{ClientError, ClientResult};
pub use form_data::{FormData, FormPart, PartValue, UploadFile};
pub use submitter::EndpointSubmitter;
