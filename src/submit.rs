//! HTTP submission module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::submit::{FormClient, FormData, UploadFile};
//! ```

#[cfg(feature = "submit")]
pub use folio_submit::*;
