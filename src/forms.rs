//! Forms module.
//!
//! Field state, the form reducer, validators and the submit state machine.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::forms::{FormField, FormState};
//!
//! let state = FormState::new([("email", FormField::new("").required())]);
//! ```

#[cfg(feature = "forms")]
pub use folio_forms::*;
