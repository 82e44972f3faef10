//! Settings module.
//!
//! Layered configuration: defaults, then TOML, then `FOLIO_`-prefixed
//! environment variables.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::conf::FolioSettings;
//!
//! let settings = FolioSettings::load(None)?;
//! # Ok::<(), folio::conf::SettingsError>(())
//! ```

pub use folio_conf::*;
