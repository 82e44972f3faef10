//! # Folio Settings
//!
//! Layered configuration for Folio forms.
//!
//! Settings are resolved from three sources, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`FolioSettings::default`])
//! 2. A TOML document or file ([`FolioSettings::from_toml_str`], [`FolioSettings::from_file`])
//! 3. Prefixed environment variables ([`FolioSettings::with_env_overrides`])
//!
//! ## Example
//!
//! ```
//! use folio_conf::FolioSettings;
//!
//! let settings = FolioSettings::from_toml_str(
//!     r#"
//!     [client]
//!     endpoint = "https://example.com/api/contact"
//!     timeout_secs = 10
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.client.timeout_secs, 10);
//! assert_eq!(settings.messages.required, "This field is required");
//! ```

pub mod env;
pub mod settings;

pub use env::{DEFAULT_ENV_PREFIX, Env, EnvError, validate_env_var_name};
pub use settings::{
	ClientSettings, FolioSettings, MessageSettings, SettingsError, SettingsResult,
};
