//! Folio settings
//!
//! [`FolioSettings`] groups the user-facing validation messages and the HTTP
//! client configuration used when forms are submitted to a server.

use crate::env::{Env, EnvError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings file: {0}")]
	Io(#[from] std::io::Error),

	#[error("Failed to parse settings: {0}")]
	Toml(#[from] toml::de::Error),

	#[error(transparent)]
	Env(#[from] EnvError),

	#[error("Invalid setting '{key}': {reason}")]
	Invalid { key: String, reason: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Messages attached to fields that fail the built-in checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
	/// Shown when a required field is empty after trimming
	pub required: String,
	/// Shown when an email field does not look like `local@domain.tld`
	pub invalid_email: String,
	/// Shown by the phone validator
	pub invalid_phone: String,
}

impl Default for MessageSettings {
	fn default() -> Self {
		Self {
			required: "This field is required".to_string(),
			invalid_email: "Please enter a valid email address".to_string(),
			invalid_phone: "Please enter a valid phone number".to_string(),
		}
	}
}

/// HTTP client settings for form submission and uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
	/// Endpoint that receives submitted form values
	pub endpoint: Option<String>,
	/// Request timeout in seconds
	pub timeout_secs: u64,
	/// Multipart field name used for single-file uploads
	pub upload_field_name: String,
}

impl ClientSettings {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

impl Default for ClientSettings {
	fn default() -> Self {
		Self {
			endpoint: None,
			timeout_secs: 30,
			upload_field_name: "file".to_string(),
		}
	}
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioSettings {
	pub messages: MessageSettings,
	pub client: ClientSettings,
}

impl FolioSettings {
	/// Parse settings from a TOML document
	///
	/// Missing tables and keys fall back to their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::FolioSettings;
	///
	/// let settings = FolioSettings::from_toml_str("[messages]\nrequired = \"Required\"").unwrap();
	/// assert_eq!(settings.messages.required, "Required");
	/// assert_eq!(settings.client.upload_field_name, "file");
	/// ```
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read and parse a TOML settings file
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "Loaded settings file");
		Self::from_toml_str(&source)
	}

	/// Resolve settings from an optional file plus `FOLIO_*` environment variables
	pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
		let base = match path {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		base.with_env_overrides(&Env::default())
	}

	/// Apply environment overrides on top of these settings
	///
	/// Recognised keys (relative to the reader's prefix):
	///
	/// - `MESSAGES_REQUIRED`, `MESSAGES_INVALID_EMAIL`, `MESSAGES_INVALID_PHONE`
	/// - `CLIENT_ENDPOINT`, `CLIENT_TIMEOUT_SECS`, `CLIENT_UPLOAD_FIELD_NAME`
	pub fn with_env_overrides(mut self, env: &Env) -> SettingsResult<Self> {
		if let Some(v) = env.str_opt("MESSAGES_REQUIRED")? {
			self.messages.required = v;
		}
		if let Some(v) = env.str_opt("MESSAGES_INVALID_EMAIL")? {
			self.messages.invalid_email = v;
		}
		if let Some(v) = env.str_opt("MESSAGES_INVALID_PHONE")? {
			self.messages.invalid_phone = v;
		}
		if let Some(v) = env.str_opt("CLIENT_ENDPOINT")? {
			self.client.endpoint = Some(v);
		}
		if let Some(v) = env.u64_opt("CLIENT_TIMEOUT_SECS")? {
			self.client.timeout_secs = v;
		}
		if let Some(v) = env.str_opt("CLIENT_UPLOAD_FIELD_NAME")? {
			self.client.upload_field_name = v;
		}

		self.validate()?;
		Ok(self)
	}

	/// Check cross-field constraints that serde cannot express
	pub fn validate(&self) -> SettingsResult<()> {
		let messages = [
			("messages.required", &self.messages.required),
			("messages.invalid_email", &self.messages.invalid_email),
			("messages.invalid_phone", &self.messages.invalid_phone),
			("client.upload_field_name", &self.client.upload_field_name),
		];
		for (key, value) in messages {
			if value.trim().is_empty() {
				return Err(invalid(key, "must not be empty"));
			}
		}

		if self.client.timeout_secs == 0 {
			return Err(invalid("client.timeout_secs", "must be greater than zero"));
		}

		if let Some(endpoint) = &self.client.endpoint {
			let parsed = url::Url::parse(endpoint)
				.map_err(|e| invalid("client.endpoint", &e.to_string()))?;
			if !matches!(parsed.scheme(), "http" | "https") {
				return Err(invalid("client.endpoint", "scheme must be http or https"));
			}
		}

		Ok(())
	}
}

fn invalid(key: &str, reason: &str) -> SettingsError {
	SettingsError::Invalid {
		key: key.to_string(),
		reason: reason.to_string(),
	}
}
