//! Environment variable access
//!
//! Typed, prefix-aware lookups used to override file-based settings.

use std::env;

/// Prefix applied to every Folio environment variable.
pub const DEFAULT_ENV_PREFIX: &str = "FOLIO_";

/// Environment variable reader with prefix support
#[derive(Debug, Clone)]
pub struct Env {
	/// Prefix for environment variables (e.g., "FOLIO_")
	pub prefix: Option<String>,
}

impl Env {
	/// Create a reader without a prefix
	pub fn new() -> Self {
		Self { prefix: None }
	}

	/// Set a prefix for all environment variable lookups
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::Env;
	///
	/// let env = Env::new().with_prefix("FOLIO_");
	/// assert_eq!(env.key_name("CLIENT_ENDPOINT"), "FOLIO_CLIENT_ENDPOINT");
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Full variable name with the prefix applied
	pub fn key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	/// Read a string value, `None` when the variable is unset
	pub fn str_opt(&self, key: &str) -> Result<Option<String>, EnvError> {
		let full_key = self.key_name(key);
		validate_env_var_name(&full_key)?;

		match env::var(&full_key) {
			Ok(val) => Ok(Some(val)),
			Err(env::VarError::NotPresent) => Ok(None),
			Err(env::VarError::NotUnicode(_)) => Err(EnvError::ParseError {
				key: full_key,
				value_len: 0,
				error: "value is not valid unicode".to_string(),
			}),
		}
	}

	/// Read an unsigned integer value, `None` when the variable is unset
	pub fn u64_opt(&self, key: &str) -> Result<Option<u64>, EnvError> {
		let Some(val) = self.str_opt(key)? else {
			return Ok(None);
		};

		val.trim()
			.parse::<u64>()
			.map(Some)
			.map_err(|e| EnvError::ParseError {
				key: self.key_name(key),
				value_len: val.len(),
				error: e.to_string(),
			})
	}
}

impl Default for Env {
	/// Reader using [`DEFAULT_ENV_PREFIX`]
	fn default() -> Self {
		Self::new().with_prefix(DEFAULT_ENV_PREFIX)
	}
}

/// Validates an environment variable name.
///
/// Rejects names that are empty, contain control characters, or contain
/// the `=` character (which is used as the key-value separator).
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not be empty".to_string(),
		});
	}

	if let Some(pos) = name.find(|c: char| c.is_control()) {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: format!(
				"environment variable name contains control character at position {}",
				pos
			),
		});
	}

	if name.contains('=') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not contain '='".to_string(),
		});
	}

	Ok(())
}

/// Environment variable errors
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	ParseError {
		key: String,
		/// Length of the original value, kept instead of the raw value
		value_len: usize,
		error: String,
	},

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}
