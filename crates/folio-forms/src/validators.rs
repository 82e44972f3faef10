//! Built-in value checks
//!
//! Plain predicates for email addresses and phone numbers, plus constructors
//! for common [`FieldValidator`]s that can be attached to a [`FormField`](crate::FormField).

use crate::field::FieldValidator;
use folio_conf::MessageSettings;
use regex::Regex;
use std::sync::LazyLock;

// Something before "@", something after it, and something after a ".".
//
// Deliberately loose: no RFC 5322 compliance.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// International phone numbers.
//
// - Optional leading "+"
// - Optional parenthesised 1-4 digit area code
// - Up to four further digit groups separated by "-", whitespace or "."
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,3}[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,9}$",
	)
	.expect("PHONE_REGEX: invalid regex pattern")
});

/// Returns `true` when `value` looks like `local@domain.tld`.
///
/// # Examples
///
/// ```
/// use folio_forms::validators::validate_email;
///
/// assert!(validate_email("a@b.co"));
/// assert!(!validate_email("not-an-email"));
/// assert!(!validate_email("two@@example.com"));
/// ```
pub fn validate_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

/// Returns `true` when `value` looks like a phone number.
///
/// # Examples
///
/// ```
/// use folio_forms::validators::validate_phone;
///
/// assert!(validate_phone("+1 555 123 4567"));
/// assert!(!validate_phone("call me"));
/// ```
pub fn validate_phone(value: &str) -> bool {
	PHONE_REGEX.is_match(value)
}

/// Field validator accepting empty values and phone numbers.
///
/// Emptiness is left to the field's `required` flag.
pub fn phone(message: impl Into<String>) -> FieldValidator {
	let message = message.into();
	FieldValidator::new(move |value| {
		(!value.is_empty() && !validate_phone(value)).then(|| message.clone())
	})
}

/// [`phone`] using the configured `invalid_phone` message.
pub fn phone_for(messages: &MessageSettings) -> FieldValidator {
	phone(messages.invalid_phone.clone())
}

/// Field validator requiring at least `min` characters.
///
/// # Examples
///
/// ```
/// use folio_forms::validators::min_length;
///
/// let validator = min_length(3, "Too short");
/// assert_eq!(validator.check("ab"), Some("Too short".to_string()));
/// assert_eq!(validator.check("abc"), None);
/// ```
pub fn min_length(min: usize, message: impl Into<String>) -> FieldValidator {
	let message = message.into();
	FieldValidator::new(move |value| (value.chars().count() < min).then(|| message.clone()))
}

/// Field validator allowing at most `max` characters.
pub fn max_length(max: usize, message: impl Into<String>) -> FieldValidator {
	let message = message.into();
	FieldValidator::new(move |value| (value.chars().count() > max).then(|| message.clone()))
}

/// Field validator requiring non-empty values to match `pattern`.
///
/// Fails when the pattern itself does not compile.
pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<FieldValidator, regex::Error> {
	let regex = Regex::new(pattern)?;
	let message = message.into();
	Ok(FieldValidator::new(move |value| {
		(!value.is_empty() && !regex.is_match(value)).then(|| message.clone())
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("a@b.co")]
	#[case("x@y.com")]
	#[case("user.name+tag@example.co.uk")]
	#[case("weird!chars#@host.io")]
	fn test_validate_email_valid(#[case] email: &str) {
		assert!(validate_email(email), "Expected '{email}' to be valid");
	}

	#[rstest]
	#[case("")]
	#[case("not-an-email")]
	#[case("bad")]
	#[case("@example.com")]
	#[case("user@")]
	#[case("user@example")]
	#[case("us er@example.com")]
	#[case("user@exa mple.com")]
	#[case("user@@example.com")]
	#[case(" a@b.co")]
	fn test_validate_email_invalid(#[case] email: &str) {
		assert!(!validate_email(email), "Expected '{email}' to be invalid");
	}

	#[rstest]
	#[case("5551234567")]
	#[case("+15551234567")]
	#[case("+1 555 123 4567")]
	#[case("(555) 123-4567")]
	#[case("555.123.4567")]
	#[case("+44 20 7946 0958")]
	fn test_validate_phone_valid(#[case] phone: &str) {
		assert!(validate_phone(phone), "Expected '{phone}' to be valid");
	}

	#[rstest]
	#[case("")]
	#[case("phone")]
	#[case("555-CALL-NOW")]
	#[case("++1 555 123 4567")]
	#[case("1")]
	fn test_validate_phone_invalid(#[case] phone: &str) {
		assert!(!validate_phone(phone), "Expected '{phone}' to be invalid");
	}

	#[rstest]
	fn test_phone_validator_skips_empty() {
		// Arrange
		let validator = phone("Bad phone");

		// Act + Assert
		assert_eq!(validator.check(""), None);
		assert_eq!(validator.check("+1 555 123 4567"), None);
		assert_eq!(validator.check("nope"), Some("Bad phone".to_string()));
	}

	#[rstest]
	fn test_phone_for_uses_configured_message() {
		// Arrange
		let messages = MessageSettings {
			invalid_phone: "Numbers only, please".to_string(),
			..MessageSettings::default()
		};

		// Act
		let validator = phone_for(&messages);

		// Assert
		assert_eq!(validator.check("abc"), Some("Numbers only, please".to_string()));
	}

	#[rstest]
	fn test_length_validators_count_chars() {
		// Arrange
		let min = min_length(2, "min");
		let max = max_length(3, "max");

		// Act + Assert
		assert_eq!(min.check("é"), Some("min".to_string()));
		assert_eq!(min.check("éé"), None);
		assert_eq!(max.check("日本語"), None);
		assert_eq!(max.check("日本語!"), Some("max".to_string()));
	}

	#[rstest]
	fn test_pattern_validator() {
		// Arrange
		let validator = pattern("^[A-Z]{3}$", "Three capitals").unwrap();

		// Act + Assert
		assert_eq!(validator.check(""), None);
		assert_eq!(validator.check("ABC"), None);
		assert_eq!(validator.check("abc"), Some("Three capitals".to_string()));
	}

	#[rstest]
	fn test_pattern_validator_rejects_bad_regex() {
		assert!(pattern("(", "never").is_err());
	}
}
