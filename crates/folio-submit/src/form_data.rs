//! Multipart payloads
//!
//! [`FormData`] is an ordered list of named parts built from a JSON record,
//! ready to be turned into a `multipart/form-data` body.

use crate::error::ClientResult;
use folio_forms::FormValues;
use reqwest::multipart;
use serde_json::{Map, Value};
use std::path::Path;

/// In-memory file destined for a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
	pub file_name: String,
	pub content_type: Option<String>,
	pub content: Vec<u8>,
}

impl UploadFile {
	pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
		Self {
			file_name: file_name.into(),
			content_type: None,
			content: content.into(),
		}
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	/// Read a file from disk, naming it after the path's last component
	pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
		let path = path.as_ref();
		let content = tokio::fs::read(path).await?;
		let file_name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		Ok(Self::new(file_name, content))
	}

	pub(crate) fn into_part(self) -> ClientResult<multipart::Part> {
		let part = multipart::Part::bytes(self.content).file_name(self.file_name);
		match self.content_type {
			Some(content_type) => Ok(part.mime_str(&content_type)?),
			None => Ok(part),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
	Text(String),
	File(UploadFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
	pub name: String,
	pub value: PartValue,
}

/// Ordered multipart parts; names may repeat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
	parts: Vec<FormPart>,
}

impl FormData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Flatten a JSON record into parts
	///
	/// - `null` values are skipped
	/// - arrays become one `key[]` part per item
	/// - objects are sent as their JSON text
	/// - strings are sent verbatim, other scalars in their JSON form
	///
	/// # Examples
	///
	/// ```
	/// use folio_submit::{FormData, PartValue};
	/// use serde_json::json;
	///
	/// let record = json!({
	///     "name": "Ada",
	///     "age": 36,
	///     "nickname": null,
	///     "tags": ["math", "engines"],
	///     "address": {"city": "London"},
	/// });
	/// let data = FormData::from_record(record.as_object().unwrap());
	///
	/// let parts: Vec<(&str, &str)> = data
	///     .parts()
	///     .iter()
	///     .map(|part| match &part.value {
	///         PartValue::Text(text) => (part.name.as_str(), text.as_str()),
	///         PartValue::File(_) => unreachable!(),
	///     })
	///     .collect();
	/// assert_eq!(
	///     parts,
	///     vec![
	///         ("name", "Ada"),
	///         ("age", "36"),
	///         ("tags[]", "math"),
	///         ("tags[]", "engines"),
	///         ("address", r#"{"city":"London"}"#),
	///     ]
	/// );
	/// ```
	pub fn from_record(record: &Map<String, Value>) -> Self {
		let mut data = Self::new();
		for (key, value) in record {
			match value {
				Value::Null => {}
				Value::Array(items) => {
					let name = format!("{key}[]");
					for item in items {
						data = data.text(name.clone(), text_of(item));
					}
				}
				other => data = data.text(key.clone(), text_of(other)),
			}
		}
		data
	}

	/// One text part per field, values verbatim
	pub fn from_values(values: &FormValues) -> Self {
		values
			.iter()
			.fold(Self::new(), |data, (name, value)| data.text(name.clone(), value.clone()))
	}

	pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.parts.push(FormPart {
			name: name.into(),
			value: PartValue::Text(value.into()),
		});
		self
	}

	pub fn file(mut self, name: impl Into<String>, file: UploadFile) -> Self {
		self.parts.push(FormPart {
			name: name.into(),
			value: PartValue::File(file),
		});
		self
	}

	pub fn parts(&self) -> &[FormPart] {
		&self.parts
	}

	pub fn len(&self) -> usize {
		self.parts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parts.is_empty()
	}

	/// Build the request body
	///
	/// Fails only when a file carries an unparseable content type.
	pub fn into_multipart(self) -> ClientResult<multipart::Form> {
		self.parts
			.into_iter()
			.try_fold(multipart::Form::new(), |form, part| match part.value {
				PartValue::Text(text) => Ok(form.text(part.name, text)),
				PartValue::File(file) => Ok(form.part(part.name, file.into_part()?)),
			})
	}
}

fn text_of(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
