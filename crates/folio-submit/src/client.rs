//! HTTP client for form endpoints
//!
//! [`FormClient`] posts JSON records, multipart payloads and single-file
//! uploads, mapping non-2xx responses to [`ClientError::Status`].

use crate::error::{ClientError, ClientResult};
use crate::form_data::{FormData, UploadFile};
use folio_conf::ClientSettings;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;

const SUBMIT_FAILED: &str = "Failed to submit form";
const UPLOAD_FAILED: &str = "File upload failed";

/// Client for posting form data
///
/// # Examples
///
/// ```no_run
/// use folio_conf::ClientSettings;
/// use folio_submit::FormClient;
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), folio_submit::ClientError> {
/// let client = FormClient::new(&ClientSettings::default())?;
/// let response = client
///     .submit_form("https://example.com/api/contact", &json!({"name": "Ada"}))
///     .await?;
/// println!("{response}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FormClient {
	client: Client,
	upload_field_name: String,
}

impl FormClient {
	/// Build a client using the configured timeout and upload field name
	pub fn new(settings: &ClientSettings) -> ClientResult<Self> {
		let client = Client::builder().timeout(settings.timeout()).build()?;
		Ok(Self {
			client,
			upload_field_name: settings.upload_field_name.clone(),
		})
	}

	/// Wrap an existing reqwest client
	pub fn with_client(client: Client) -> Self {
		Self {
			client,
			upload_field_name: ClientSettings::default().upload_field_name,
		}
	}

	pub fn upload_field_name(&self) -> &str {
		&self.upload_field_name
	}

	/// POST `record` as JSON and return the decoded response
	///
	/// An empty 2xx body decodes to `Value::Null`. On a non-2xx status the
	/// server's `message` field is used when present, otherwise
	/// `"Failed to submit form"`.
	pub async fn submit_form<T>(&self, url: &str, record: &T) -> ClientResult<Value>
	where
		T: Serialize + ?Sized,
	{
		let result = self.post_json(url, record).await;
		if let Err(error) = &result {
			tracing::error!(url, error = %error, "Form submission error");
		}
		result
	}

	async fn post_json<T>(&self, url: &str, record: &T) -> ClientResult<Value>
	where
		T: Serialize + ?Sized,
	{
		let body = serde_json::to_vec(record)?;
		tracing::debug!(url, bytes = body.len(), "Posting form as JSON");

		let response = self
			.client
			.post(url)
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.body(body)
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(status_error(response).await);
		}
		read_json(response).await
	}

	/// POST `form_data` as `multipart/form-data`
	///
	/// Errors are mapped the same way as [`submit_form`](Self::submit_form).
	pub async fn submit_multipart(&self, url: &str, form_data: FormData) -> ClientResult<Value> {
		let result = self.post_multipart(url, form_data).await;
		if let Err(error) = &result {
			tracing::error!(url, error = %error, "Form submission error");
		}
		result
	}

	async fn post_multipart(&self, url: &str, form_data: FormData) -> ClientResult<Value> {
		tracing::debug!(url, parts = form_data.len(), "Posting form as multipart");
		let form = form_data.into_multipart()?;

		let response = self
			.client
			.post(url)
			.header(ACCEPT, "application/json")
			.multipart(form)
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(status_error(response).await);
		}
		read_json(response).await
	}

	/// Upload a single file
	///
	/// The part is named `field_name`, or the configured upload field name
	/// (`"file"` by default) when `None`. Any non-2xx status fails with
	/// `"File upload failed"`.
	pub async fn upload_file(
		&self,
		url: &str,
		file: UploadFile,
		field_name: Option<&str>,
	) -> ClientResult<Value> {
		let field_name = field_name.unwrap_or(&self.upload_field_name);
		let result = self.post_file(url, file, field_name).await;
		if let Err(error) = &result {
			tracing::error!(url, error = %error, "File upload error");
		}
		result
	}

	async fn post_file(&self, url: &str, file: UploadFile, field_name: &str) -> ClientResult<Value> {
		tracing::debug!(url, file = %file.file_name, field = field_name, "Uploading file");
		let form = reqwest::multipart::Form::new().part(field_name.to_string(), file.into_part()?);

		let response = self.client.post(url).multipart(form).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(ClientError::Status {
				status: status.as_u16(),
				message: UPLOAD_FAILED.to_string(),
			});
		}
		read_json(response).await
	}
}

async fn read_json(response: Response) -> ClientResult<Value> {
	let body = response.bytes().await?;
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}
	Ok(serde_json::from_slice(&body)?)
}

async fn status_error(response: Response) -> ClientError {
	let status = response.status().as_u16();
	let message = match response.bytes().await {
		Ok(body) => server_message(&body),
		Err(_) => None,
	};
	ClientError::Status {
		status,
		message: message.unwrap_or_else(|| SUBMIT_FAILED.to_string()),
	}
}

/// Non-empty `message` string from a JSON error body
fn server_message(body: &[u8]) -> Option<String> {
	let value: Value = serde_json::from_slice(body).ok()?;
	value
		.get("message")
		.and_then(Value::as_str)
		.filter(|message| !message.is_empty())
		.map(str::to_string)
}
