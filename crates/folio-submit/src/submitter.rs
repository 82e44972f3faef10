use crate::client::FormClient;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use folio_conf::ClientSettings;
use folio_forms::{FormValues, SubmitError, SubmitHandler};

/// [`SubmitHandler`] that posts form values as JSON to a fixed endpoint
///
/// A non-2xx response with a `message` becomes [`SubmitError::Rejected`]
/// carrying that message.
#[derive(Debug, Clone)]
pub struct EndpointSubmitter {
	client: FormClient,
	endpoint: String,
}

impl EndpointSubmitter {
	pub fn new(client: FormClient, endpoint: impl Into<String>) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
		}
	}

	/// Build from settings; `client.endpoint` must be set
	pub fn from_settings(settings: &ClientSettings) -> ClientResult<Self> {
		let endpoint = settings
			.endpoint
			.clone()
			.ok_or(ClientError::MissingEndpoint)?;
		Ok(Self::new(FormClient::new(settings)?, endpoint))
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

#[async_trait]
impl SubmitHandler for EndpointSubmitter {
	async fn submit(&self, values: FormValues) -> Result<(), SubmitError> {
		self.client.submit_form(&self.endpoint, &values).await?;
		Ok(())
	}
}
