use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::{BackendClient, BackendError, Endpoint};
use crate::config::GatewayConfig;

/// [`BackendClient`] speaking JSON over HTTP.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct HttpBackend {
  client: Client,
  event_endpoint: Url,
  query_endpoint: Url,
}

impl HttpBackend {
  pub fn new(config: &GatewayConfig) -> Result<Self, BackendError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.backend_timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(BackendError::Client)?;

    Ok(Self {
      client,
      event_endpoint: config.event_endpoint.clone(),
      query_endpoint: config.query_endpoint.clone(),
    })
  }

  fn url_for(&self, endpoint: Endpoint) -> &Url {
    match endpoint {
      Endpoint::Event => &self.event_endpoint,
      Endpoint::Query => &self.query_endpoint,
    }
  }
}

#[async_trait]
impl BackendClient for HttpBackend {
  async fn call(&self, endpoint: Endpoint, body: &Value) -> Result<Value, BackendError> {
    let url = self.url_for(endpoint).clone();
    debug!("POST {url}: {body}");

    let transport = |source| BackendError::Transport { endpoint, source };

    // `json` also sets `Content-Type: application/json`
    let response = self
      .client
      .post(url)
      .json(body)
      .send()
      .await
      .map_err(transport)?
      .error_for_status()
      .map_err(transport)?;
    let bytes = response.bytes().await.map_err(transport)?;

    serde_json::from_slice(&bytes).map_err(|err| BackendError::decode(endpoint, err.to_string()))
  }
}
