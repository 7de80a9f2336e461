use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{BackendClient, BackendError, Endpoint};

/// Records every call and answers with a canned reply per endpoint.
/// Endpoints without a reply fail with a decode error, as if the backend had
/// answered garbage.
#[derive(Debug, Default)]
pub struct MockBackend {
  replies: HashMap<Endpoint, Value>,
  calls: Mutex<Vec<(Endpoint, Value)>>,
}

impl MockBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_reply(mut self, endpoint: Endpoint, reply: Value) -> Self {
    self.replies.insert(endpoint, reply);
    self
  }

  pub fn calls(&self) -> Vec<(Endpoint, Value)> {
    self.calls.lock().unwrap().clone()
  }

  pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Value> {
    self
      .calls()
      .into_iter()
      .filter(|(called, _)| *called == endpoint)
      .map(|(_, body)| body)
      .collect()
  }
}

#[async_trait]
impl BackendClient for MockBackend {
  async fn call(&self, endpoint: Endpoint, body: &Value) -> Result<Value, BackendError> {
    self.calls.lock().unwrap().push((endpoint, body.clone()));

    self
      .replies
      .get(&endpoint)
      .cloned()
      .ok_or_else(|| BackendError::decode(endpoint, "mock backend is unreachable"))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[tokio::test]
  async fn endpoint_without_reply_fails_with_a_decode_error() {
    let backend = MockBackend::new().with_reply(Endpoint::Event, json!({"status": "ok"}));

    let result = backend.call(Endpoint::Query, &json!({})).await;

    assert!(matches!(
      result,
      Err(BackendError::Decode {
        endpoint: Endpoint::Query,
        ..
      })
    ));
    assert_eq!(backend.calls_to(Endpoint::Query), vec![json!({})]);
  }
}
