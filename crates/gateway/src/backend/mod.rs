//! Calls to the two HTTP services that own every piece of state:
//! the event-ingestion backend and the query backend.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

pub mod http;
pub mod subscription;

#[cfg(test)]
pub(crate) mod mock;

pub use self::http::HttpBackend;

/// The backend a call goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  /// Receives the events published by clients.
  Event,
  /// Answers subscription queries.
  Query,
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Endpoint::Event => write!(f, "event"),
      Endpoint::Query => write!(f, "query"),
    }
  }
}

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
  /// Connection failure, timeout or non-2xx status. They are not told apart.
  #[error("{endpoint} backend request failed: {source}")]
  Transport {
    endpoint: Endpoint,
    #[source]
    source: reqwest::Error,
  },
  /// The reply is not JSON, or lacks a field the gateway needs.
  #[error("{endpoint} backend sent an unusable reply: {reason}")]
  Decode { endpoint: Endpoint, reason: String },
  #[error("could not build the HTTP client: {0}")]
  Client(#[source] reqwest::Error),
}

impl BackendError {
  pub fn decode<R>(endpoint: Endpoint, reason: R) -> Self
  where
    R: Into<String>,
  {
    Self::Decode {
      endpoint,
      reason: reason.into(),
    }
  }
}

/// One call-and-decode round trip to a backend.
///
/// Implementations must not retry: the session treats any error as fatal.
#[async_trait]
pub trait BackendClient: Send + Sync {
  async fn call(&self, endpoint: Endpoint, body: &Value) -> Result<Value, BackendError>;
}
