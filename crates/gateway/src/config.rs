use std::{env, time::Duration};

use url::Url;

pub const DEFAULT_HOST: &str = "0.0.0.0:8008";
pub const DEFAULT_EVENT_ENDPOINT: &str = "http://event_handler/new_event";
pub const DEFAULT_QUERY_ENDPOINT: &str = "http://query_service/subscription";

const HOST_KEY: &str = "GATEWAY_HOST";
const EVENT_ENDPOINT_KEY: &str = "EVENT_ENDPOINT";
const QUERY_ENDPOINT_KEY: &str = "QUERY_ENDPOINT";
const BACKEND_TIMEOUT_KEY: &str = "BACKEND_TIMEOUT_SECS";
const CLIENT_READ_TIMEOUT_KEY: &str = "CLIENT_READ_TIMEOUT_SECS";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
  #[error("invalid value {value:?} for {key}: {reason}")]
  Invalid {
    key: &'static str,
    value: String,
    reason: String,
  },
}

/// Runtime settings of the gateway.
///
/// Both timeouts are `None` unless configured, in which case the
/// corresponding wait is unbounded.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
  pub host: String,
  pub event_endpoint: Url,
  pub query_endpoint: Url,
  pub backend_timeout: Option<Duration>,
  /// Bounds the handshake, every read and the closing handshake.
  pub client_read_timeout: Option<Duration>,
}

impl GatewayConfig {
  /// Read the configuration from the process environment.
  /// Call `dotenv::dotenv()` first to pick up a `.env` file.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Read the configuration through `lookup`. Unset and empty values fall back to the defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let host = get(HOST_KEY).unwrap_or_else(|| DEFAULT_HOST.to_string());
    let event_endpoint = parse_url(
      EVENT_ENDPOINT_KEY,
      get(EVENT_ENDPOINT_KEY).as_deref().unwrap_or(DEFAULT_EVENT_ENDPOINT),
    )?;
    let query_endpoint = parse_url(
      QUERY_ENDPOINT_KEY,
      get(QUERY_ENDPOINT_KEY).as_deref().unwrap_or(DEFAULT_QUERY_ENDPOINT),
    )?;
    let backend_timeout = get(BACKEND_TIMEOUT_KEY)
      .map(|value| parse_secs(BACKEND_TIMEOUT_KEY, &value))
      .transpose()?;
    let client_read_timeout = get(CLIENT_READ_TIMEOUT_KEY)
      .map(|value| parse_secs(CLIENT_READ_TIMEOUT_KEY, &value))
      .transpose()?;

    Ok(Self {
      host,
      event_endpoint,
      query_endpoint,
      backend_timeout,
      client_read_timeout,
    })
  }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
  let url = Url::parse(value.trim()).map_err(|err| ConfigError::Invalid {
    key,
    value: value.to_string(),
    reason: err.to_string(),
  })?;

  match url.scheme() {
    "http" | "https" => Ok(url),
    scheme => Err(ConfigError::Invalid {
      key,
      value: value.to_string(),
      reason: format!("unsupported scheme {scheme}"),
    }),
  }
}

fn parse_secs(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
  match value.trim().parse::<u64>() {
    Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
    Ok(_) => Err(ConfigError::Invalid {
      key,
      value: value.to_string(),
      reason: "must be greater than zero".to_string(),
    }),
    Err(err) => Err(ConfigError::Invalid {
      key,
      value: value.to_string(),
      reason: err.to_string(),
    }),
  }
}
