use relay_gateway_protocol::{gateway_to_client::EOSE, JsonMap};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{BackendError, Endpoint};

/// Body of a subscription query.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionQuery {
  /// The client's filter, under the name the query service expects.
  pub event_dict: JsonMap,
  pub subscription_id: String,
  pub origin: String,
}

impl SubscriptionQuery {
  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    json!({
      "event_dict": self.event_dict,
      "subscription_id": self.subscription_id,
      "origin": self.origin,
    })
  }
}

#[derive(Debug, Deserialize)]
struct RawSubscriptionResponse {
  event: String,
  subscription_id: String,
  #[serde(default)]
  results_json: Option<Value>,
}

/// What the query backend answered for one subscription.
///
/// `subscription_id` is the backend's; it wins over the one the client sent.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionResponse {
  pub event: String,
  pub subscription_id: String,
  pub results: Vec<Value>,
}

impl SubscriptionResponse {
  pub fn from_value(value: Value) -> Result<Self, BackendError> {
    let raw: RawSubscriptionResponse =
      serde_json::from_value(value).map_err(|err| BackendError::decode(Endpoint::Query, err.to_string()))?;

    let results = if raw.event == EOSE {
      vec![]
    } else {
      decode_results(raw.results_json)?
    };

    Ok(Self {
      event: raw.event,
      subscription_id: raw.subscription_id,
      results,
    })
  }

  /// `true` when there is nothing to send but the EOSE marker.
  pub fn is_eose(&self) -> bool {
    self.event == EOSE
  }
}

/// `results_json` is usually an array, but some query services send the
/// array serialized inside a string.
fn decode_results(results_json: Option<Value>) -> Result<Vec<Value>, BackendError> {
  match results_json {
    Some(Value::Array(items)) => Ok(items),
    Some(Value::String(encoded)) => serde_json::from_str::<Vec<Value>>(&encoded).map_err(|err| {
      BackendError::decode(
        Endpoint::Query,
        format!("results_json is not an encoded array: {err}"),
      )
    }),
    Some(other) => Err(BackendError::decode(
      Endpoint::Query,
      format!("results_json must be an array, got {other}"),
    )),
    None => Err(BackendError::decode(Endpoint::Query, "missing results_json")),
  }
}
