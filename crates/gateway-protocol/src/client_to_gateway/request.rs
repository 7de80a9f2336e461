use serde_json::Value;

use super::{check_tag, object_at, string_at, REQ};
use crate::{Error, JsonMap};

/// Used to query the events matching a filter.
///
/// The filter is opaque to the gateway; the query backend
/// interprets it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToGatewayRequest {
  pub code: String, // "REQ"
  pub filter: JsonMap,
  pub subscription_id: String,
}

impl ClientToGatewayRequest {
  pub fn new_request(filter: JsonMap, subscription_id: String) -> Self {
    Self {
      code: REQ.to_string(),
      filter,
      subscription_id,
    }
  }

  /// Validate a decoded envelope.
  /// ["REQ", <filter JSON>, <subscription_id>]
  pub fn from_envelope(v: Vec<Value>) -> Result<Self, Error> {
    check_tag(&v, REQ)?;

    let filter = object_at(&v, 1, REQ, "filter")?;
    let subscription_id = string_at(&v, 2, REQ, "subscription id")?;
    Ok(Self::new_request(filter, subscription_id))
  }
}
