use serde_json::Value;

use super::{check_tag, string_at, CLOSE};
use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToGatewayClose {
  pub code: String, // "CLOSE"
  pub subscription_id: String,
}

impl ClientToGatewayClose {
  pub fn new_close(subscription_id: String) -> Self {
    Self {
      code: CLOSE.to_string(),
      subscription_id,
    }
  }

  /// Validate a decoded envelope.
  /// ["CLOSE", <subscription_id>]
  pub fn from_envelope(v: Vec<Value>) -> Result<Self, Error> {
    check_tag(&v, CLOSE)?;

    let subscription_id = string_at(&v, 1, CLOSE, "subscription id")?;
    Ok(Self::new_close(subscription_id))
  }
}
