use serde_json::{json, Value};

use super::EOSE;

/// Used to indicate the End Of Stored Events (EOSE).
/// Nothing else is sent for the subscription afterwards.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayToClientEose {
  pub code: String, // "EOSE"
  pub subscription_id: String,
}

impl GatewayToClientEose {
  /// Create new `EOSE` message
  pub fn new_eose(subscription_id: String) -> Self {
    Self {
      code: EOSE.to_string(),
      subscription_id,
    }
  }

  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    json!([EOSE, self.subscription_id])
  }

  /// Get [`GatewayToClientEose`] as JSON string
  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }
}
