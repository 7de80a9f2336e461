use serde_json::Value;

use super::{check_tag, object_at, EVENT};
use crate::{Error, JsonMap};

/// Used by clients to publish an event.
///
/// The event body is kept as an opaque JSON object: checking its
/// fields is up to the event backend.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToGatewayEvent {
  pub code: String, // "EVENT"
  pub event: JsonMap,
}

impl ClientToGatewayEvent {
  pub fn new_event(event: JsonMap) -> Self {
    Self {
      code: EVENT.to_string(),
      event,
    }
  }

  /// Validate a decoded envelope.
  /// ["EVENT", <event JSON>]
  pub fn from_envelope(v: Vec<Value>) -> Result<Self, Error> {
    check_tag(&v, EVENT)?;

    let event = object_at(&v, 1, EVENT, "event")?;
    Ok(Self::new_event(event))
  }
}
