//! The three types of `client -> gateway` communications.
//!
//!  - `["EVENT", event_JSON]`: used to publish events.
//!
//!  - `["REQ", filter_JSON, subscription_id]`: used to query stored events. Note that
//!       the filter comes *before* the subscription id, and there is exactly one filter.
//!
//!  - `["CLOSE", subscription_id]`: used to stop previous subscriptions.
//!
//! Anything else with a textual tag is kept as [`Command::Unknown`] so the caller can
//! decide what to do with it.
//!
use log::debug;
use serde_json::Value;

use crate::{Error, JsonMap};

use self::{close::ClientToGatewayClose, event::ClientToGatewayEvent, request::ClientToGatewayRequest};

// Internal `client_to_gateway` modules
pub mod close;
pub mod event;
pub mod request;

pub const EVENT: &str = "EVENT";
pub const REQ: &str = "REQ";
pub const CLOSE: &str = "CLOSE";

/// Parses one text frame into its envelope: a non-empty JSON array.
///
pub fn decode_envelope(msg: &str) -> Result<Vec<Value>, Error> {
  let value: Value = serde_json::from_str(msg)?;

  match value {
    Value::Array(envelope) if !envelope.is_empty() => Ok(envelope),
    _ => Err(Error::InvalidData),
  }
}

/// A validated `client -> gateway` message.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Event(ClientToGatewayEvent),
  Request(ClientToGatewayRequest),
  Close(ClientToGatewayClose),
  /// Textual tag that is none of the above. Holds the whole envelope.
  Unknown(Vec<Value>),
}

impl Command {
  /// Decode and validate a text frame.
  pub fn from_json<S>(msg: S) -> Result<Self, Error>
  where
    S: Into<String>,
  {
    let msg: &str = &msg.into();

    if msg.is_empty() {
      return Err(Error::InvalidData);
    }

    Self::from_envelope(decode_envelope(msg)?)
  }

  /// Validate an already decoded envelope against the rules of its tag.
  pub fn from_envelope(envelope: Vec<Value>) -> Result<Self, Error> {
    let tag = match envelope.first() {
      Some(Value::String(tag)) => tag.clone(),
      Some(other) => {
        return Err(Error::type_mismatch(
          "envelope",
          format!("tag must be a string, got {other}"),
        ))
      }
      None => return Err(Error::InvalidData),
    };

    let command = match tag.as_str() {
      EVENT => Self::Event(ClientToGatewayEvent::from_envelope(envelope)?),
      REQ => Self::Request(ClientToGatewayRequest::from_envelope(envelope)?),
      CLOSE => Self::Close(ClientToGatewayClose::from_envelope(envelope)?),
      _ => Self::Unknown(envelope),
    };
    debug!("Parsed command: {:?}", command);

    Ok(command)
  }
}

fn check_tag(v: &[Value], tag: &str) -> Result<(), Error> {
  match v.first() {
    Some(Value::String(found)) if found == tag => Ok(()),
    _ => Err(Error::InvalidData),
  }
}

fn object_at(v: &[Value], index: usize, command: &str, what: &str) -> Result<JsonMap, Error> {
  match v.get(index) {
    Some(Value::Object(map)) => Ok(map.clone()),
    Some(other) => Err(Error::type_mismatch(
      command,
      format!("{what} must be an object, got {other}"),
    )),
    None => Err(Error::type_mismatch(command, format!("missing {what}"))),
  }
}

fn string_at(v: &[Value], index: usize, command: &str, what: &str) -> Result<String, Error> {
  match v.get(index) {
    Some(Value::String(s)) => Ok(s.clone()),
    Some(other) => Err(Error::type_mismatch(
      command,
      format!("{what} must be a string, got {other}"),
    )),
    None => Err(Error::type_mismatch(command, format!("missing {what}"))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;
  use serde_json::json;

  #[test]
  fn parse_event_command() {
    let result = Command::from_json(r#"["EVENT",{"content":"potato","kind":1}]"#).unwrap();

    let expected_event = json!({"content":"potato","kind":1})
      .as_object()
      .unwrap()
      .clone();
    assert_eq!(
      result,
      Command::Event(ClientToGatewayEvent::new_event(expected_event))
    );
  }

  #[test]
  fn parse_request_command() {
    let result = Command::from_json(r#"["REQ",{"kinds":[1]},"sub1"]"#).unwrap();

    let expected_filter = json!({"kinds":[1]}).as_object().unwrap().clone();
    assert_eq!(
      result,
      Command::Request(ClientToGatewayRequest::new_request(
        expected_filter,
        "sub1".to_string()
      ))
    );
  }

  #[test]
  fn parse_close_command() {
    let result = Command::from_json(r#"["CLOSE","sub1"]"#).unwrap();

    assert_eq!(
      result,
      Command::Close(ClientToGatewayClose::new_close("sub1".to_string()))
    );
  }

  #[test]
  fn unknown_tag_is_kept_as_unknown() {
    let result = Command::from_json(r#"["AUTH","challenge"]"#).unwrap();

    assert_eq!(result, Command::Unknown(vec![json!("AUTH"), json!("challenge")]));
  }

  #[test]
  fn malformed_json_is_a_decode_error() {
    let result = Command::from_json(r#"["REQ", {"kinds":[1]"#);

    assert!(matches!(result, Err(Error::Json(_))));
  }

  #[test]
  fn non_array_and_empty_frames_are_invalid() {
    assert!(matches!(Command::from_json("{}"), Err(Error::InvalidData)));
    assert!(matches!(Command::from_json("[]"), Err(Error::InvalidData)));
    assert!(matches!(Command::from_json("\"EVENT\""), Err(Error::InvalidData)));
    assert!(matches!(Command::from_json(""), Err(Error::InvalidData)));
  }

  #[test]
  fn non_textual_tag_is_a_type_mismatch() {
    let err = Command::from_json(r#"[1,"sub1"]"#).unwrap_err();

    assert!(matches!(err, Error::TypeMismatch { .. }));
  }

  #[test]
  fn known_tag_with_wrong_shape_is_a_type_mismatch() {
    let frames = [
      r#"["EVENT"]"#,
      r#"["EVENT","not an object"]"#,
      r#"["REQ","sub1",{"kinds":[1]}]"#,
      r#"["REQ",{"kinds":[1]}]"#,
      r#"["REQ",{"kinds":[1]},42]"#,
      r#"["CLOSE"]"#,
      r#"["CLOSE",{"id":"sub1"}]"#,
    ];

    for frame in frames {
      let result = Command::from_json(frame);
      assert!(
        matches!(result, Err(Error::TypeMismatch { .. })),
        "expected type mismatch for {frame}, got {result:?}"
      );
    }
  }

  #[test]
  fn trailing_elements_are_ignored() {
    let result = Command::from_json(r#"["CLOSE","sub1","extra"]"#).unwrap();

    assert_eq!(
      result,
      Command::Close(ClientToGatewayClose::new_close("sub1".to_string()))
    );
  }
}
