use serde_json::{json, Value};

/// One item answered for a subscription query.
///
/// The event type is whatever the query backend reported
/// (`"EVENT"`, `"note"`, ...) and the item is passed through untouched.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayToClientResult {
  pub event_type: String,
  pub subscription_id: String,
  pub item: Value,
}

impl GatewayToClientResult {
  /// Create new result message
  pub fn new_result(event_type: String, subscription_id: String, item: Value) -> Self {
    Self {
      event_type,
      subscription_id,
      item,
    }
  }

  /// Serialize as [`Value`]
  pub fn as_value(&self) -> Value {
    json!([self.event_type, self.subscription_id, self.item])
  }

  /// Get [`GatewayToClientResult`] as JSON string
  pub fn as_json(&self) -> String {
    self.as_value().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  #[test]
  fn test_result_serializes_as_a_three_element_array() {
    let result =
      GatewayToClientResult::new_result("note".to_string(), "sub1".to_string(), json!({"id": "e1"}));

    assert_eq!(r#"["note","sub1",{"id":"e1"}]"#, result.as_json());
  }

  #[test]
  fn test_result_keeps_non_object_items() {
    let result =
      GatewayToClientResult::new_result("EVENT".to_string(), "sub1".to_string(), json!("raw text"));

    assert_eq!(result.as_value(), json!(["EVENT", "sub1", "raw text"]));
  }
}
