use log::info;
use relay_gateway_protocol::client_to_gateway::event::ClientToGatewayEvent;
use serde_json::Value;

use crate::{
  backend::{BackendClient, BackendError, Endpoint},
  error::SessionError,
};

/// Forwards a published event to the event backend and logs its acknowledgement.
///
/// Nothing is written back to the client.
pub async fn on_event_message(
  client_event: ClientToGatewayEvent,
  backend: &dyn BackendClient,
) -> Result<(), SessionError> {
  let body = Value::Object(client_event.event);

  let acknowledgement = backend.call(Endpoint::Event, &body).await?;
  if !acknowledgement.is_object() {
    return Err(BackendError::decode(
      Endpoint::Event,
      format!("acknowledgement must be an object, got {acknowledgement}"),
    )
    .into());
  }

  info!("Received response from event backend: {acknowledgement}");
  Ok(())
}
