use futures_util::Sink;
use log::{debug, info};
use relay_gateway_protocol::{
  client_to_gateway::request::ClientToGatewayRequest,
  gateway_to_client::{eose::GatewayToClientEose, result::GatewayToClientResult},
};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use crate::{
  backend::{
    subscription::{SubscriptionQuery, SubscriptionResponse},
    BackendClient, Endpoint,
  },
  error::SessionError,
  send_to_client::send_messages_to_client,
};

/// Frames answering one subscription, in the order they must be written:
/// one frame per result, then exactly one EOSE.
///
/// Every frame carries the subscription id the backend answered with.
///
pub fn frames_for_response(response: SubscriptionResponse) -> Vec<String> {
  let eose = GatewayToClientEose::new_eose(response.subscription_id.clone());

  if response.is_eose() {
    return vec![eose.as_json()];
  }

  let mut frames: Vec<String> = response
    .results
    .into_iter()
    .map(|item| {
      GatewayToClientResult::new_result(
        response.event.clone(),
        response.subscription_id.clone(),
        item,
      )
      .as_json()
    })
    .collect();
  frames.push(eose.as_json());

  frames
}

/// Asks the query backend for the events matching the request and
/// writes them to the client, followed by EOSE.
///
/// One backend round trip per `REQ`: there are no live updates after EOSE.
/// If anything fails half way, EOSE is never written.
///
pub async fn on_request_message<W>(
  client_request: ClientToGatewayRequest,
  origin: &str,
  backend: &dyn BackendClient,
  writer: &mut W,
) -> Result<(), SessionError>
where
  W: Sink<Message, Error = WsError> + Unpin,
{
  let query = SubscriptionQuery {
    event_dict: client_request.filter,
    subscription_id: client_request.subscription_id,
    origin: origin.to_string(),
  };

  let reply = backend.call(Endpoint::Query, &query.as_value()).await?;
  debug!("Response received as: {reply}");

  let response = SubscriptionResponse::from_value(reply)?;
  if response.subscription_id != query.subscription_id {
    debug!(
      "Query backend renamed subscription {} to {}",
      query.subscription_id, response.subscription_id
    );
  }

  let subscription_id = response.subscription_id.clone();
  let frames = frames_for_response(response);
  info!(
    "Sending {} result(s) for subscription {subscription_id}",
    frames.len() - 1
  );
  send_messages_to_client(writer, frames).await?;

  Ok(())
}
