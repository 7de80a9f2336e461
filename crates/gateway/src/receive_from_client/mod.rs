use futures_util::Sink;
use log::warn;
use relay_gateway_protocol::client_to_gateway::Command;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use crate::{backend::BackendClient, error::SessionError, session::ConnectionInfo};

use self::{close::on_close_message, event::on_event_message, request::on_request_message};

pub mod close;
pub mod event;
pub mod request;

/// Routes a validated command to its handler.
///
/// Unknown tags are only logged: the connection stays open.
///
pub async fn dispatch_command<W>(
  command: Command,
  connection: &ConnectionInfo,
  backend: &dyn BackendClient,
  writer: &mut W,
) -> Result<(), SessionError>
where
  W: Sink<Message, Error = WsError> + Unpin,
{
  match command {
    Command::Event(client_event) => on_event_message(client_event, backend).await,
    Command::Request(client_request) => {
      on_request_message(client_request, &connection.origin, backend, writer).await
    }
    Command::Close(client_close) => {
      on_close_message(client_close, connection);
      Ok(())
    }
    Command::Unknown(envelope) => {
      warn!("Unsupported message format from {connection}: {envelope:?}");
      Ok(())
    }
  }
}
