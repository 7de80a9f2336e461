use std::time::Duration;

use tokio_tungstenite::tungstenite::Error as WsError;

use crate::backend::BackendError;

/// Reasons a session ends early. Every variant closes the connection.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
  /// Reading from or writing to the client failed
  #[error("connection error: {0}")]
  Transport(#[from] WsError),
  /// The client sent a frame that could not be decoded or validated
  #[error("bad frame: {0}")]
  Protocol(#[from] relay_gateway_protocol::Error),
  #[error(transparent)]
  Backend(#[from] BackendError),
  #[error("no frame received for {0:?}")]
  ReadTimeout(Duration),
  #[error("handshake not completed within {0:?}")]
  HandshakeTimeout(Duration),
}
