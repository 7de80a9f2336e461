//! One session per client connection.
//!
//! A session goes `Connecting -> Open -> Closed`:
//!  - `Connecting`: the WebSocket handshake, where `Origin` and `Referer` are captured.
//!  - `Open`: frames are read and handled one at a time, in order.
//!  - `Closed`: reached on the first fatal error or when the client goes away.
//!      The connection is released on every path.
//!
//! The optional client timeout bounds every wait on the peer: the handshake, each read
//! and the closing handshake.

use std::{fmt, future::Future, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::StreamExt;
use log::{debug, error, info};
use relay_gateway_protocol::client_to_gateway::Command;
use tokio::{
  io::{AsyncRead, AsyncWrite},
  time,
};
use tokio_tungstenite::{
  tungstenite::{
    handshake::server::{ErrorResponse, Request, Response},
    http::header::{HeaderName, ORIGIN, REFERER},
    Error as WsError, Message,
  },
  WebSocketStream,
};
use uuid::Uuid;

use crate::{backend::BackendClient, error::SessionError, receive_from_client::dispatch_command};

/// What is known about a client once its connection is upgraded.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
  /// Only used to correlate log lines.
  pub id: Uuid,
  pub addr: SocketAddr,
  /// Forwarded with every subscription query. Empty when the header was missing.
  pub origin: String,
  /// Logged only.
  pub referer: String,
}

impl ConnectionInfo {
  pub fn new(addr: SocketAddr, origin: String, referer: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      addr,
      origin,
      referer,
    }
  }
}

impl fmt::Display for ConnectionInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.addr, self.id)
  }
}

/// Awaits `future`, giving up after `limit` when there is one.
async fn within<F: Future>(limit: Option<Duration>, future: F) -> Result<F::Output, Duration> {
  match limit {
    Some(limit) => time::timeout(limit, future).await.map_err(|_| limit),
    None => Ok(future.await),
  }
}

fn header_value(request: &Request, name: HeaderName) -> String {
  let Some(value) = request.headers().get(&name) else {
    return String::new();
  };

  match value.to_str() {
    Ok(value) => value.to_string(),
    Err(_) => {
      debug!("Ignoring {name} header with non visible ASCII bytes: {value:?}");
      String::new()
    }
  }
}

/// Upgrades `raw_stream` to a WebSocket, keeping the `Origin` and `Referer` headers
/// of the upgrade request.
///
/// A peer that has not finished the handshake within `timeout` is dropped.
pub async fn accept_connection<S>(
  raw_stream: S,
  addr: SocketAddr,
  timeout: Option<Duration>,
) -> Result<(WebSocketStream<S>, ConnectionInfo), SessionError>
where
  S: AsyncRead + AsyncWrite + Unpin,
{
  let mut origin = String::new();
  let mut referer = String::new();

  let capture_headers = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
    origin = header_value(request, ORIGIN);
    referer = header_value(request, REFERER);
    Ok(response)
  };
  let handshake = tokio_tungstenite::accept_hdr_async(raw_stream, capture_headers);
  let ws_stream = within(timeout, handshake)
    .await
    .map_err(SessionError::HandshakeTimeout)??;

  Ok((ws_stream, ConnectionInfo::new(addr, origin, referer)))
}

/// Reads and handles frames until the client leaves or something fatal happens.
///
/// Returns `Ok(())` when the client closed the connection, and the fatal error otherwise.
/// Text frames are decoded and dispatched, binary frames are ignored.
///
pub async fn run_session<S>(
  ws_stream: &mut WebSocketStream<S>,
  connection: &ConnectionInfo,
  backend: &dyn BackendClient,
  read_timeout: Option<Duration>,
) -> Result<(), SessionError>
where
  S: AsyncRead + AsyncWrite + Unpin,
{
  loop {
    let next = within(read_timeout, ws_stream.next())
      .await
      .map_err(SessionError::ReadTimeout)?;

    let msg = match next {
      Some(msg) => msg?,
      None => return Ok(()),
    };

    match msg {
      Message::Text(text) => {
        debug!("Received message from {connection}: {text}");
        let command = Command::from_json(text)?;
        dispatch_command(command, connection, backend, ws_stream).await?;
      }
      Message::Binary(data) => {
        debug!("Ignoring binary frame of {} bytes from {connection}", data.len());
      }
      Message::Close(frame) => {
        debug!("Client {connection} sent close frame: {frame:?}");
        return Ok(());
      }
      // Pings are answered by tungstenite itself
      Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
    }
  }
}

/// This function is called when the session is over, whatever the reason.
///
/// A client that stopped reading cannot hold the connection past `timeout`.
async fn connection_cleanup<S>(
  mut ws_stream: WebSocketStream<S>,
  connection: &ConnectionInfo,
  timeout: Option<Duration>,
) where
  S: AsyncRead + AsyncWrite + Unpin,
{
  match within(timeout, ws_stream.close(None)).await {
    Ok(Ok(())) => {}
    Ok(Err(err)) => debug!("Close handshake with {connection} did not complete: {err}"),
    Err(limit) => debug!("Close handshake with {connection} timed out after {limit:?}"),
  }
  info!("Client {connection} disconnected");
}

/// Drives one client connection from handshake to release.
///
pub async fn handle_connection<S>(
  raw_stream: S,
  addr: SocketAddr,
  backend: Arc<dyn BackendClient>,
  timeout: Option<Duration>,
) where
  S: AsyncRead + AsyncWrite + Unpin,
{
  let (mut ws_stream, connection) = match accept_connection(raw_stream, addr, timeout).await {
    Ok(accepted) => accepted,
    Err(err) => {
      error!("Error during the websocket handshake with {addr}: {err}");
      return;
    }
  };
  info!(
    "New WebSocket connection {connection} established from URL: {}",
    connection.referer
  );

  match run_session(&mut ws_stream, &connection, backend.as_ref(), timeout).await {
    Ok(()) => debug!("Session {connection} ended by the client"),
    Err(err) => error!("Closing connection {connection}: {err}"),
  }

  connection_cleanup(ws_stream, &connection, timeout).await;
}
