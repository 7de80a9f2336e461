use std::{
  io::{Error as IoError, Result as IoResult},
  net::SocketAddr,
  sync::Arc,
  time::Duration,
};

use async_trait::async_trait;
use futures_util::{future, pin_mut};
use log::{error, info};
use tokio::{
  io::{AsyncRead, AsyncWrite},
  net::{TcpListener, TcpStream},
  time,
};

use crate::{
  backend::{BackendClient, BackendError, HttpBackend},
  config::{ConfigError, GatewayConfig},
  session::handle_connection,
};

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
  #[error(transparent)]
  Io(#[from] IoError),
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error(transparent)]
  Backend(#[from] BackendError),
}

const MIN_ACCEPT_BACKOFF: Duration = Duration::from_millis(5);
const MAX_ACCEPT_BACKOFF: Duration = Duration::from_secs(1);

/// Source of client connections.
#[async_trait]
pub trait Acceptor: Send {
  type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

  async fn accept_stream(&mut self) -> IoResult<(Self::Stream, SocketAddr)>;
}

#[async_trait]
impl Acceptor for TcpListener {
  type Stream = TcpStream;

  async fn accept_stream(&mut self) -> IoResult<(TcpStream, SocketAddr)> {
    self.accept().await
  }
}

/// Accepts connections forever, one task per client.
///
/// Sessions share nothing but the (immutable) backend client.
/// Accept errors (out of file descriptors, aborted handshakes) never stop the
/// listener: it waits a little longer after each consecutive failure and retries.
///
pub async fn serve<A: Acceptor>(
  mut acceptor: A,
  backend: Arc<dyn BackendClient>,
  client_timeout: Option<Duration>,
) {
  let mut backoff = MIN_ACCEPT_BACKOFF;

  loop {
    match acceptor.accept_stream().await {
      Ok((stream, addr)) => {
        backoff = MIN_ACCEPT_BACKOFF;
        let backend = Arc::clone(&backend);

        // Spawn the handler to run async
        tokio::spawn(handle_connection(stream, addr, backend, client_timeout));
      }
      Err(err) => {
        error!("Failed to accept connection: {err}; retrying in {backoff:?}");
        time::sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_ACCEPT_BACKOFF);
      }
    }
  }
}

#[tokio::main]
pub async fn initiate_gateway() -> Result<(), ServerError> {
  let config = GatewayConfig::from_env()?;
  let backend: Arc<dyn BackendClient> = Arc::new(HttpBackend::new(&config)?);
  info!(
    "Forwarding events to {} and subscriptions to {}",
    config.event_endpoint, config.query_endpoint
  );

  // Create the event loop and TCP listener we'll accept connections on.
  let listener = TcpListener::bind(&config.host).await?;
  info!("Listening on: {}", config.host);

  // Handle CTRL+C signal
  let ctrl_c_listener = async {
    if let Err(err) = tokio::signal::ctrl_c().await {
      error!("Unable to listen for the shutdown signal: {err}");
      // Without a signal handler, keep serving until the process is killed
      future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down");
  };

  // Spin up the server
  let server = serve(listener, backend, config.client_read_timeout);

  // Pinning the futures is necessary for using `select`
  pin_mut!(server, ctrl_c_listener);
  // Whichever returns first, will end the server
  future::select(server, ctrl_c_listener).await;

  Ok(())
}
