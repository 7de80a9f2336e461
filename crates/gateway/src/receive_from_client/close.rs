use log::info;
use relay_gateway_protocol::client_to_gateway::close::ClientToGatewayClose;

use crate::session::ConnectionInfo;

/// The gateway keeps no subscriptions, so closing one is only logged.
/// No backend is called and nothing is sent back.
pub fn on_close_message(client_close: ClientToGatewayClose, connection: &ConnectionInfo) {
  info!(
    "Notice closing subscription {} of {}",
    client_close.subscription_id, connection
  );
}
