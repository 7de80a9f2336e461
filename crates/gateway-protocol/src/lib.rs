pub mod client_to_gateway;
pub mod error;
pub mod gateway_to_client;

pub use error::Error;

/// Open-ended JSON object, used for events and filters.
/// The gateway never inspects its keys.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
