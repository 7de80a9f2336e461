//! The `gateway -> client` communications.
//!
//!  - `[<event_type>, <subscription_id>, <item>]`: one result of a subscription query.
//!
//!  - `["EOSE", <subscription_id>]`: End Of Stored Events. Always the last frame
//!       written for one `REQ`.
//!
// Internal `gateway_to_client` modules
pub mod eose;
pub mod result;

pub const EOSE: &str = "EOSE";
