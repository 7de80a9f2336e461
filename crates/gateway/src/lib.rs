pub mod backend;
pub mod config;
pub mod error;
pub mod receive_from_client;
pub mod send_to_client;
pub mod server;
pub mod session;
