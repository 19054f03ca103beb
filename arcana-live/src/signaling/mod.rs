mod channel;
mod rest_client;
mod ws_connector;

pub use channel::*;
pub use rest_client::*;
pub use ws_connector::*;
