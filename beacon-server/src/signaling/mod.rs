mod handshake;
mod names;
mod relay_service;
mod session;
mod ws_handler;

pub use handshake::*;
pub use names::*;
pub use relay_service::*;
pub use session::*;
pub use ws_handler::*;
