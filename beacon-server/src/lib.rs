mod config;
mod identity;
mod liveness;
mod peer;
mod relay;
mod room;
mod signaling;
mod transport;

pub use config::*;
pub use identity::*;
pub use liveness::*;
pub use peer::*;
pub use relay::*;
pub use room::*;
pub use signaling::*;
pub use transport::*;
