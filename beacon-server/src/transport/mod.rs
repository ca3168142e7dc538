mod peer_sink;
mod transport_event;

pub use peer_sink::*;
pub use transport_event::*;
