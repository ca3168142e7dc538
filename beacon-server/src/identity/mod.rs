mod peer_identity;

pub use peer_identity::*;
