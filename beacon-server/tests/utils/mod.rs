
pub use test_client::*;
pub use test_peer::*;
pub use test_relay::*;
