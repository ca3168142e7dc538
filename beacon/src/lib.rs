pub use beacon_core::model::{PeerId, RoomState};

pub mod model {
    pub use beacon_core::model::*;
    pub use beacon_core::FrameError;
}

#[cfg(feature = "server")]
pub mod server {
    pub use beacon_server::*;
}
