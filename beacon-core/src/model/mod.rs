mod peer;
mod room;
mod signaling;

pub use peer::{PeerId, PeerInfo, PeerName};
pub use room::{GLOBAL_ROOM_NAME, RoomState};
pub use signaling::{Control, DisplayName, InboundFrame, RelayRequest, ServerEvent, ServerMessage};
