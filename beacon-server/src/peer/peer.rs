use crate::transport::PeerSink;
use beacon_core::{DisplayName, GLOBAL_ROOM_NAME, PeerId, PeerInfo, PeerName, RoomState, ServerMessage};
use std::fmt;
use tokio::time::Instant;

/// State of one connected client.
///
/// Owned by the connection's session task; the registry only ever sees the
/// peer's public [`PeerInfo`] and a clone of its [`PeerSink`].
#[derive(Debug)]
pub struct Peer {
    pub id: PeerId,
    /// Remote address, already resolved through proxies.
    pub ip: String,
    pub rtc_supported: bool,
    pub name: PeerName,
    pub room: String,
    pub use_local_room: bool,
    pub last_beat: Instant,
    sink: PeerSink,
}

impl Peer {
    pub fn new(id: PeerId, ip: impl Into<String>, sink: PeerSink) -> Self {
        Self {
            id,
            ip: ip.into(),
            rtc_supported: false,
            name: PeerName::default(),
            room: GLOBAL_ROOM_NAME.to_owned(),
            use_local_room: false,
            last_beat: Instant::now(),
            sink,
        }
    }

    /// Key of the room this peer is grouped into. Local mode groups by
    /// address, global mode by the requested room name.
    pub fn room_key(&self) -> &str {
        if self.use_local_room {
            &self.ip
        } else {
            &self.room
        }
    }

    pub fn room_state(&self) -> RoomState {
        RoomState {
            room: self.room.clone(),
            use_local_room: self.use_local_room,
        }
    }

    pub fn set_room(&mut self, state: RoomState) {
        self.room = state.room;
        self.use_local_room = state.use_local_room;
    }

    pub fn info(&self) -> PeerInfo {
        PeerInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            rtc_supported: self.rtc_supported,
        }
    }

    pub fn display_name(&self) -> DisplayName {
        DisplayName {
            display_name: self.name.display_name.clone(),
            device_name: self.name.device_name.clone(),
        }
    }

    pub fn touch(&mut self) {
        self.last_beat = Instant::now();
    }

    pub fn send(&self, msg: impl Into<ServerMessage>) {
        self.sink.send(msg);
    }

    pub fn sink(&self) -> &PeerSink {
        &self.sink
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Peer id={} ip={} rtcSupported={}>",
            self.id, self.ip, self.rtc_supported
        )
    }
}
