use crate::error::FrameError;
use crate::model::peer::{PeerId, PeerInfo};
use crate::model::room::RoomState;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    pub display_name: String,
    pub device_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    DisplayName {
        message: DisplayName,
    },
    Room {
        message: RoomState,
    },
    Peers {
        peers: Vec<PeerInfo>,
    },
    PeerJoined {
        peer: PeerInfo,
    },
    PeerLeft {
        #[serde(rename = "peerId")]
        peer_id: PeerId,
    },
    Ping,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ServerMessage {
    Event(ServerEvent),
    /// Application payload forwarded from another peer, `sender` already stamped.
    Relay(Map<String, Value>),
}

impl From<ServerEvent> for ServerMessage {
    fn from(event: ServerEvent) -> Self {
        Self::Event(event)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Control {
    Disconnect,
    Pong,
    ChangeRoom {
        #[serde(rename = "roomState")]
        room_state: RoomState,
    },
}

/// An application payload addressed to another peer. `payload` no longer
/// contains the `to` field.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayRequest {
    pub to: PeerId,
    pub payload: Map<String, Value>,
}

impl RelayRequest {
    pub fn into_message(self, sender: &PeerId) -> ServerMessage {
        let mut payload = self.payload;
        payload.insert("sender".to_owned(), Value::String(sender.to_string()));
        ServerMessage::Relay(payload)
    }
}

/// A decoded client frame. A frame may carry a control message, a relay
/// request, both, or neither (unknown `type` without `to`).
#[derive(Debug, Clone, PartialEq)]
pub struct InboundFrame {
    pub control: Option<Control>,
    pub relay: Option<RelayRequest>,
}

impl InboundFrame {
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(FrameError::NotAnObject),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        Self::parse(std::str::from_utf8(bytes)?)
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let control = Control::deserialize(&Value::Object(map.clone())).ok();

        let to = match map.get("to") {
            Some(Value::String(to)) if !to.is_empty() => Some(PeerId::from(to.as_str())),
            _ => None,
        };

        let relay = to.map(|to| {
            map.remove("to");
            RelayRequest { to, payload: map }
        });

        Self { control, relay }
    }
}
