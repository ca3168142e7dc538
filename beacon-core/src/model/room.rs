use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Room key every peer starts with before it asks for a specific room.
pub const GLOBAL_ROOM_NAME: &str = "__GLOBAL_ROOM__";

/// Room selection carried by `changeRoom` requests and `room` events.
///
/// Decoding is lenient: `room` may be any JSON value and is turned into a
/// string, `useLocalRoom` follows JSON truthiness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "RawRoomState")]
pub struct RoomState {
    pub room: String,
    pub use_local_room: bool,
}

impl RoomState {
    pub fn global(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            use_local_room: false,
        }
    }

    pub fn local(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            use_local_room: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoomState {
    #[serde(default, deserialize_with = "present")]
    room: Option<Value>,
    #[serde(default)]
    use_local_room: Value,
}

impl From<RawRoomState> for RoomState {
    fn from(raw: RawRoomState) -> Self {
        let room = match raw.room {
            None => "undefined".to_owned(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };

        Self {
            room,
            use_local_room: is_truthy(&raw.use_local_room),
        }
    }
}

/// Keeps an explicit `null` apart from a missing field.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
