use beacon_core::ServerMessage;

/// Instructions for the task that owns the write half of a peer's socket.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Send(ServerMessage),
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFrame {
    Text(String),
    Binary(Vec<u8>),
}
