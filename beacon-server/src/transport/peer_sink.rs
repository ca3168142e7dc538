use crate::transport::TransportEvent;
use beacon_core::ServerMessage;
use tokio::sync::mpsc;
use tracing::trace;

/// Outbound handle of one connection.
///
/// Sending never blocks and never fails loudly: once the socket is gone the
/// events are discarded and the liveness check eventually reaps the peer.
#[derive(Debug, Clone)]
pub struct PeerSink {
    tx: mpsc::UnboundedSender<TransportEvent>,
}

impl PeerSink {
    pub fn new(tx: mpsc::UnboundedSender<TransportEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn send(&self, msg: impl Into<ServerMessage>) {
        if self.tx.send(TransportEvent::Send(msg.into())).is_err() {
            trace!("Dropping message for a closed transport");
        }
    }

    pub fn close(&self) {
        let _ = self.tx.send(TransportEvent::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn same_connection(&self, other: &PeerSink) -> bool {
        self.tx.same_channel(&other.tx)
    }
}
