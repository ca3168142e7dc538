use crate::peer::Peer;
use crate::relay::RelayStats;
use crate::room::RoomRegistry;
use crate::transport::WireFrame;
use beacon_core::{Control, FrameError, InboundFrame, RelayRequest};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The peer asked to disconnect; its transport is already closing.
    Close,
}

/// Applies inbound frames of one peer to the registry.
///
/// Undecodable frames and relays to unknown peers are dropped without
/// telling the sender; both are logged and counted.
pub struct Dispatcher<'a> {
    registry: &'a RoomRegistry,
    stats: &'a RelayStats,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a RoomRegistry, stats: &'a RelayStats) -> Self {
        Self { registry, stats }
    }

    pub fn handle(&self, peer: &mut Peer, frame: WireFrame) -> Flow {
        let decoded = match &frame {
            WireFrame::Text(text) => InboundFrame::parse(text),
            WireFrame::Binary(data) => InboundFrame::from_bytes(data),
        };

        match decoded {
            Ok(inbound) => self.apply(peer, inbound),
            Err(e) => {
                self.drop_malformed(peer, e);
                Flow::Continue
            }
        }
    }

    pub fn apply(&self, peer: &mut Peer, frame: InboundFrame) -> Flow {
        let mut flow = Flow::Continue;

        match frame.control {
            Some(Control::Disconnect) => {
                self.registry.leave(peer, true);
                flow = Flow::Close;
            }
            Some(Control::Pong) => peer.touch(),
            Some(Control::ChangeRoom { room_state }) => {
                self.registry.change_room(peer, room_state);
            }
            None => {}
        }

        if let Some(request) = frame.relay {
            self.forward(peer, request);
        }

        flow
    }

    fn forward(&self, sender: &Peer, request: RelayRequest) {
        let Some(target) = self.registry.recipient(sender.room_key(), &request.to) else {
            self.stats.record_undeliverable();
            debug!(
                "Dropping relay from {:?} to {:?}: not in room {:?}",
                sender.id,
                request.to,
                sender.room_key()
            );
            return;
        };

        trace!("Relaying {:?} -> {:?}", sender.id, request.to);
        self.stats.record_relayed();
        target.send(request.into_message(&sender.id));
    }

    fn drop_malformed(&self, peer: &Peer, error: FrameError) {
        self.stats.record_malformed();
        debug!("Dropping malformed frame from {:?}: {}", peer.id, error);
    }
}
