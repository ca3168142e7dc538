use crate::liveness::{Heartbeat, Pulse};
use crate::peer::Peer;
use crate::relay::{Dispatcher, Flow};
use crate::signaling::{Handshake, RelayService};
use crate::transport::{PeerSink, WireFrame};
use beacon_core::ServerEvent;
use futures::{Stream, StreamExt};
use tokio::time::Instant;
use tracing::info;

/// Drive one connection from handshake to teardown.
///
/// The session owns the peer and its liveness timer, so frames and ticks of
/// one peer are handled strictly in sequence. Returning drops the timer;
/// by then the peer is out of its room and its transport has been told to
/// close.
pub async fn run_session<S>(service: &RelayService, handshake: Handshake, sink: PeerSink, mut frames: S)
where
    S: Stream<Item = WireFrame> + Unpin,
{
    let Handshake {
        identity,
        remote_ip,
        rtc_supported,
        user_agent,
    } = handshake;

    let mut peer = Peer::new(identity.peer_id, remote_ip, sink);
    peer.rtc_supported = rtc_supported;
    peer.name = service.names().resolve(&peer.id, user_agent.as_deref());
    peer.use_local_room = !service.config().use_global_room_by_default;

    let registry = service.registry();
    let stats = service.stats();
    stats.record_connection();
    info!("{} connected", peer);

    let dispatcher = Dispatcher::new(registry, stats);
    let mut heartbeat = Heartbeat::new(service.config().heartbeat_interval);

    peer.send(ServerEvent::DisplayName {
        message: peer.display_name(),
    });
    registry.join(&peer);
    peer.send(ServerEvent::Room {
        message: peer.room_state(),
    });

    loop {
        tokio::select! {
            frame = frames.next() => match frame {
                Some(frame) => {
                    if dispatcher.handle(&mut peer, frame) == Flow::Close {
                        break;
                    }
                }
                None => {
                    registry.leave(&peer, true);
                    break;
                }
            },
            _ = heartbeat.tick() => match heartbeat.check(peer.last_beat, Instant::now()) {
                Pulse::Ping => peer.send(ServerEvent::Ping),
                Pulse::Expired => {
                    stats.record_eviction();
                    info!("{} missed its heartbeats, evicting", peer);
                    registry.leave(&peer, true);
                    break;
                }
            },
        }
    }

    peer.sink().close();
    info!("{} disconnected", peer);
}
