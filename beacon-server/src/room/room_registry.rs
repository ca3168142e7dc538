use crate::peer::Peer;
use crate::room::{Member, Room};
use crate::transport::PeerSink;
use beacon_core::{PeerId, RoomState, ServerEvent};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info, warn};

/// All live rooms, keyed by effective room key.
///
/// Every operation holds the map shard of the room it touches for its whole
/// duration, so operations on one room never interleave. Rooms exist only
/// while they have members.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `peer` to the room its state points at.
    ///
    /// Existing members hear about the newcomer before the newcomer receives
    /// the list of existing members, and the list never includes the
    /// newcomer itself.
    pub fn join(&self, peer: &Peer) {
        let key = peer.room_key();
        let mut room = self.rooms.entry(key.to_owned()).or_insert_with(|| {
            info!("Creating room {:?}", key);
            Room::default()
        });

        if let Some(stale) = room.remove(&peer.id) {
            if !stale.sink.same_connection(peer.sink()) {
                warn!(
                    "Peer {:?} replaces an older connection in room {:?}",
                    peer.id, key
                );
            }
        }

        let info = peer.info();
        room.broadcast(ServerEvent::PeerJoined { peer: info.clone() });
        peer.send(ServerEvent::Peers {
            peers: room.infos(),
        });
        room.insert(Member {
            info,
            sink: peer.sink().clone(),
        });

        debug!("{} joined room {:?} ({} members)", peer, key, room.len());
    }

    /// Remove `peer` from its room. Returns `false` without side effects
    /// when the peer's connection is not a member of that room.
    pub fn leave(&self, peer: &Peer, terminate: bool) -> bool {
        let key = peer.room_key();
        let Entry::Occupied(mut entry) = self.rooms.entry(key.to_owned()) else {
            return false;
        };

        if !entry.get().holds(&peer.id, peer.sink()) {
            return false;
        }

        if terminate {
            peer.sink().close();
        }

        entry.get_mut().remove(&peer.id);

        if entry.get().is_empty() {
            entry.remove();
            info!("Room {:?} is empty, removing", key);
        } else {
            entry.get().broadcast(ServerEvent::PeerLeft {
                peer_id: peer.id.clone(),
            });
            debug!("{} left room {:?}", peer, key);
        }

        true
    }

    /// Move `peer` to the room described by `state` and tell it where it
    /// ended up. Moving into the same room still runs the full leave/join
    /// sequence.
    pub fn change_room(&self, peer: &mut Peer, state: RoomState) {
        self.leave(peer, false);
        peer.set_room(state);
        self.join(peer);

        peer.send(ServerEvent::Room {
            message: peer.room_state(),
        });
    }

    pub fn recipient(&self, room_key: &str, peer_id: &PeerId) -> Option<PeerSink> {
        self.rooms
            .get(room_key)?
            .get(peer_id)
            .map(|member| member.sink.clone())
    }

    pub fn contains_room(&self, room_key: &str) -> bool {
        self.rooms.contains_key(room_key)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn members(&self, room_key: &str) -> Vec<PeerId> {
        self.rooms
            .get(room_key)
            .map(|room| room.peer_ids())
            .unwrap_or_default()
    }
}
