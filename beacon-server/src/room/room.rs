use crate::transport::PeerSink;
use beacon_core::{PeerId, PeerInfo, ServerMessage};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Member {
    pub info: PeerInfo,
    pub sink: PeerSink,
}

#[derive(Debug, Default)]
pub struct Room {
    members: HashMap<PeerId, Member>,
}

impl Room {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, peer_id: &PeerId) -> Option<&Member> {
        self.members.get(peer_id)
    }

    /// Whether `peer_id` is a member through the connection behind `sink`.
    pub fn holds(&self, peer_id: &PeerId, sink: &PeerSink) -> bool {
        self.members
            .get(peer_id)
            .is_some_and(|member| member.sink.same_connection(sink))
    }

    pub fn insert(&mut self, member: Member) -> Option<Member> {
        self.members.insert(member.info.id.clone(), member)
    }

    pub fn remove(&mut self, peer_id: &PeerId) -> Option<Member> {
        self.members.remove(peer_id)
    }

    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.members.keys().cloned().collect()
    }

    pub fn infos(&self) -> Vec<PeerInfo> {
        self.members.values().map(|m| m.info.clone()).collect()
    }

    pub fn broadcast(&self, msg: impl Into<ServerMessage>) {
        let msg = msg.into();
        for member in self.members.values() {
            member.sink.send(msg.clone());
        }
    }
}
