use beacon_core::{GLOBAL_ROOM_NAME, PeerId};
use beacon_server::{Handshake, Identity, NameResolver, UserAgentNames};
use serde_json::json;

use crate::integration::{global_relay, init_tracing, local_relay};
use crate::utils::TestPeer;

const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[tokio::test]
async fn test_greeting_sequence_in_local_mode() {
    init_tracing();
    let service = local_relay();

    let mut peer = TestPeer::connect_with(
        &service,
        Handshake {
            identity: Identity {
                peer_id: PeerId::from("alice"),
                minted: false,
            },
            remote_ip: "192.0.2.44".into(),
            rtc_supported: true,
            user_agent: Some(FIREFOX.into()),
        },
    );

    let expected = UserAgentNames.resolve(&PeerId::from("alice"), Some(FIREFOX));
    assert_eq!(
        peer.expect("display-name").await.unwrap(),
        json!({
            "type": "display-name",
            "message": {
                "displayName": expected.display_name,
                "deviceName": "Linux Firefox",
            },
        })
    );
    assert_eq!(
        peer.expect("peers").await.unwrap(),
        json!({ "type": "peers", "peers": [] })
    );
    assert_eq!(
        peer.expect("room").await.unwrap(),
        json!({
            "type": "room",
            "message": { "room": GLOBAL_ROOM_NAME, "useLocalRoom": true },
        })
    );

    assert_eq!(service.registry().members("192.0.2.44"), vec![peer.id.clone()]);
    assert!(!service.registry().contains_room(GLOBAL_ROOM_NAME));
    assert_eq!(service.snapshot().connections, 1);
}

#[tokio::test]
async fn test_global_mode_starts_in_shared_room() {
    init_tracing();
    let service = global_relay();

    let (_a, _) = TestPeer::join(&service, "a", "198.51.100.1").await.unwrap();
    let mut b = TestPeer::connect(&service, "b", "203.0.113.7");

    b.expect("display-name").await.unwrap();
    let peers = b.expect("peers").await.unwrap();
    assert_eq!(peers["peers"][0]["id"], "a");
    assert_eq!(peers["peers"][0]["rtcSupported"], true);
    assert_eq!(
        b.expect("room").await.unwrap()["message"],
        json!({ "room": GLOBAL_ROOM_NAME, "useLocalRoom": false })
    );
}

#[tokio::test(start_paused = true)]
async fn test_first_ping_follows_greeting() {
    init_tracing();
    let service = local_relay();
    let mut peer = TestPeer::connect(&service, "a", "192.0.2.1");

    let mut types = Vec::new();
    for _ in 0..4 {
        let beacon_server::TransportEvent::Send(msg) = peer.next_event().await.unwrap() else {
            panic!("transport closed during greeting");
        };
        types.push(serde_json::to_value(&msg).unwrap()["type"].clone());
    }

    assert_eq!(types, vec![json!("display-name"), json!("peers"), json!("room"), json!("ping")]);
}
