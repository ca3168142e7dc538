use serde_json::json;

use crate::integration::{init_tracing, local_relay};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_change_room_moves_peer_and_notifies_both_rooms() {
    init_tracing();
    let service = local_relay();

    let (mut a, _) = TestPeer::join(&service, "a", "192.0.2.20").await.unwrap();
    let (mut b, _) = TestPeer::join(&service, "b", "192.0.2.20").await.unwrap();
    let (mut c, _) = TestPeer::join(&service, "c", "203.0.113.8").await.unwrap();
    a.expect("peer-joined").await.unwrap();

    c.send(json!({ "type": "changeRoom", "roomState": { "room": "party", "useLocalRoom": false } }));
    assert_eq!(c.expect("peers").await.unwrap()["peers"], json!([]));
    assert_eq!(
        c.expect("room").await.unwrap()["message"],
        json!({ "room": "party", "useLocalRoom": false })
    );
    assert!(!service.registry().contains_room("203.0.113.8"));

    a.send(json!({ "type": "changeRoom", "roomState": { "room": "party", "useLocalRoom": 0 } }));
    assert_eq!(b.expect("peer-left").await.unwrap()["peerId"], "a");
    let peers = a.expect("peers").await.unwrap();
    assert_eq!(peers["peers"][0]["id"], "c");
    assert_eq!(
        a.expect("room").await.unwrap()["message"],
        json!({ "room": "party", "useLocalRoom": false })
    );
    assert_eq!(c.expect("peer-joined").await.unwrap()["peer"]["id"], "a");

    // Relays only reach peers in the sender's current room.
    a.send(json!({ "type": "offer", "to": "b" }));
    a.send(json!({ "type": "offer", "to": "c" }));
    assert_eq!(c.next_message().await.unwrap()["sender"], "a");
    assert!(b.queued().is_empty());

    // Back to address grouping; the room name is kept but not used as key.
    c.send(json!({ "type": "changeRoom", "roomState": { "room": "party", "useLocalRoom": true } }));
    assert_eq!(a.expect("peer-left").await.unwrap()["peerId"], "c");
    assert_eq!(c.expect("peers").await.unwrap()["peers"], json!([]));
    assert_eq!(
        c.expect("room").await.unwrap()["message"],
        json!({ "room": "party", "useLocalRoom": true })
    );
    assert_eq!(service.registry().members("203.0.113.8"), vec![c.id.clone()]);
}

#[tokio::test]
async fn test_change_room_coerces_loose_values() {
    init_tracing();
    let service = local_relay();
    let (mut a, _) = TestPeer::join(&service, "a", "192.0.2.30").await.unwrap();

    a.send(json!({ "type": "changeRoom", "roomState": { "room": 42, "useLocalRoom": "" } }));
    a.expect("peers").await.unwrap();
    assert_eq!(
        a.expect("room").await.unwrap()["message"],
        json!({ "room": "42", "useLocalRoom": false })
    );
    assert_eq!(service.registry().members("42"), vec![a.id.clone()]);

    a.send(json!({ "type": "changeRoom", "roomState": {} }));
    a.expect("peers").await.unwrap();
    assert_eq!(
        a.expect("room").await.unwrap()["message"],
        json!({ "room": "undefined", "useLocalRoom": false })
    );

    a.send(json!({ "type": "changeRoom", "roomState": { "room": null } }));
    a.expect("peers").await.unwrap();
    assert_eq!(
        a.expect("room").await.unwrap()["message"],
        json!({ "room": "null", "useLocalRoom": false })
    );

    // Without a room state the frame is not a room change.
    a.send(json!({ "type": "changeRoom" }));
    a.send(json!({ "type": "changeRoom", "roomState": { "room": "last", "useLocalRoom": false } }));
    a.expect("peers").await.unwrap();
    assert_eq!(a.expect("room").await.unwrap()["message"]["room"], "last");
}
