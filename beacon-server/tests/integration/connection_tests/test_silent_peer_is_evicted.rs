use beacon_server::{RelayConfig, RelayService, TransportEvent};
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

use crate::integration::init_tracing;
use crate::utils::TestPeer;

const T: Duration = Duration::from_secs(30);

fn relay() -> RelayService {
    RelayService::new(RelayConfig {
        use_global_room_by_default: true,
        heartbeat_interval: T,
        ..RelayConfig::default()
    })
}

#[tokio::test(start_paused = true)]
async fn test_silent_peer_is_evicted_after_two_periods() {
    init_tracing();
    let service = relay();
    let start = Instant::now();

    let (mut alive, _) = TestPeer::join(&service, "alive", "192.0.2.1").await.unwrap();
    let (mut silent, _) = TestPeer::join(&service, "silent", "192.0.2.2").await.unwrap();

    // Answer every ping for `alive` until the silent peer is reported gone.
    let left = loop {
        match alive.next_event_within(T * 4).await.unwrap() {
            TransportEvent::Send(msg) => {
                let value = serde_json::to_value(&msg).unwrap();
                match value["type"].as_str() {
                    Some("ping") => alive.send(json!({ "type": "pong" })),
                    Some("peer-joined") => {}
                    _ => break value,
                }
            }
            TransportEvent::Close => panic!("responsive peer was closed"),
        }
    };

    assert_eq!(left, json!({ "type": "peer-left", "peerId": "silent" }));
    let elapsed = Instant::now() - start;
    assert!(elapsed > T * 2, "evicted too early: {elapsed:?}");
    assert!(elapsed <= T * 3, "evicted too late: {elapsed:?}");

    silent.expect_closed().await.unwrap();
    silent.finished().await.unwrap();

    assert_eq!(service.registry().members("__GLOBAL_ROOM__"), vec![alive.id.clone()]);
    assert_eq!(service.snapshot().evictions, 1);
}

#[tokio::test(start_paused = true)]
async fn test_unsolicited_pongs_keep_peer_alive() {
    init_tracing();
    let service = relay();
    let (peer, _) = TestPeer::join(&service, "chatty", "192.0.2.3").await.unwrap();

    for _ in 0..10 {
        peer.send(json!({ "type": "pong" }));
        tokio::time::sleep(Duration::from_secs(20)).await;
    }

    assert_eq!(service.registry().members("__GLOBAL_ROOM__"), vec![peer.id.clone()]);
    assert_eq!(service.snapshot().evictions, 0);
}
