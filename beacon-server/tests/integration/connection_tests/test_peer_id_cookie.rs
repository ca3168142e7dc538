use beacon_server::RelayConfig;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestRelay};

async fn greeted(client: &mut TestClient) {
    client.expect("display-name").await.unwrap();
    client.expect("peers").await.unwrap();
    client.expect("room").await.unwrap();
}

#[tokio::test]
async fn test_identity_is_minted_once_and_then_echoed() {
    init_tracing();
    let relay = TestRelay::start(RelayConfig::default()).await.unwrap();

    let mut watcher = TestClient::connect(relay.addr, "/server/webrtc", None)
        .await
        .unwrap();
    greeted(&mut watcher).await;

    let mut first = TestClient::connect(relay.addr, "/server/webrtc", None)
        .await
        .unwrap();
    let cookie = first.set_cookie.clone().expect("fresh client gets a cookie");
    assert!(cookie.ends_with("; SameSite=Strict; Secure"), "{cookie}");
    let id = first.minted_id().expect("cookie carries the peer id");
    greeted(&mut first).await;

    let joined = watcher.expect("peer-joined").await.unwrap();
    assert_eq!(joined["peer"]["id"], id.as_str());
    assert_eq!(joined["peer"]["rtcSupported"], true);

    first.close().await.unwrap();
    assert_eq!(watcher.expect("peer-left").await.unwrap()["peerId"], id.as_str());

    let mut returning = TestClient::connect(
        relay.addr,
        "/server/webrtc",
        Some(&format!("theme=dark; peerid={id}")),
    )
    .await
    .unwrap();
    assert_eq!(returning.set_cookie, None, "echoed identity is not re-issued");
    greeted(&mut returning).await;

    let rejoined = watcher.expect("peer-joined").await.unwrap();
    assert_eq!(rejoined["peer"]["id"], id.as_str());

    returning.close().await.unwrap();
    watcher.close().await.unwrap();
    relay.stop().await.unwrap();
}
