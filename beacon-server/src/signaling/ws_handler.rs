use crate::signaling::{Handshake, RelayService, run_session};
use crate::transport::{PeerSink, TransportEvent, WireFrame};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{ConnectInfo, State, WebSocketUpgrade};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, Uri};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt, future};
use std::net::SocketAddr;
use tracing::{debug, error, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    uri: Uri,
    headers: HeaderMap,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    let handshake = Handshake::from_request(&headers, &uri, remote);
    let cookie = handshake.identity.set_cookie();

    let mut response = ws
        .on_upgrade(move |socket| handle_socket(socket, handshake, service))
        .into_response();

    if let Some(cookie) = cookie {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

async fn handle_socket(socket: WebSocket, handshake: Handshake, service: RelayService) {
    let (mut sender, receiver) = socket.split();
    let (sink, mut rx) = PeerSink::channel();

    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                TransportEvent::Send(msg) => {
                    let json = match serde_json::to_string(&msg) {
                        Ok(json) => json,
                        Err(e) => {
                            error!("Failed to serialize outbound message: {}", e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                TransportEvent::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    let frames = receiver
        .inspect(|msg| {
            if let Err(e) = msg {
                warn!("WebSocket receive error: {}", e);
            }
        })
        .take_while(|msg| future::ready(matches!(msg, Ok(m) if !matches!(m, Message::Close(_)))))
        .filter_map(|msg| {
            future::ready(match msg {
                Ok(Message::Text(text)) => Some(WireFrame::Text(text.as_str().to_owned())),
                Ok(Message::Binary(data)) => Some(WireFrame::Binary(data.to_vec())),
                _ => None,
            })
        });
    let frames = std::pin::pin!(frames);

    run_session(&service, handshake, sink, frames).await;

    if let Err(e) = send_task.await {
        debug!("Send task ended abnormally: {}", e);
    }
}
