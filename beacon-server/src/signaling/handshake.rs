use crate::identity::Identity;
use axum::http::{HeaderMap, Uri};
use axum_extra::headers::{HeaderMapExt, UserAgent};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Debug, Clone)]
pub struct Handshake {
    pub identity: Identity,
    pub remote_ip: String,
    pub rtc_supported: bool,
    pub user_agent: Option<String>,
}

impl Handshake {
    pub fn from_request(headers: &HeaderMap, uri: &Uri, remote: SocketAddr) -> Self {
        let rtc_supported = uri
            .path_and_query()
            .is_some_and(|pq| pq.as_str().contains("webrtc"));

        Self {
            identity: Identity::from_headers(headers),
            remote_ip: remote_ip(headers, remote.ip()),
            rtc_supported,
            user_agent: headers
                .typed_get::<UserAgent>()
                .map(|ua| ua.as_str().to_owned()),
        }
    }
}

/// First `X-Forwarded-For` hop when present, the socket address otherwise.
/// Loopback spellings collapse to `127.0.0.1` so local clients share a room.
fn remote_ip(headers: &HeaderMap, socket_ip: IpAddr) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());

    let ip = match forwarded {
        Some(hop) => hop.to_owned(),
        None => socket_ip.to_canonical().to_string(),
    };

    match ip.as_str() {
        "::1" | "::ffff:127.0.0.1" => Ipv4Addr::LOCALHOST.to_string(),
        _ => ip,
    }
}
