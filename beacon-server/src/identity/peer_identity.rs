use axum::http::{HeaderMap, HeaderValue};
use axum_extra::headers::{Cookie, HeaderMapExt};
use beacon_core::PeerId;

/// Cookie carrying a peer's identity across reconnects.
pub const PEER_ID_COOKIE: &str = "peerid";

/// Identity of a connecting peer and whether it was minted for this handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub peer_id: PeerId,
    pub minted: bool,
}

impl Identity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let echoed = headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(PEER_ID_COOKIE).map(str::to_owned))
            .filter(|id| !id.is_empty());

        match echoed {
            Some(id) => Self {
                peer_id: PeerId::from(id),
                minted: false,
            },
            None => Self {
                peer_id: PeerId::new(),
                minted: true,
            },
        }
    }

    /// `Set-Cookie` value for the upgrade response. Only minted identities
    /// need one; echoed identities are already stored by the client.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.minted {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{PEER_ID_COOKIE}={}; SameSite=Strict; Secure",
            self.peer_id
        ))
        .ok()
    }
}
