use crate::config::RelayConfig;
use crate::relay::{RelayStats, StatsSnapshot};
use crate::room::RoomRegistry;
use crate::signaling::{NameResolver, UserAgentNames, ws_handler};
use anyhow::Context;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

struct RelayInner {
    registry: RoomRegistry,
    stats: RelayStats,
    config: RelayConfig,
    names: Box<dyn NameResolver>,
}

#[derive(Clone)]
pub struct RelayService {
    inner: Arc<RelayInner>,
}

impl RelayService {
    pub fn new(config: RelayConfig) -> Self {
        Self::with_names(config, UserAgentNames)
    }

    pub fn with_names(config: RelayConfig, names: impl NameResolver) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                registry: RoomRegistry::new(),
                stats: RelayStats::default(),
                config,
                names: Box::new(names),
            }),
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.inner.registry
    }

    pub fn stats(&self) -> &RelayStats {
        &self.inner.stats
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn config(&self) -> &RelayConfig {
        &self.inner.config
    }

    pub fn names(&self) -> &dyn NameResolver {
        self.inner.names.as_ref()
    }

    /// Every path upgrades to the relay socket; the path itself only
    /// matters for WebRTC capability detection.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(ws_handler)
            .with_state(self.clone())
    }

    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().context("listener has no local address")?;
        info!("Relay listening on {}", addr);

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .context("relay server failed")
    }
}
