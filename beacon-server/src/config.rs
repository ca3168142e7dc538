use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    /// New connections start in global mode instead of grouping by address.
    pub use_global_room_by_default: bool,
    /// Ping period. A peer silent for more than two periods is evicted.
    pub heartbeat_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            use_global_room_by_default: false,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }
}
