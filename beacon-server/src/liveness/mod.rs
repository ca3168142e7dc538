mod heartbeat;

pub use heartbeat::*;
