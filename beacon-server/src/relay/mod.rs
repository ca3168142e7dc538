mod dispatcher;
mod stats;

pub use dispatcher::*;
pub use stats::*;
