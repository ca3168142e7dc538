mod error;
pub mod model;

pub use error::FrameError;
pub use model::*;
