// Application layer - Interactive session

pub mod banner;
pub mod session;

// Re-export session types
pub use session::{Session, SessionOptions, SessionOutcome, ToolSource, USAGE_MESSAGE};
