mod intent;
mod service;

// Public API of the study session subsystem.
pub use intent::{SessionEffect, SessionIntent, ViewMode};
pub use service::StudySession;
