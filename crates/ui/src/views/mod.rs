mod fatal;
mod host;
mod notices;
mod practice;
mod quiz;
mod shortcuts;
mod state;
mod study;

pub use fatal::FatalView;
pub use host::{SessionHost, StudyHandle};
pub use notices::NoticeStack;
pub use practice::PracticePanel;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study::StudyView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
