mod lesson_vm;
mod practice_vm;
mod quiz_vm;

pub use lesson_vm::{LessonCardVm, PlayButtonVm, map_lesson_card, play_button};
pub use practice_vm::{FeedbackVm, PracticeVm, map_practice};
pub use quiz_vm::{QuizQuestionVm, QuizResultVm, map_quiz_question, map_quiz_result};
