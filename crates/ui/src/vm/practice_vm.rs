use drill_core::practice::{Feedback, PracticeMode};
use services::StudySession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub class: &'static str,
    pub title: &'static str,
    pub given: Option<String>,
    pub expected: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    pub mode: PracticeMode,
    pub prompt: String,
    pub hint: String,
    pub input: String,
    pub placeholder: String,
    pub feedback: Option<FeedbackVm>,
    pub can_check: bool,
    pub can_advance: bool,
}

fn map_feedback(feedback: &Feedback) -> FeedbackVm {
    match feedback {
        Feedback::Correct => FeedbackVm {
            class: "feedback feedback--correct",
            title: "✓ Correct!",
            given: None,
            expected: None,
        },
        Feedback::Incorrect { given, expected } => FeedbackVm {
            class: "feedback feedback--incorrect",
            title: "✗ Not quite",
            given: Some(given.clone()),
            expected: Some(expected.clone()),
        },
        Feedback::Revealed { expected } => FeedbackVm {
            class: "feedback feedback--revealed",
            title: "Answer",
            given: None,
            expected: Some(expected.clone()),
        },
    }
}

#[must_use]
pub fn map_practice(session: &StudySession) -> Option<PracticeVm> {
    let lesson = session.current_lesson()?;
    let practice = session.practice();
    let mode = practice.mode();
    Some(PracticeVm {
        mode,
        prompt: lesson.english().to_string(),
        hint: lesson.literal().to_string(),
        input: practice.input().to_string(),
        placeholder: format!("Type the {}…", mode.label()),
        feedback: practice.feedback().map(map_feedback),
        can_check: practice.can_check(),
        can_advance: practice.can_advance(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{AudioRoot, LessonStore};
    use drill_core::time::fixed_clock;
    use services::{SessionIntent, fallback_lessons};

    fn session() -> StudySession {
        let mut session = StudySession::new(
            LessonStore::from_drafts(fallback_lessons()).unwrap(),
            AudioRoot::parse("audio").unwrap(),
            fixed_clock(),
        );
        session.dispatch(SessionIntent::EnterPractice);
        session
    }

    #[test]
    fn incorrect_answer_shows_both_sides() {
        let mut session = session();
        session.dispatch(SessionIntent::EditAnswer("qing dakai".into()));
        session.dispatch(SessionIntent::CheckAnswer);
        let vm = map_practice(&session).unwrap();
        let feedback = vm.feedback.unwrap();
        assert_eq!(feedback.given.as_deref(), Some("qing dakai"));
        assert_eq!(feedback.expected.as_deref(), Some("Qǐng dǎkāi qiánzhàodēng"));
        assert!(vm.can_check);
        assert!(!vm.can_advance);
    }

    #[test]
    fn chinese_mode_changes_placeholder() {
        let mut session = session();
        session.dispatch(SessionIntent::SetPracticeMode(PracticeMode::Chinese));
        let vm = map_practice(&session).unwrap();
        assert_eq!(vm.placeholder, "Type the Chinese…");
        assert_eq!(vm.prompt, "Low beam");
        assert!(vm.feedback.is_none());
    }
}
