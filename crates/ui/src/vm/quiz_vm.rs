use drill_core::model::LessonStore;
use drill_core::quiz::{LIGHT_ACTIONS, QuizRound, ScoreBand};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestionVm {
    pub position_label: String,
    pub score_label: String,
    pub options: &'static [&'static str],
    pub last_result: Option<(bool, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub score_label: String,
    pub message: &'static str,
    pub class: &'static str,
}

#[must_use]
pub fn map_quiz_question(round: &QuizRound, store: &LessonStore) -> Option<QuizQuestionVm> {
    round.current(store)?;
    let last_result = round.last_answer().map(|answer| {
        if answer.correct {
            (true, "✓ Correct!".to_string())
        } else {
            (false, format!("✗ The answer was: {}", answer.expected))
        }
    });
    Some(QuizQuestionVm {
        position_label: format!("Question {} of {}", round.position() + 1, round.total()),
        score_label: format!("Score: {}", round.score()),
        options: &LIGHT_ACTIONS,
        last_result,
    })
}

#[must_use]
pub fn map_quiz_result(round: &QuizRound) -> Option<QuizResultVm> {
    if !round.is_finished() {
        return None;
    }
    let band = round.band();
    Some(QuizResultVm {
        score_label: format!(
            "{} / {} ({:.0}%)",
            round.score(),
            round.total(),
            round.score_percent()
        ),
        message: band.message(),
        class: match band {
            ScoreBand::Ready => "quiz-result quiz-result--ready",
            ScoreBand::Improving => "quiz-result quiz-result--improving",
            ScoreBand::KeepStudying => "quiz-result quiz-result--study",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::fallback_lessons;

    fn store() -> LessonStore {
        LessonStore::from_drafts(fallback_lessons()).unwrap()
    }

    #[test]
    fn question_labels_track_progress() {
        let store = store();
        let mut round = QuizRound::new(vec![2, 0, 1], store.len()).unwrap();
        let vm = map_quiz_question(&round, &store).unwrap();
        assert_eq!(vm.position_label, "Question 1 of 3");
        assert_eq!(vm.options.len(), 6);
        assert!(vm.last_result.is_none());

        round.submit(&store, "High beam").unwrap();
        let vm = map_quiz_question(&round, &store).unwrap();
        assert_eq!(vm.position_label, "Question 2 of 3");
        assert_eq!(
            vm.last_result,
            Some((false, "✗ The answer was: Turn off all lights".to_string()))
        );
        assert!(map_quiz_result(&round).is_none());
    }

    #[test]
    fn finished_round_maps_score_band() {
        let store = store();
        let mut round = QuizRound::new(vec![0, 1, 2], store.len()).unwrap();
        round.submit(&store, "Low beam").unwrap();
        round.submit(&store, "Low beam").unwrap();
        round.submit(&store, "High beam").unwrap();
        assert!(map_quiz_question(&round, &store).is_none());
        let result = map_quiz_result(&round).unwrap();
        assert_eq!(result.score_label, "2 / 3 (67%)");
        assert_eq!(result.message, ScoreBand::Improving.message());
    }
}
