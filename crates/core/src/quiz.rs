//! Test mode: listen to each command and pick the required light action.

use thiserror::Error;

use crate::model::{Lesson, LessonStore};

/// Answer options offered for every question.
pub const LIGHT_ACTIONS: [&str; 6] = [
    "Low beam",
    "High beam",
    "Alternating beams",
    "Turn signals + beams",
    "Width + alarm lights",
    "Turn off all lights",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz order must be a permutation of 0..{len}")]
    InvalidOrder { len: usize },

    #[error("quiz already finished")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 80% or more.
    Ready,
    /// 60% or more.
    Improving,
    KeepStudying,
}

impl ScoreBand {
    #[must_use]
    pub fn from_percent(percent: f32) -> Self {
        if percent >= 80.0 {
            Self::Ready
        } else if percent >= 60.0 {
            Self::Improving
        } else {
            Self::KeepStudying
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Ready => "Excellent! You're ready for the driving test!",
            Self::Improving => "Good job! Keep practicing to improve your score.",
            Self::KeepStudying => "Keep studying! Practice more to master these commands.",
        }
    }
}

/// `true` when the chosen option appears in the lesson's english text.
#[must_use]
pub fn option_matches(option: &str, lesson: &Lesson) -> bool {
    let option = option.trim().to_lowercase();
    !option.is_empty() && lesson.english().to_lowercase().contains(&option)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAnswer {
    pub question: usize,
    pub chosen: String,
    pub correct: bool,
    pub expected: String,
}

/// One pass over every lesson in a fixed (usually shuffled) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    order: Vec<usize>,
    position: usize,
    score: usize,
    last_answer: Option<QuizAnswer>,
}

impl QuizRound {
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOrder` unless `order` is a permutation of
    /// `0..len`.
    pub fn new(order: Vec<usize>, len: usize) -> Result<Self, QuizError> {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        if sorted.len() != len || sorted.iter().enumerate().any(|(i, v)| i != *v) {
            return Err(QuizError::InvalidOrder { len });
        }
        Ok(Self {
            order,
            position: 0,
            score: 0,
            last_answer: None,
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Zero-based question number.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position >= self.order.len()
    }

    #[must_use]
    pub fn last_answer(&self) -> Option<&QuizAnswer> {
        self.last_answer.as_ref()
    }

    #[must_use]
    pub fn current<'a>(&self, store: &'a LessonStore) -> Option<&'a Lesson> {
        self.order
            .get(self.position)
            .and_then(|index| store.get(*index))
    }

    /// Grades `option` against the current question and moves on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once every question was answered.
    pub fn submit(&mut self, store: &LessonStore, option: &str) -> Result<bool, QuizError> {
        let lesson = self.current(store).ok_or(QuizError::Finished)?;
        let correct = option_matches(option, lesson);
        if correct {
            self.score += 1;
        }
        self.last_answer = Some(QuizAnswer {
            question: self.position,
            chosen: option.to_string(),
            correct,
            expected: lesson.english().to_string(),
        });
        self.position += 1;
        Ok(correct)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_percent(&self) -> f32 {
        if self.order.is_empty() {
            return 0.0;
        }
        self.score as f32 / self.order.len() as f32 * 100.0
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percent(self.score_percent())
    }
}
