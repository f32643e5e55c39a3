//! Free-text answer checking for practice mode.

use thiserror::Error;

use crate::model::{Lesson, LessonId};

/// Sentence punctuation ignored when comparing answers (Latin and CJK).
pub const IGNORED_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '。', '，', '！', '？', '、', '；', '：',
];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PracticeError {
    #[error("please enter an answer")]
    EmptyAnswer,
}

/// What the user is asked to reproduce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PracticeMode {
    #[default]
    Pinyin,
    Chinese,
}

impl PracticeMode {
    #[must_use]
    pub fn expected<'a>(self, lesson: &'a Lesson) -> &'a str {
        match self {
            Self::Pinyin => lesson.pinyin(),
            Self::Chinese => lesson.chinese(),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pinyin => "Pinyin",
            Self::Chinese => "Chinese",
        }
    }
}

/// Lowercase, drop ignored punctuation, collapse whitespace runs and trim.
///
/// Tone marks are kept: `"wǒ"` and `"wo"` stay different.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| !IGNORED_PUNCTUATION.contains(ch))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    /// `given` is the text exactly as typed.
    Incorrect { given: String, expected: String },
    /// The answer was shown, not typed.
    Revealed { expected: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Correct(LessonId),
    Incorrect,
}

/// Transient quiz state for the current lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeState {
    mode: PracticeMode,
    input: String,
    feedback: Option<Feedback>,
    can_check: bool,
    can_advance: bool,
}

impl Default for PracticeState {
    fn default() -> Self {
        Self::new(PracticeMode::default())
    }
}

impl PracticeState {
    #[must_use]
    pub fn new(mode: PracticeMode) -> Self {
        Self {
            mode,
            input: String::new(),
            feedback: None,
            can_check: true,
            can_advance: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn can_check(&self) -> bool {
        self.can_check
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.can_advance
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Compare the current input against the lesson.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::EmptyAnswer` for blank input; nothing changes.
    pub fn check(&mut self, lesson: &Lesson) -> Result<CheckOutcome, PracticeError> {
        if self.input.trim().is_empty() {
            return Err(PracticeError::EmptyAnswer);
        }
        let expected = self.mode.expected(lesson);
        if answers_match(&self.input, expected) {
            self.feedback = Some(Feedback::Correct);
            self.can_check = false;
            self.can_advance = true;
            Ok(CheckOutcome::Correct(lesson.id()))
        } else {
            self.feedback = Some(Feedback::Incorrect {
                given: self.input.clone(),
                expected: expected.to_string(),
            });
            Ok(CheckOutcome::Incorrect)
        }
    }

    pub fn reveal(&mut self, lesson: &Lesson) {
        let expected = self.mode.expected(lesson).to_string();
        self.input.clone_from(&expected);
        self.feedback = Some(Feedback::Revealed { expected });
        self.can_check = false;
        self.can_advance = true;
    }

    pub fn switch_mode(&mut self, mode: PracticeMode) {
        *self = Self::new(mode);
    }

    /// Clears everything but the mode.
    pub fn reset(&mut self) {
        self.switch_mode(self.mode);
    }
}
