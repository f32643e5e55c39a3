use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LessonId;
use crate::model::media::{AudioPath, MediaValidationError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson id must be a positive integer")]
    InvalidId,

    #[error("lesson {0}: chinese text cannot be empty")]
    EmptyChinese(LessonId),

    #[error("lesson {0}: pinyin cannot be empty")]
    EmptyPinyin(LessonId),

    #[error("lesson {id}: {source}")]
    InvalidAudioPath {
        id: LessonId,
        #[source]
        source: MediaValidationError,
    },
}

//
// ─── DRAFT (wire shape) ────────────────────────────────────────────────────────
//

/// Unvalidated lesson as it appears in the lesson document.
///
/// Accepts both the snake_case keys written by the importer and the camelCase
/// keys used by older documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDraft {
    pub id: u64,
    pub chinese: String,
    pub pinyin: String,
    #[serde(default)]
    pub literal: String,
    #[serde(default)]
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,
    #[serde(
        default,
        alias = "frenchAudioFile",
        skip_serializing_if = "Option::is_none"
    )]
    pub french_audio_file: Option<String>,
    #[serde(alias = "audioFile")]
    pub audio_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LessonDraft {
    /// Validate into an immutable `Lesson`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` when the id is zero, the chinese or pinyin text is
    /// blank, or an audio path would escape the audio root.
    pub fn validate(self) -> Result<Lesson, LessonError> {
        let id = LessonId::new(self.id);
        if !id.is_valid() {
            return Err(LessonError::InvalidId);
        }
        let chinese = self.chinese.trim().to_string();
        if chinese.is_empty() {
            return Err(LessonError::EmptyChinese(id));
        }
        let pinyin = self.pinyin.trim().to_string();
        if pinyin.is_empty() {
            return Err(LessonError::EmptyPinyin(id));
        }
        let audio_file = AudioPath::parse(self.audio_file)
            .map_err(|source| LessonError::InvalidAudioPath { id, source })?;
        let french_audio_file = non_blank(self.french_audio_file)
            .map(AudioPath::parse)
            .transpose()
            .map_err(|source| LessonError::InvalidAudioPath { id, source })?;

        Ok(Lesson {
            id,
            chinese,
            pinyin,
            literal: self.literal.trim().to_string(),
            english: self.english.trim().to_string(),
            french: non_blank(self.french),
            french_audio_file,
            audio_file,
            source: non_blank(self.source),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// One practice unit: a target sentence with its transcription, glosses and
/// pronunciation clip(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    chinese: String,
    pinyin: String,
    literal: String,
    english: String,
    french: Option<String>,
    french_audio_file: Option<AudioPath>,
    audio_file: AudioPath,
    source: Option<String>,
}

impl Lesson {
    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn chinese(&self) -> &str {
        &self.chinese
    }

    #[must_use]
    pub fn pinyin(&self) -> &str {
        &self.pinyin
    }

    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    #[must_use]
    pub fn english(&self) -> &str {
        &self.english
    }

    #[must_use]
    pub fn french(&self) -> Option<&str> {
        self.french.as_deref()
    }

    #[must_use]
    pub fn audio_file(&self) -> &AudioPath {
        &self.audio_file
    }

    #[must_use]
    pub fn french_audio_file(&self) -> Option<&AudioPath> {
        self.french_audio_file.as_ref()
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Back to the wire shape, e.g. for writing an imported document.
    #[must_use]
    pub fn to_draft(&self) -> LessonDraft {
        LessonDraft {
            id: self.id.value(),
            chinese: self.chinese.clone(),
            pinyin: self.pinyin.clone(),
            literal: self.literal.clone(),
            english: self.english.clone(),
            french: self.french.clone(),
            french_audio_file: self
                .french_audio_file
                .as_ref()
                .map(|path| path.as_str().to_string()),
            audio_file: self.audio_file.as_str().to_string(),
            source: self.source.clone(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
