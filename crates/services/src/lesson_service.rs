use std::sync::Arc;

use drill_core::model::{LessonDraft, LessonStore};
use storage::LessonRepository;
use tracing::{info, warn};

use crate::error::LessonServiceError;

/// Where the loaded lessons came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonOrigin {
    Resource(String),
    /// Degraded mode: the resource failed and the built-in list is in use.
    Fallback { reason: String },
}

impl LessonOrigin {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLessons {
    pub store: LessonStore,
    pub origin: LessonOrigin,
}

/// Loads the lesson document once at startup, substituting the built-in list
/// when the resource is missing or malformed.
#[derive(Clone)]
pub struct LessonService {
    repo: Arc<dyn LessonRepository>,
    fallback: Vec<LessonDraft>,
}

impl LessonService {
    #[must_use]
    pub fn new(repo: Arc<dyn LessonRepository>) -> Self {
        Self {
            repo,
            fallback: fallback_lessons(),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Vec<LessonDraft>) -> Self {
        self.fallback = fallback;
        self
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::FallbackUnusable` only when both the
    /// resource and the built-in list fail.
    pub async fn load(&self) -> Result<LoadedLessons, LessonServiceError> {
        match self.load_resource().await {
            Ok(store) => {
                info!(source = %self.repo.describe(), lessons = store.len(), "loaded lessons");
                Ok(LoadedLessons {
                    store,
                    origin: LessonOrigin::Resource(self.repo.describe()),
                })
            }
            Err(err) => {
                warn!(source = %self.repo.describe(), error = %err, "lesson data unavailable, using built-in lessons");
                let store = LessonStore::from_drafts(self.fallback.clone())
                    .map_err(LessonServiceError::FallbackUnusable)?;
                Ok(LoadedLessons {
                    store,
                    origin: LessonOrigin::Fallback {
                        reason: err.to_string(),
                    },
                })
            }
        }
    }

    async fn load_resource(&self) -> Result<LessonStore, LessonServiceError> {
        let document = self.repo.load_document().await?;
        if !document.is_consistent() {
            warn!(
                declared = document.total_lessons,
                actual = document.lessons.len(),
                "total_lessons does not match lesson list"
            );
        }
        Ok(LessonStore::from_drafts(document.lessons)?)
    }
}

/// Built-in lessons used when the lesson document cannot be loaded.
#[must_use]
pub fn fallback_lessons() -> Vec<LessonDraft> {
    let lesson = |id: u64, chinese: &str, pinyin: &str, literal: &str, english: &str| LessonDraft {
        id,
        chinese: chinese.to_string(),
        pinyin: pinyin.to_string(),
        literal: literal.to_string(),
        english: english.to_string(),
        french: None,
        french_audio_file: None,
        audio_file: format!("driving-{id}.mp3"),
        source: Some("built-in".to_string()),
    };
    vec![
        lesson(
            1,
            "请打开前照灯",
            "Qǐng dǎkāi qiánzhàodēng",
            "Please open front-shine-lamp",
            "Low beam",
        ),
        lesson(
            2,
            "夜间同方向近距离跟车行驶",
            "Yèjiān tóng fāngxiàng jìn jùlí gēn chē xíngshǐ",
            "Night same direction near distance follow car drive",
            "Low beam",
        ),
        lesson(
            10,
            "模拟夜间考试完成，请关闭所有灯光",
            "Mónǐ yèjiān kǎoshì wánchéng, qǐng guānbì suǒyǒu dēngguāng",
            "Simulated night exam complete, please close all lights",
            "Turn off all lights",
        ),
    ]
}
