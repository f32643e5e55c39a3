use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LessonId;
use crate::model::lesson::{Lesson, LessonDraft, LessonError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonStoreError {
    #[error("lesson store cannot be empty")]
    Empty,

    #[error("duplicate lesson id: {0}")]
    DuplicateId(LessonId),

    #[error(transparent)]
    Lesson(#[from] LessonError),
}

/// The lesson data document, as written by the importer and read at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDocument {
    pub total_lessons: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons_with_french: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_characters: Option<usize>,
    pub lessons: Vec<LessonDraft>,
}

impl LessonDocument {
    /// `true` when `total_lessons` agrees with the lesson list.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.total_lessons == self.lessons.len()
    }
}

/// Non-empty, ordered lessons with unique ids. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonStore {
    lessons: Vec<Lesson>,
}

impl LessonStore {
    /// # Errors
    ///
    /// Returns `LessonStoreError::Empty` for an empty list and
    /// `LessonStoreError::DuplicateId` if two lessons share an id.
    pub fn new(lessons: Vec<Lesson>) -> Result<Self, LessonStoreError> {
        if lessons.is_empty() {
            return Err(LessonStoreError::Empty);
        }
        let mut seen = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !seen.insert(lesson.id()) {
                return Err(LessonStoreError::DuplicateId(lesson.id()));
            }
        }
        Ok(Self { lessons })
    }

    /// Validates every draft, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns `LessonStoreError::Lesson` for an invalid draft, or the errors of
    /// [`LessonStore::new`].
    pub fn from_drafts(drafts: Vec<LessonDraft>) -> Result<Self, LessonStoreError> {
        let lessons = drafts
            .into_iter()
            .map(LessonDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(lessons)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    #[must_use]
    pub fn position(&self, id: LessonId) -> Option<usize> {
        self.lessons.iter().position(|lesson| lesson.id() == id)
    }

    #[must_use]
    pub fn find(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter()
    }

    #[must_use]
    pub fn with_french_count(&self) -> usize {
        self.lessons
            .iter()
            .filter(|lesson| lesson.french().is_some())
            .count()
    }

    #[must_use]
    pub fn total_characters(&self) -> usize {
        self.lessons
            .iter()
            .map(|lesson| lesson.chinese().chars().count())
            .sum()
    }

    /// Builds the document shape for this store.
    #[must_use]
    pub fn to_document(&self) -> LessonDocument {
        LessonDocument {
            total_lessons: self.len(),
            lessons_with_french: Some(self.with_french_count()),
            total_characters: Some(self.total_characters()),
            lessons: self.lessons.iter().map(Lesson::to_draft).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: u64) -> LessonDraft {
        LessonDraft {
            id,
            chinese: format!("课{id}"),
            pinyin: format!("kè {id}"),
            literal: String::new(),
            english: String::new(),
            french: None,
            french_audio_file: None,
            audio_file: format!("lesson_{id:02}.mp3"),
            source: None,
        }
    }

    #[test]
    fn empty_store_is_rejected() {
        assert_eq!(LessonStore::new(Vec::new()), Err(LessonStoreError::Empty));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = LessonStore::from_drafts(vec![draft(1), draft(2), draft(1)]).unwrap_err();
        assert_eq!(err, LessonStoreError::DuplicateId(LessonId::new(1)));
    }

    #[test]
    fn ids_need_not_be_contiguous() {
        let store = LessonStore::from_drafts(vec![draft(3), draft(10), draft(7)]).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.position(LessonId::new(10)), Some(1));
        assert_eq!(store.get(2).map(Lesson::id), Some(LessonId::new(7)));
    }

    #[test]
    fn document_counts_match_store() {
        let mut with_french = draft(2);
        with_french.french = Some("Leçon".into());
        let store = LessonStore::from_drafts(vec![draft(1), with_french]).unwrap();
        let doc = store.to_document();
        assert!(doc.is_consistent());
        assert_eq!(doc.lessons_with_french, Some(1));
        assert_eq!(doc.total_characters, Some(4));
    }
}
