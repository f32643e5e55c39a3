//! Lesson markdown → lesson document.
//!
//! Expected block shape:
//!
//! ```text
//! ## 1. 请打开前照灯
//! **Pinyin:** Qǐng dǎkāi qiánzhàodēng
//! **Literal:** Please open front-shine-lamp
//! **English:** Low beam
//! **French:** Feux de croisement
//! ```
//!
//! `**French:**` is optional. Blocks missing a required field are skipped and
//! reported, not fatal.

use regex::Regex;
use thiserror::Error;

use crate::model::{LessonDocument, LessonDraft, LessonStore, LessonStoreError};

/// Source stem that switches clip names to the `driving-<id>.mp3` scheme.
pub const DRIVING_SOURCE: &str = "chinese-driving";

const HEADING_PATTERN: &str = r"^##\s+([^.\s]+)\.\s+(.+?)\s*$";
const FIELD_PATTERN: &str = r"^\*\*(Pinyin|Literal|English|French):\*\*\s*(.*?)\s*$";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportError {
    #[error("no lessons found in {source_name}")]
    NoLessons { source_name: String },

    #[error(transparent)]
    Store(#[from] LessonStoreError),

    #[error("invalid line pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for ImportError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    pub heading: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub document: LessonDocument,
    pub skipped: Vec<SkippedBlock>,
}

#[derive(Default)]
struct Block {
    raw_id: String,
    heading: String,
    chinese: String,
    pinyin: Option<String>,
    literal: Option<String>,
    english: Option<String>,
    french: Option<String>,
}

/// Clip names for a lesson id under the given source stem.
#[must_use]
pub fn audio_file_names(source_name: &str, id: u64) -> (String, String) {
    if source_name == DRIVING_SOURCE {
        (format!("driving-{id}.mp3"), format!("driving-{id}_fr.mp3"))
    } else {
        (format!("lesson_{id:02}.mp3"), format!("lesson_{id:02}_fr.mp3"))
    }
}

/// Parses lesson markdown. `source_name` is the input file stem.
///
/// # Errors
///
/// Returns `ImportError::NoLessons` when no complete block is found and
/// `ImportError::Store` for duplicate ids or invalid lessons.
pub fn parse_lessons(markdown: &str, source_name: &str) -> Result<ImportReport, ImportError> {
    let heading_re = Regex::new(HEADING_PATTERN)?;
    let field_re = Regex::new(FIELD_PATTERN)?;
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for line in markdown.lines() {
        let line = line.trim_end();
        if let Some(caps) = heading_re.captures(line) {
            blocks.extend(current.take());
            current = Some(Block {
                raw_id: caps[1].to_string(),
                heading: line.trim_start_matches('#').trim().to_string(),
                chinese: caps[2].to_string(),
                ..Block::default()
            });
            continue;
        }
        let (Some(block), Some(caps)) = (current.as_mut(), field_re.captures(line)) else {
            continue;
        };
        let value = Some(caps[2].to_string()).filter(|v| !v.is_empty());
        match &caps[1] {
            "Pinyin" => block.pinyin = value,
            "Literal" => block.literal = value,
            "English" => block.english = value,
            "French" => block.french = value,
            _ => {}
        }
    }
    blocks.extend(current);

    let mut drafts = Vec::new();
    let mut skipped = Vec::new();
    for block in blocks {
        let Some(id) = block.raw_id.parse::<u64>().ok().filter(|id| *id > 0) else {
            skipped.push(SkippedBlock {
                heading: block.heading,
                reason: "lesson id is not a positive integer",
            });
            continue;
        };
        let (Some(pinyin), Some(literal), Some(english)) =
            (block.pinyin, block.literal, block.english)
        else {
            skipped.push(SkippedBlock {
                heading: block.heading,
                reason: "missing Pinyin, Literal or English line",
            });
            continue;
        };
        let (audio_file, french_audio_file) = audio_file_names(source_name, id);
        let french_audio_file = block.french.as_ref().map(|_| french_audio_file);
        drafts.push(LessonDraft {
            id,
            chinese: block.chinese,
            pinyin,
            literal,
            english,
            french: block.french,
            french_audio_file,
            audio_file,
            source: Some(source_name.to_string()),
        });
    }

    if drafts.is_empty() {
        return Err(ImportError::NoLessons {
            source_name: source_name.to_string(),
        });
    }

    let store = LessonStore::from_drafts(drafts)?;
    Ok(ImportReport {
        document: store.to_document(),
        skipped,
    })
}
