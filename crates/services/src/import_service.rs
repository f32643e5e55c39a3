use std::path::Path;

use drill_core::import::{ImportReport, parse_lessons};
use storage::json_file::JsonFileRepository;
use tracing::{info, warn};

use crate::error::ImportServiceError;

/// Converts a markdown lesson file into the JSON lesson document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportService;

impl ImportService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse `markdown` and write the resulting document to `out`.
    ///
    /// The markdown file stem selects the audio naming scheme.
    ///
    /// # Errors
    ///
    /// Returns `ImportServiceError::Read` if the markdown cannot be read,
    /// `ImportServiceError::Parse` when no lesson survives parsing, and
    /// `ImportServiceError::Storage` if the document cannot be written.
    pub async fn import_file(
        &self,
        markdown: &Path,
        out: &Path,
    ) -> Result<ImportReport, ImportServiceError> {
        let text = tokio::fs::read_to_string(markdown)
            .await
            .map_err(|source| ImportServiceError::Read {
                path: markdown.display().to_string(),
                source,
            })?;
        let source_name = markdown
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let report = parse_lessons(&text, source_name)?;
        for skipped in &report.skipped {
            warn!(heading = %skipped.heading, reason = skipped.reason, "skipped lesson block");
        }

        JsonFileRepository::new(out)
            .write_document(&report.document)
            .await?;
        info!(
            lessons = report.document.lessons.len(),
            skipped = report.skipped.len(),
            out = %out.display(),
            "imported lessons"
        );
        Ok(report)
    }
}
