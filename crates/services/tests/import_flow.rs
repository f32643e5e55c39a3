use std::path::PathBuf;
use std::sync::Arc;

use services::{ImportService, ImportServiceError, LessonService};
use storage::json_file::JsonFileRepository;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("drill-import-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const MARKDOWN: &str = "\
# Night driving light commands

## 1. 请打开前照灯
**Pinyin:** Qǐng dǎkāi qiánzhàodēng
**Literal:** Please open front-shine-lamp
**English:** Low beam
**French:** Feux de croisement

## 2. 通过急弯
**Pinyin:** Tōngguò jí wān
**Literal:** Pass sharp bend
**English:** Alternating beams

## x. 不完整
**Pinyin:** Bù wánzhěng
";

#[tokio::test]
async fn imported_document_loads_back() {
    let dir = scratch_dir("roundtrip");
    let markdown = dir.join("chinese-driving.md");
    std::fs::write(&markdown, MARKDOWN).unwrap();
    let out = dir.join("data").join("lessons.json");

    let report = ImportService::new()
        .import_file(&markdown, &out)
        .await
        .unwrap();
    assert_eq!(report.document.lessons.len(), 2);
    assert_eq!(report.skipped.len(), 1);

    let loaded = LessonService::new(Arc::new(JsonFileRepository::new(&out)))
        .load()
        .await
        .unwrap();
    assert!(!loaded.origin.is_fallback());
    let first = loaded.store.get(0).unwrap();
    assert_eq!(first.audio_file().as_str(), "driving-1.mp3");
    assert_eq!(
        first.french_audio_file().map(|p| p.as_str()),
        Some("driving-1_fr.mp3")
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_markdown_is_a_read_error() {
    let dir = scratch_dir("missing");
    let result = ImportService::new()
        .import_file(&dir.join("nope.md"), &dir.join("out.json"))
        .await;
    assert!(matches!(result, Err(ImportServiceError::Read { .. })));
    let _ = std::fs::remove_dir_all(&dir);
}
