/*!
 * Tests for the persisted progress record
 */

use std::fs;
use anyhow::Result;
use pagegloss::errors::ProgressError;
use pagegloss::progress::{ProgressRecord, ProgressStore};
use crate::common;

/// Test the JSON shape written to disk
#[test]
fn test_save_withRecord_shouldWriteFlatJsonObject() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("translation_progress.json");
    let store = ProgressStore::new(&path);
    let mut record = ProgressRecord::new();
    record.mark_translated("page_0002.html");
    record.mark_translated("page_0001.html");
    record.mark_failed("page_0003.html");

    store.save(&record)?;

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(
        value,
        serde_json::json!({
            "translated": ["page_0001.html", "page_0002.html"],
            "failed": ["page_0003.html"]
        })
    );
    Ok(())
}

/// Test that saving overwrites the previous record completely
#[test]
fn test_save_twice_shouldReplacePreviousContents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = ProgressStore::new(temp_dir.path().join("progress.json"));
    let mut record = ProgressRecord::new();
    record.mark_failed("page_0001.html");
    store.save(&record)?;

    record.mark_translated("page_0001.html");
    store.save(&record)?;

    let loaded = store.load()?;
    assert!(loaded.is_translated("page_0001.html"));
    assert!(loaded.failed.is_empty());
    Ok(())
}

/// Test that a progress file written by hand with only one key still loads
#[test]
fn test_load_withMissingKey_shouldDefaultToEmptySet() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "progress.json",
        r#"{"translated": ["page_0001.html", "page_0001.html"]}"#,
    )?;

    let record = ProgressStore::new(&path).load()?;

    assert_eq!(record.translated.len(), 1);
    assert!(record.failed.is_empty());
    Ok(())
}

/// Test that a corrupted progress file fails fast instead of resetting
#[test]
fn test_load_withTruncatedFile_shouldFailAndLeaveFileAlone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "progress.json", "{\"translated\": [")?;

    let result = ProgressStore::new(&path).load();

    assert!(matches!(result, Err(ProgressError::Corrupt { .. })));
    assert_eq!(fs::read_to_string(&path)?, "{\"translated\": [");
    Ok(())
}

/// Test that a relative progress path in the working directory can be saved
#[test]
fn test_save_withParentlessPath_shouldUseCurrentDirectory() -> Result<()> {
    let store = ProgressStore::new("pagegloss_progress_test_tmp.json");

    store.save(&ProgressRecord::new())?;
    let loaded = store.load()?;
    fs::remove_file(store.path())?;

    assert_eq!(loaded, ProgressRecord::new());
    Ok(())
}
