/*!
 * Tests for page discovery and file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use pagegloss::file_utils::FileManager;
use crate::common;

/// Test that find_pages keeps only English page files, sorted by name
#[test]
fn test_find_pages_withMixedFiles_shouldReturnSortedInputPages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    for name in [
        "page_0010.html",
        "page_0002.html",
        "page_0002_ro.html",
        "index.html",
        "page_0003.txt",
        "notes.json",
    ] {
        common::create_test_file(dir, name, "<p>x</p>")?;
    }
    fs::create_dir(dir.join("page_0004.html"))?;

    let pages = FileManager::find_pages(dir)?;

    let names: Vec<String> = pages
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["page_0002.html", "page_0010.html"]);

    Ok(())
}

/// Test that find_pages does not descend into subdirectories
#[test]
fn test_find_pages_withNestedDirectory_shouldIgnoreNestedPages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("old");
    fs::create_dir(&nested)?;
    common::create_test_file(&nested, "page_0001.html", "<p>x</p>")?;

    let pages = FileManager::find_pages(temp_dir.path())?;

    assert!(pages.is_empty());
    Ok(())
}

/// Test that output_path appends the Romanian marker before the extension
#[test]
fn test_output_path_withPageFile_shouldAddRoSuffix() {
    let output = FileManager::output_path(Path::new("/tmp/text/page_0007.html"));

    assert_eq!(output, Path::new("/tmp/text/page_0007_ro.html"));
}

/// Test page number parsing from file names
#[test]
fn test_page_number_withVariousNames_shouldParseLeadingDigits() {
    assert_eq!(FileManager::page_number("page_0007.html"), Some(7));
    assert_eq!(FileManager::page_number("page_0457.html"), Some(457));
    assert_eq!(FileManager::page_number("index.html"), None);
}

/// Test that Romanian outputs are never treated as inputs
#[test]
fn test_is_input_page_withRomanianOutput_shouldReturnFalse() {
    assert!(FileManager::is_input_page("page_0001.html"));
    assert!(!FileManager::is_input_page("page_0001_ro.html"));
    assert!(!FileManager::is_input_page("cover.html"));
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("page_0001_ro.html");

    FileManager::write_to_file(&target, "<p>gata</p>")?;

    assert_eq!(fs::read_to_string(&target)?, "<p>gata</p>");
    Ok(())
}

/// Test that read_to_string reports a missing file as an error
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("non_existent_page_9999.html").is_err());
}

/// Test existence checks on files and directories
#[test]
fn test_exists_checks_shouldDistinguishFilesAndDirs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "page_0001.html", "x")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}
