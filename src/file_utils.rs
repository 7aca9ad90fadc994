use anyhow::{Result, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: Page file discovery and I/O helpers

/// English input pages: `page_<number>.html`
static PAGE_FILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^page_(\d+)[^/\\]*\.html$").unwrap());

/// Marker distinguishing Romanian output files from inputs
pub const ROMANIAN_MARKER: &str = "_ro";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Whether a file name is an input page (not a Romanian output)
    pub fn is_input_page(file_name: &str) -> bool {
        PAGE_FILE_REGEX.is_match(file_name) && !file_name.contains(ROMANIAN_MARKER)
    }

    /// Page number embedded in a page file name
    pub fn page_number(file_name: &str) -> Option<u32> {
        PAGE_FILE_REGEX
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    // @generates: Output path for a translated page, next to its input
    pub fn output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        let name = input_file
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        let stem = name.strip_suffix(".html").unwrap_or(&name);
        input_file.with_file_name(format!("{}{}.html", stem, ROMANIAN_MARKER))
    }

    /// Find input pages directly inside `dir`, sorted by file name
    pub fn find_pages<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.file_type().is_file() {
                continue;
            }
            if Self::is_input_page(&entry.file_name().to_string_lossy()) {
                result.push(entry.into_path());
            }
        }

        result.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
