/*!
 * Common test utilities for the pagegloss test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use pagegloss::app_config::Config;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Renders a book page the way the scanned pages are laid out
pub fn sample_page(page_number: u32, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>Page {n}</title></head>
<body>
<p class="breadcrumb">📖 Guns, Germs, and Steel: The Fates of Human Societies</p>
<h1>Page {n} of 457</h1>
<h2>Original Content</h2>
<div class="text-content">
<p>{body}</p>
</div>
<h2>📚 Educational Analysis</h2>
<h3>Summary</h3>
<p>{body}</p>
</body>
</html>
"#,
        n = page_number,
        body = body
    )
}

/// Creates `page_NNNN.html` files for the given page numbers
pub fn create_pages(dir: &Path, numbers: &[u32], body: &str) -> Result<Vec<PathBuf>> {
    numbers
        .iter()
        .map(|&n| create_test_file(dir, &format!("page_{:04}.html", n), &sample_page(n, body)))
        .collect()
}

/// Configuration pointing at a temporary pages directory and progress file
pub fn test_config(dir: &Path, batch_size: usize) -> Config {
    Config {
        input_dir: dir.to_path_buf(),
        progress_file: dir.join("translation_progress.json"),
        batch_size,
        ..Config::default()
    }
}

/// Initializes test logging once; repeated calls are ignored
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
