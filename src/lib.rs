/*!
 * # pagegloss - glossary-driven page localization
 *
 * A Rust library for producing Romanian skeletons of scanned book pages
 * stored as HTML, using a fixed English to Romanian glossary.
 *
 * ## Features
 *
 * - Longest-first glossary substitution with case mirroring
 * - Fixed structural replacements for page headers, breadcrumbs and
 *   section headings
 * - Text-span scanning that never touches tags, attributes or scripts
 * - Batch processing with a JSON progress file so reruns skip finished pages
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `glossary`: Glossary entries and the `TermMatcher`
 * - `page`: Page transform and the markup span scanner
 * - `progress`: Persisted progress record
 * - `file_utils`: Page discovery and file system operations
 * - `app_controller`: Batch runner and status report
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod glossary;
pub mod page;
pub mod progress;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PageStatus, RunSummary};
pub use glossary::{Glossary, GlossaryEntry, TermMatcher};
pub use page::PageTransform;
pub use progress::{ProgressRecord, ProgressStore};
pub use errors::{AppError, GlossaryError, ProgressError, TransformError};
