use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::glossary::{Glossary, TermMatcher};
use crate::page::PageTransform;
use crate::progress::{ProgressRecord, ProgressStore};

// @module: Application controller for batch page translation

/// Outcome of handling one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Output written
    Translated,
    /// Already recorded and its output exists
    Cached,
    /// Transform or I/O failure, recorded as failed
    Failed,
    /// Input vanished before it could be read
    Missing,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages discovered in the input directory
    pub total_pages: usize,
    /// Outputs written during this run
    pub translated: usize,
    /// Pages skipped because their output was already in place
    pub cached: usize,
    /// Pages that failed during this run
    pub failed: usize,
    /// Pages that disappeared before being read
    pub missing: usize,
    /// Translated pages in the progress record after the run
    pub recorded_translated: usize,
    /// Failed pages in the progress record after the run
    pub recorded_failed: usize,
}

impl RunSummary {
    /// Share of discovered pages recorded as translated, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.recorded_translated as f64 / self.total_pages as f64 * 100.0
    }

    fn count(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Translated => self.translated += 1,
            PageOutcome::Cached => self.cached += 1,
            PageOutcome::Failed => self.failed += 1,
            PageOutcome::Missing => self.missing += 1,
        }
    }
}

/// Where a page stands according to the progress record and the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Recorded as translated and output present
    Translated,
    /// Recorded as translated but output missing
    Stale,
    /// Last attempt failed
    Failed,
    /// Never processed
    Pending,
}

/// Status of one discovered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStatusEntry {
    pub file_name: String,
    pub status: PageStatus,
}

/// Main application controller for batch page translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Structural and glossary transform shared by every page
    transform: PageTransform,
}

impl Controller {
    // @method: Create a controller with the glossary named by the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let glossary = match &config.glossary_file {
            Some(path) => Glossary::from_json_file(path)
                .with_context(|| format!("Failed to load glossary: {:?}", path))?,
            None => Glossary::builtin(),
        };
        Self::with_glossary(config, &glossary)
    }

    // @method: Create a controller with an explicit glossary
    pub fn with_glossary(config: Config, glossary: &Glossary) -> Result<Self> {
        let matcher = TermMatcher::new(glossary).context("Failed to compile glossary")?;
        debug!("Compiled {} glossary terms", matcher.len());
        let transform = PageTransform::new(matcher, config.total_pages);

        Ok(Self { config, transform })
    }

    fn progress_store(&self) -> ProgressStore {
        ProgressStore::new(&self.config.progress_file)
    }

    /// Run over the configured input directory and batch size
    pub fn run(&self) -> Result<RunSummary> {
        self.run_batches(&self.config.input_dir, self.config.batch_size)
    }

    /// Translate every pending page in `input_dir`, checkpointing progress
    /// after each batch of `batch_size` pages
    pub fn run_batches(&self, input_dir: &Path, batch_size: usize) -> Result<RunSummary> {
        self.run_batches_with(input_dir, batch_size, |_, _| {})
    }

    // @method: Batch loop; `before_batch` sees each batch index and its pages
    // before any of them is processed
    fn run_batches_with<F>(&self, input_dir: &Path, batch_size: usize, mut before_batch: F) -> Result<RunSummary>
    where
        F: FnMut(usize, &[PathBuf]),
    {
        if batch_size == 0 {
            return Err(anyhow::anyhow!("Batch size must be at least 1"));
        }
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let start_time = std::time::Instant::now();
        let store = self.progress_store();
        let mut record = store.load()
            .with_context(|| format!("Failed to load progress file: {:?}", store.path()))?;

        let pages = FileManager::find_pages(input_dir)?;
        let total_batches = pages.len().div_ceil(batch_size);

        info!("Total pages: {}", pages.len());
        info!("Already translated: {}", record.translated.len());
        info!("Batch size: {}", batch_size);

        let mut summary = RunSummary {
            total_pages: pages.len(),
            ..RunSummary::default()
        };

        let progress_bar = ProgressBar::new(pages.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        for (batch_index, batch) in pages.chunks(batch_size).enumerate() {
            let first = batch_index * batch_size + 1;
            info!("Batch {}/{} | Pages {}-{}", batch_index + 1, total_batches, first, first + batch.len() - 1);
            before_batch(batch_index, batch);

            let mut changed = false;
            for page in batch {
                let file_name = page.file_name().unwrap_or_default().to_string_lossy().to_string();
                progress_bar.set_message(file_name.clone());

                let (outcome, record_changed) = self.process_page(page, &file_name, &mut record);
                changed |= record_changed;
                summary.count(outcome);
                progress_bar.inc(1);
            }

            if changed {
                store.save(&record)
                    .with_context(|| format!("Failed to save progress file: {:?}", store.path()))?;
                debug!("Progress saved after batch {}", batch_index + 1);
            } else {
                debug!("Batch {} left progress unchanged, not saving", batch_index + 1);
            }
        }

        progress_bar.finish_and_clear();

        summary.recorded_translated = record.translated.len();
        summary.recorded_failed = record.failed.len();

        info!(
            "Finished in {:.1}s: {} written, {} cached, {} failed, {} missing",
            start_time.elapsed().as_secs_f64(),
            summary.translated,
            summary.cached,
            summary.failed,
            summary.missing
        );

        Ok(summary)
    }

    /// Handle one page; returns its outcome and whether the record changed
    fn process_page(&self, page: &Path, file_name: &str, record: &mut ProgressRecord) -> (PageOutcome, bool) {
        let Some(page_number) = FileManager::page_number(file_name) else {
            error!("✗ {}: cannot read page number from file name", file_name);
            return (PageOutcome::Failed, record.mark_failed(file_name));
        };

        let output_path = FileManager::output_path(page);
        if record.is_translated(file_name) && FileManager::file_exists(&output_path) {
            debug!("✓ p{:03} (cached)", page_number);
            return (PageOutcome::Cached, false);
        }

        let content = match FileManager::read_to_string(page) {
            Ok(content) => content,
            Err(e) if is_not_found(&e) => {
                warn!("Page {} disappeared before it could be read, skipping", file_name);
                return (PageOutcome::Missing, false);
            }
            Err(e) => {
                error!("✗ p{:03}: {:#}", page_number, e);
                return (PageOutcome::Failed, record.mark_failed(file_name));
            }
        };

        let translated = match self.transform.translate(&content, page_number) {
            Ok(translated) => translated,
            Err(e) => {
                error!("✗ p{:03} (translation failed): {}", page_number, e);
                return (PageOutcome::Failed, record.mark_failed(file_name));
            }
        };

        if let Err(e) = FileManager::write_to_file(&output_path, &translated) {
            error!("✗ p{:03}: {:#}", page_number, e);
            return (PageOutcome::Failed, record.mark_failed(file_name));
        }

        debug!("✓ p{:03} → {:?}", page_number, output_path.file_name().unwrap_or_default());
        (PageOutcome::Translated, record.mark_translated(file_name))
    }

    /// Report the status of every page in the configured input directory
    /// without modifying anything
    pub fn status(&self) -> Result<Vec<PageStatusEntry>> {
        self.status_of(&self.config.input_dir)
    }

    /// Report the status of every page in `input_dir`
    pub fn status_of(&self, input_dir: &Path) -> Result<Vec<PageStatusEntry>> {
        let store = self.progress_store();
        let record = store.load()
            .with_context(|| format!("Failed to load progress file: {:?}", store.path()))?;

        let pages: Vec<PathBuf> = FileManager::find_pages(input_dir)?;
        let entries = pages
            .iter()
            .map(|page| {
                let file_name = page.file_name().unwrap_or_default().to_string_lossy().to_string();
                let status = if record.is_translated(&file_name) {
                    if FileManager::file_exists(FileManager::output_path(page)) {
                        PageStatus::Translated
                    } else {
                        PageStatus::Stale
                    }
                } else if record.is_failed(&file_name) {
                    PageStatus::Failed
                } else {
                    PageStatus::Pending
                };
                PageStatusEntry { file_name, status }
            })
            .collect();

        Ok(entries)
    }
}

// True when the root cause of `error` is a missing file
fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .root_cause()
        .downcast_ref::<std::io::Error>()
        .is_some_and(|io_error| io_error.kind() == ErrorKind::NotFound)
}
