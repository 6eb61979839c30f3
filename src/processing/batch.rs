//! Batch processing of a resume directory
//!
//! Documents are independent: each one is read, normalized and assembled in
//! its own task. A single collector owns the result list. A failing
//! document is reported and skipped, the batch goes on.

use crate::config::ProcessingConfig;
use crate::error::{Result, ResumeParserError};
use crate::extraction::{normalize, CandidateRecord, ResumeExtractor};
use crate::input::InputManager;
use crate::output::exporter::save_normalized_text;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A document that could not be turned into a record.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Records in input (file name) order
    pub records: Vec<CandidateRecord>,
    pub failures: Vec<DocumentFailure>,
}

/// Extraction result for one document along with its normalized text.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub record: CandidateRecord,
    pub text: String,
}

pub struct BatchProcessor {
    extractor: Arc<ResumeExtractor>,
    reader: InputManager,
    settings: ProcessingConfig,
}

impl BatchProcessor {
    pub fn new(extractor: Arc<ResumeExtractor>, settings: ProcessingConfig) -> Self {
        Self {
            extractor,
            reader: InputManager::new(),
            settings,
        }
    }

    /// Process a single document without any batch bookkeeping.
    pub async fn process_file(&self, path: &Path) -> Result<ProcessedDocument> {
        process_document(self.reader, Arc::clone(&self.extractor), path.to_path_buf()).await
    }

    /// Process every file directly inside `input_dir`.
    ///
    /// With `save_text` enabled and an `output_dir` given, the normalized
    /// text of each successful document is written next to the results.
    pub async fn run(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<BatchOutcome> {
        let paths = list_documents(input_dir).await?;
        info!("Found {} documents in {}", paths.len(), input_dir.display());

        let progress = self.progress_bar(paths.len() as u64);
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency.max(1)));
        // Expiry abandons the task; a blocking PDF parse keeps its thread until done
        let time_limit = match self.settings.document_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let mut tasks = JoinSet::new();
        for (index, path) in paths.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let extractor = Arc::clone(&self.extractor);
            let reader = self.reader;

            tasks.spawn(async move {
                let filename = file_name(&path);
                let result: Result<ProcessedDocument> = async {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| ResumeParserError::Processing(format!("Worker pool closed: {}", e)))?;

                    let work = process_document(reader, extractor, path);
                    match time_limit {
                        Some(limit) => tokio::time::timeout(limit, work).await.unwrap_or_else(|_| {
                            Err(ResumeParserError::Timeout(format!("no result after {}s", limit.as_secs())))
                        }),
                        None => work.await,
                    }
                }
                .await;

                (index, filename, result)
            });
        }

        let mut completed = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (index, filename, result) =
                joined.map_err(|e| ResumeParserError::Processing(format!("Document task failed: {}", e)))?;

            match &result {
                Ok(_) => info!("Processed: {}", filename),
                Err(e) => warn!("Failed to process {}: {}", filename, e),
            }
            progress.inc(1);
            completed.push((index, filename, result));
        }
        progress.finish_and_clear();

        completed.sort_by_key(|(index, _, _)| *index);

        let mut outcome = BatchOutcome::default();
        for (_, filename, result) in completed {
            match result {
                Ok(document) => {
                    if let (true, Some(dir)) = (self.settings.save_text, output_dir) {
                        if let Err(e) = save_normalized_text(dir, &filename, &document.text).await {
                            warn!("Could not save extracted text for {}: {}", filename, e);
                        }
                    }
                    outcome.records.push(document.record);
                }
                Err(e) => outcome.failures.push(DocumentFailure {
                    filename,
                    reason: e.to_string(),
                }),
            }
        }

        debug!(
            "Batch finished: {} records, {} failures",
            outcome.records.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.settings.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("resumes");
        bar
    }
}

async fn process_document(
    reader: InputManager,
    extractor: Arc<ResumeExtractor>,
    path: PathBuf,
) -> Result<ProcessedDocument> {
    let raw = reader.read_text(&path).await?;
    let text = normalize(&raw);
    let record = extractor.assemble(&text).with_filename(file_name(&path));

    Ok(ProcessedDocument { record, text })
}

/// Regular files directly inside `dir`, sorted by file name.
pub async fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ResumeParserError::InvalidInput(format!(
            "Input directory does not exist: {}",
            dir.display()
        )));
    }

    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            paths.push(entry.path());
        }
    }

    paths.sort_by_key(|path| file_name(path));
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
