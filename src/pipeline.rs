//! End-to-end run: load → scan → process → inject → persist.
//!
//! Stages run strictly one after another; only the process stage is
//! concurrent, and only within a batch. The run either completes (every
//! per-image failure is absorbed) or aborts on a document load, worker pool,
//! or persist error.

use crate::content::{Document, LoadError, PersistError};
use crate::imaging::{ImageBackend, PlaceholderConfig};
use crate::inject::{InjectStats, inject};
use crate::process::{ProcessContext, ProcessError, ProcessEvent, process_all};
use crate::remote::ImageSource;
use crate::scan::{ScannedIds, scan};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Inputs for a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_path: PathBuf,
    pub batch_size: usize,
    pub placeholder: PlaceholderConfig,
}

impl RunConfig {
    pub fn from_config(config: &crate::config::LqipConfig) -> Self {
        Self {
            data_path: config.data_path.clone(),
            batch_size: config.processing.batch_size,
            placeholder: config.placeholder_config(),
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub data_path: PathBuf,
    pub scanned: ScannedIds,
    /// Identifiers attempted (after cross-provenance dedup).
    pub processed: usize,
    /// Identifiers whose placeholder failed, in processing order.
    pub failed: Vec<String>,
    pub inject: InjectStats,
}

/// Load and scan only. No network access, no writes.
pub fn check(data_path: &Path) -> Result<ScannedIds, LoadError> {
    let document = Document::load(data_path)?;
    Ok(scan(&document))
}

/// Run the whole pipeline against `config.data_path`.
pub fn run(
    config: &RunConfig,
    source: &dyn ImageSource,
    backend: &dyn ImageBackend,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunSummary, PipelineError> {
    let mut document = Document::load(&config.data_path)?;

    let scanned = scan(&document);
    let identifiers = scanned.processing_list();
    if let Some(tx) = &events {
        tx.send(ProcessEvent::ScanCompleted {
            item_images: scanned.file_names.len(),
            info_images: scanned.image_ids.len(),
            total: identifiers.len(),
        })
        .ok();
    }

    let ctx = ProcessContext {
        source,
        backend,
        placeholder: config.placeholder,
        batch_size: config.batch_size,
    };
    let placeholders = process_all(&identifiers, &ctx, events)?;

    let stats = inject(&mut document, &placeholders);
    document.save(&config.data_path)?;

    let failed = identifiers
        .iter()
        .filter(|id| {
            placeholders
                .get(id.as_str())
                .is_none_or(|p| p.data_uri().is_none())
        })
        .cloned()
        .collect();

    Ok(RunSummary {
        data_path: config.data_path.clone(),
        scanned,
        processed: identifiers.len(),
        failed,
        inject: stats,
    })
}
