//! Placeholder generation: fetch, transform, and batched concurrency.
//!
//! For each identifier the stage fetches the full-size image from an
//! [`ImageSource`], shrinks it into a blurred low-quality JPEG through an
//! [`ImageBackend`], and wraps the bytes as a `data:image/jpeg;base64,...`
//! URI.
//!
//! ## Failure containment
//!
//! Every error for one identifier (HTTP status, timeout, transport, decode,
//! encode) stops at [`resolve`] and becomes [`Placeholder::Failed`]. Nothing
//! per-identifier ever reaches the caller as an `Err`; the injector decides
//! what to do with failures.
//!
//! ## Batching
//!
//! ```text
//! ids:     a b c d e | f g h i j | k l
//! batch:       1     |     2     |  3
//! ```
//!
//! Identifiers are split into contiguous batches of `batch_size`. Each batch
//! runs concurrently on a [rayon](https://docs.rs/rayon) pool sized to the
//! batch, so at most `batch_size` requests are in flight. A batch starts only
//! after the previous one has fully settled.

use crate::imaging::{BackendError, ImageBackend, PlaceholderConfig, create_placeholder};
use crate::remote::{FetchError, ImageSource};
use base64::Engine;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Identifiers processed concurrently per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 5;

const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Why a single placeholder could not be produced.
#[derive(Error, Debug)]
pub enum LqipError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Transform(#[from] BackendError),
}

/// Outcome for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// Inline data URI ready to inject.
    Ready(String),
    /// Generation failed; carries the error message.
    Failed(String),
}

impl Placeholder {
    pub fn data_uri(&self) -> Option<&str> {
        match self {
            Placeholder::Ready(uri) => Some(uri.as_str()),
            Placeholder::Failed(_) => None,
        }
    }
}

/// Identifier → outcome. Built once per run, read-only afterwards.
pub type PlaceholderMap = BTreeMap<String, Placeholder>;

/// Progress events, streamed to the CLI printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    ScanCompleted {
        item_images: usize,
        info_images: usize,
        total: usize,
    },
    BatchStarted {
        /// 1-based.
        number: usize,
        identifiers: Vec<String>,
    },
    PlaceholderReady {
        identifier: String,
        bytes: usize,
    },
    PlaceholderFailed {
        identifier: String,
        message: String,
    },
}

/// Everything the stage needs, passed in explicitly.
pub struct ProcessContext<'a> {
    pub source: &'a dyn ImageSource,
    pub backend: &'a dyn ImageBackend,
    pub placeholder: PlaceholderConfig,
    pub batch_size: usize,
}

/// Wrap encoded JPEG bytes as an inline data URI.
pub fn data_uri(jpeg: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(jpeg);
    format!("{DATA_URI_PREFIX}{payload}")
}

/// Fetch one image and turn it into a data URI.
pub fn generate_placeholder(
    ctx: &ProcessContext<'_>,
    identifier: &str,
) -> Result<String, LqipError> {
    let bytes = ctx.source.fetch(identifier)?;
    let jpeg = create_placeholder(ctx.backend, &bytes, &ctx.placeholder)?;
    Ok(data_uri(&jpeg))
}

/// Per-identifier boundary: never fails, reports the outcome as an event.
pub fn resolve(
    ctx: &ProcessContext<'_>,
    identifier: &str,
    events: Option<&Sender<ProcessEvent>>,
) -> Placeholder {
    let (placeholder, event) = match generate_placeholder(ctx, identifier) {
        Ok(uri) => {
            let event = ProcessEvent::PlaceholderReady {
                identifier: identifier.to_string(),
                bytes: uri.len(),
            };
            (Placeholder::Ready(uri), event)
        }
        Err(err) => {
            let message = err.to_string();
            let event = ProcessEvent::PlaceholderFailed {
                identifier: identifier.to_string(),
                message: message.clone(),
            };
            (Placeholder::Failed(message), event)
        }
    };
    if let Some(tx) = events {
        tx.send(event).ok();
    }
    placeholder
}

/// Split into contiguous batches of `size`; the last may be shorter.
/// A size of 0 is treated as 1.
pub fn batches(identifiers: &[String], size: usize) -> Vec<&[String]> {
    identifiers.chunks(size.max(1)).collect()
}

/// Produce a placeholder for every identifier, batch by batch.
pub fn process_all(
    identifiers: &[String],
    ctx: &ProcessContext<'_>,
    events: Option<Sender<ProcessEvent>>,
) -> Result<PlaceholderMap, ProcessError> {
    let batch_size = ctx.batch_size.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(batch_size)
        .thread_name(|i| format!("lqip-fetch-{i}"))
        .build()?;

    let mut map = PlaceholderMap::new();
    for (i, batch) in batches(identifiers, batch_size).into_iter().enumerate() {
        if let Some(tx) = &events {
            tx.send(ProcessEvent::BatchStarted {
                number: i + 1,
                identifiers: batch.to_vec(),
            })
            .ok();
        }

        let results: Vec<(String, Placeholder)> = pool.install(|| {
            batch
                .par_iter()
                .map(|id| (id.clone(), resolve(ctx, id, events.as_ref())))
                .collect()
        });
        map.extend(results);
    }

    Ok(map)
}
