//! # Gallery LQIP
//!
//! Fills a gallery site's content document with low-quality image
//! placeholders. Every image the document references is downloaded once,
//! shrunk to a tiny blurred JPEG, and written back next to the reference as
//! an inline `data:image/jpeg;base64,...` URI under the `lqip` key. The site
//! shows that blurry preview while the full image loads.
//!
//! # Architecture: One Pass, Five Stages
//!
//! ```text
//! 1. Load     data.json  →  Document           (whole file, key order kept)
//! 2. Scan     Document   →  ScannedIds         (fileName + imageId references)
//! 3. Process  ScannedIds →  PlaceholderMap     (fetch + transform, batches of 5)
//! 4. Inject   PlaceholderMap → Document        (lqip written beside each reference)
//! 5. Persist  Document   →  data.json          (pretty JSON, overwritten in place)
//! ```
//!
//! Only stage 3 touches the network, and only stage 5 writes. `check` stops
//! after stage 2.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | The content document: loading, section kinds, field access, saving |
//! | [`scan`] | Stage 2: collects image identifiers in document order |
//! | [`remote`] | The image host: `ImageSource` trait and the HTTP implementation |
//! | [`imaging`] | Pure-Rust placeholder transform: resize, blur, JPEG encode |
//! | [`process`] | Stage 3: bounded-concurrency batches and per-image outcomes |
//! | [`inject`] | Stage 4: writes successful placeholders into the document |
//! | [`pipeline`] | Runs the stages end to end |
//! | [`config`] | `lqip.toml` loading, validation, and stock defaults |
//! | [`output`] | CLI output formatting for progress and summaries |
//!
//! # Design Decisions
//!
//! ## The Document Stays Untyped
//!
//! The content file belongs to the website, not to this tool. It is held as a
//! [`serde_json::Value`] so fields this tool knows nothing about survive a
//! run untouched and in their original order. Only the handful of keys that
//! carry image references are ever read.
//!
//! ## Failures Are Values
//!
//! A missing or corrupt image must not cost the whole run. Each identifier
//! resolves to [`process::Placeholder::Ready`] or
//! [`process::Placeholder::Failed`]; the injector writes the former and leaves
//! the reference alone for the latter. Only a broken document or a failed
//! write aborts.
//!
//! ## Threads, Not Async
//!
//! Batches run on a rayon pool sized to the batch, with blocking HTTP. At five
//! images in flight there is nothing for an async runtime to win, and the
//! image work is CPU-bound anyway.

pub mod config;
pub mod content;
pub mod imaging;
pub mod inject;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod remote;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
