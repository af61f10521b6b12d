//! Progress-callback trait for per-file and per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::PipelineConfigBuilder::progress_callback`] to be told
//! what the pipeline is doing while it runs. The `pdf2slides` binary uses
//! this to drive its terminal progress bar; library callers can forward the
//! events anywhere without the pipeline knowing about it.
//!
//! # Example
//!
//! ```rust
//! use pdf2slides::{ConversionProgressCallback, PipelineConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter {
//!     written: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for PageCounter {
//!     fn on_page_written(&self, _source: &Path, _ordinal: usize, _total: usize, output: &Path) {
//!         self.written.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("wrote {}", output.display());
//!     }
//! }
//!
//! let counter = Arc::new(PageCounter { written: AtomicUsize::new(0) });
//!
//! let config = PipelineConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the pipeline as it processes each source file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events are delivered from the thread running the
/// pipeline, in processing order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the input directory has been scanned.
    ///
    /// # Arguments
    /// * `total_files` — number of source files that will be processed
    fn on_run_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a source file is rasterised.
    ///
    /// # Arguments
    /// * `file_num`    — 1-indexed position in the scan order
    /// * `total_files` — total source files in this run
    /// * `source`      — path of the PDF
    fn on_file_start(&self, file_num: usize, total_files: usize, source: &Path) {
        let _ = (file_num, total_files, source);
    }

    /// Called after each page image has been written.
    ///
    /// # Arguments
    /// * `source`      — path of the PDF the page came from
    /// * `ordinal`     — 0-based page ordinal
    /// * `total_pages` — pages rendered for this source
    /// * `output`      — path of the JPEG just written
    fn on_page_written(&self, source: &Path, ordinal: usize, total_pages: usize, output: &Path) {
        let _ = (source, ordinal, total_pages, output);
    }

    /// Called when every page of a source file has been written.
    fn on_file_complete(&self, file_num: usize, total_files: usize, pages_written: usize) {
        let _ = (file_num, total_files, pages_written);
    }

    /// Called when a source file fails, before the error propagates (or,
    /// under the `Continue` policy, before moving on).
    fn on_file_error(&self, file_num: usize, total_files: usize, error: &str) {
        let _ = (file_num, total_files, error);
    }

    /// Called once after every source file has been attempted.
    ///
    /// Not called when the run aborts on an error.
    fn on_run_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PipelineConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
