//! Result types returned by a pipeline run.

use crate::error::{FileError, Pdf2SlidesError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one [`crate::convert::Pipeline::run`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// One entry per source file, in processing order.
    pub files: Vec<FileReport>,
    /// Aggregate counters for the run.
    pub stats: ConversionStats,
}

impl ConversionReport {
    /// Every JPEG written during the run, in write order.
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().flat_map(|f| f.outputs.iter())
    }

    /// True when at least one source failed (only possible under
    /// [`crate::config::FailurePolicy::Continue`]).
    pub fn has_failures(&self) -> bool {
        self.stats.files_failed > 0
    }

    /// Turn a report with failed sources into
    /// [`Pdf2SlidesError::PartialFailure`].
    pub fn into_result(self) -> Result<Self, Pdf2SlidesError> {
        if self.has_failures() {
            Err(Pdf2SlidesError::PartialFailure {
                failed: self.stats.files_failed,
                total: self.stats.files_found,
            })
        } else {
            Ok(self)
        }
    }
}

/// What happened to one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the source PDF.
    pub source: PathBuf,
    /// JPEGs written for this source, ordered by page ordinal.
    pub outputs: Vec<PathBuf>,
    /// Set when the source failed under the `Continue` policy. Pages written
    /// before a write failure remain listed in `outputs`.
    pub error: Option<FileError>,
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Source files matched in the input directory.
    pub files_found: usize,
    /// Source files whose every page was written.
    pub files_converted: usize,
    /// Source files that failed.
    pub files_failed: usize,
    /// Total JPEG files written.
    pub pages_written: usize,
    /// Wall-clock time spent rasterising, in milliseconds.
    pub render_duration_ms: u64,
    /// Wall-clock time spent encoding and writing, in milliseconds.
    pub write_duration_ms: u64,
    /// Wall-clock time of the whole run, in milliseconds.
    pub total_duration_ms: u64,
}
