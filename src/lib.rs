//! # pdf2slides
//!
//! Batch-convert every PDF in a directory into one JPEG per page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! uploads/*.pdf
//!  │
//!  ├─ 1. Locate   match *.pdf names in the input directory (missing = nothing to do)
//!  ├─ 2. Render   rasterise each PDF via pdfium, one image per page
//!  └─ 3. Write    <base>-slide-<ordinal>.jpg into the output directory
//! ```
//!
//! Sources are processed one at a time, and every page of a source is written
//! before the next source is opened. By default the first failure aborts the
//! run; [`FailurePolicy::Continue`] records it and moves on instead.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2slides::{convert_directory, PdfiumRasterizer, PipelineConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::builder()
//!         .input_dir("uploads")
//!         .output_dir("images")
//!         .build()?;
//!     let report = convert_directory(config, PdfiumRasterizer::new())?;
//!     for path in report.outputs() {
//!         println!("{}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without PDFium
//!
//! [`Pipeline`] is generic over [`Rasterizer`], so tests can hand it a fake
//! that fabricates page images and never touch a real PDF toolchain.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2slides` binary (anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{install_dir, FailurePolicy, PipelineConfig, PipelineConfigBuilder};
pub use convert::{convert_directory, Pipeline};
pub use error::{FileError, Pdf2SlidesError, RasterizationError, WriteError};
pub use output::{ConversionReport, ConversionStats, FileReport};
pub use pipeline::locate::{find_by_extensions, SourceFile};
pub use pipeline::render::{PageImage, PdfiumRasterizer, Rasterizer};
pub use pipeline::write::{output_file_name, write_page};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
