//! Error types for the pdf2slides library.
//!
//! Failures split along the two stages that can fail:
//!
//! * [`RasterizationError`] — a source PDF could not be turned into page
//!   images (not a PDF, corrupt, encrypted, PDFium missing).
//! * [`WriteError`] — a rendered page could not be persisted as JPEG
//!   (output directory missing, permission denied, disk full).
//!
//! Both convert into the top-level [`Pdf2SlidesError`] returned by
//! [`crate::convert::Pipeline::run`]. A source that simply matches nothing
//! in the input directory is not an error at all: the run completes with
//! zero work items.
//!
//! [`FileError`] is the serialisable, non-fatal record of a failed source
//! kept in [`crate::output::FileReport`] when the pipeline runs with
//! [`crate::config::FailurePolicy::Continue`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2slides library.
#[derive(Debug, Error)]
pub enum Pdf2SlidesError {
    /// A source PDF could not be rasterised.
    #[error(transparent)]
    Rasterization(#[from] RasterizationError),

    /// A rendered page could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Some sources failed while running under the `Continue` policy.
    ///
    /// Returned by [`crate::output::ConversionReport::into_result`] when
    /// the caller wants to treat any failed source as an error.
    #[error("{failed}/{total} PDF files failed to convert")]
    PartialFailure { failed: usize, total: usize },
}

/// The rasteriser could not produce page images for a source file.
#[derive(Debug, Error)]
pub enum RasterizationError {
    /// The source could not be opened or read.
    #[error("Cannot read PDF '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password; encrypted sources are not supported.
    #[error("PDF '{path}' is encrypted and requires a password")]
    PasswordRequired { path: PathBuf },

    /// PDFium returned an error for a specific page (0-based ordinal).
    #[error("Rasterisation failed for page {page} of '{path}': {detail}")]
    PageRenderFailed {
        path: PathBuf,
        page: usize,
        detail: String,
    },

    /// No PDFium library could be bound on this host.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Place libpdfium next to the pdf2slides executable or install it in a\n\
directory on the system library search path.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    EngineUnavailable(String),
}

/// A rendered page could not be persisted as a JPEG file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output directory does not exist and auto-creation is disabled.
    #[error("Output directory does not exist: '{path}'")]
    OutputDirMissing { path: PathBuf },

    /// Auto-creating the output directory failed.
    #[error("Failed to create output directory '{path}': {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoded bytes could not be written to the target file.
    #[error("Failed to create image file '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page could not be encoded as JPEG; nothing was written.
    #[error("Failed to encode image file '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A non-fatal record of one failed source.
///
/// Only produced under [`crate::config::FailurePolicy::Continue`]; the
/// default policy propagates the underlying error instead.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// Rasterisation of the source failed.
    #[error("rasterisation failed: {detail}")]
    RenderFailed { detail: String },

    /// Writing one of the source's pages failed.
    #[error("writing page {page} failed: {detail}")]
    WriteFailed { page: usize, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_display() {
        let e = Pdf2SlidesError::PartialFailure {
            failed: 1,
            total: 4,
        };
        let msg = e.to_string();
        assert!(msg.contains("1/4"), "got: {msg}");
    }

    #[test]
    fn rasterization_error_is_transparent() {
        let e: Pdf2SlidesError = RasterizationError::CorruptPdf {
            path: PathBuf::from("uploads/broken.pdf"),
            detail: "FormatError".into(),
        }
        .into();
        assert!(matches!(e, Pdf2SlidesError::Rasterization(_)));
        assert!(e.to_string().contains("broken.pdf"));
        assert!(e.to_string().contains("FormatError"));
    }

    #[test]
    fn page_render_failed_display() {
        let e = RasterizationError::PageRenderFailed {
            path: PathBuf::from("deck.pdf"),
            page: 2,
            detail: "bitmap".into(),
        };
        assert!(e.to_string().contains("page 2"));
        assert!(e.to_string().contains("deck.pdf"));
    }

    #[test]
    fn output_dir_missing_converts_to_write_variant() {
        let e: Pdf2SlidesError = WriteError::OutputDirMissing {
            path: PathBuf::from("/nowhere/images"),
        }
        .into();
        assert!(matches!(e, Pdf2SlidesError::Write(_)));
        assert!(e.to_string().contains("/nowhere/images"));
    }

    #[test]
    fn file_error_display() {
        let e = FileError::WriteFailed {
            page: 3,
            detail: "disk full".into(),
        };
        assert!(e.to_string().contains("page 3"));
        assert!(e.to_string().contains("disk full"));
    }
}
