//! PDF rasterisation: turn one source PDF into an ordered list of page images.
//!
//! The pipeline only depends on the [`Rasterizer`] trait. Production runs use
//! [`PdfiumRasterizer`], which wraps the PDFium C++ library through
//! `pdfium-render`; tests substitute a fake that fabricates images so the
//! driver can be exercised without any PDF toolchain installed.
//!
//! PDFium is bound lazily on the first call to [`Rasterizer::rasterize`]. A
//! run that finds nothing to convert therefore never needs the library.

use crate::error::RasterizationError;
use image::DynamicImage;
use once_cell::sync::OnceCell;
use pdfium_render::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolution used for every page. PDF user space is 72 units per inch.
pub const RENDER_DPI: f32 = 200.0;

/// How far into the file the `%PDF` header may start.
const HEADER_SEARCH_BYTES: usize = 1024;

/// One rendered page, tagged with its 0-based position in the source.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub ordinal: usize,
    pub image: DynamicImage,
}

/// Converts a PDF on disk into one image per page, in document order.
pub trait Rasterizer {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, RasterizationError>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, RasterizationError> {
        (**self).rasterize(pdf_path)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, RasterizationError> {
        (**self).rasterize(pdf_path)
    }
}

/// [`Rasterizer`] backed by the PDFium library.
#[derive(Default)]
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
    pdfium: OnceCell<Pdfium>,
}

impl PdfiumRasterizer {
    /// Bind against the system library search path only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for the platform PDFium library in `dir` before falling back to
    /// the system library search path.
    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    fn pdfium(&self) -> Result<&Pdfium, RasterizationError> {
        self.pdfium.get_or_try_init(|| bind_pdfium(self.library_dir.as_deref()))
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, RasterizationError> {
        check_pdf_header(pdf_path)?;

        let pdfium = self.pdfium()?;
        let document = pdfium.load_pdf_from_file(pdf_path, None).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                RasterizationError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                RasterizationError::CorruptPdf {
                    path: pdf_path.to_path_buf(),
                    detail: err_str,
                }
            }
        })?;

        let pages = document.pages();
        info!("PDF loaded: {} ({} pages)", pdf_path.display(), pages.len());

        let render_config = PdfRenderConfig::new().scale_page_by_factor(RENDER_DPI / 72.0);

        let mut images = Vec::with_capacity(pages.len() as usize);
        for (ordinal, page) in pages.iter().enumerate() {
            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                RasterizationError::PageRenderFailed {
                    path: pdf_path.to_path_buf(),
                    page: ordinal,
                    detail: format!("{:?}", e),
                }
            })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} → {}x{} px",
                ordinal,
                image.width(),
                image.height()
            );
            images.push(image);
        }

        Ok(images)
    }
}

/// Bind PDFium from `library_dir` if it holds the platform library,
/// otherwise from the system library search path.
fn bind_pdfium(library_dir: Option<&Path>) -> Result<Pdfium, RasterizationError> {
    let mut failures = Vec::new();

    if let Some(dir) = library_dir {
        let candidate = Pdfium::pdfium_platform_library_name_at_path(&dir);
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                info!("Bound PDFium from {}", candidate.display());
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => failures.push(format!("{}: {}", candidate.display(), e)),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            info!("Bound PDFium from the system library path");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            failures.push(format!("system library: {}", e));
            Err(RasterizationError::EngineUnavailable(failures.join("; ")))
        }
    }
}

/// Fail fast on files that are not PDFs at all.
///
/// Accepts a `%PDF` marker anywhere in the first kilobyte, as PDF readers
/// tolerate leading garbage before the header.
pub fn check_pdf_header(pdf_path: &Path) -> Result<(), RasterizationError> {
    let unreadable = |source| RasterizationError::Unreadable {
        path: pdf_path.to_path_buf(),
        source,
    };

    let mut head = Vec::with_capacity(HEADER_SEARCH_BYTES);
    File::open(pdf_path)
        .map_err(unreadable)?
        .take(HEADER_SEARCH_BYTES as u64)
        .read_to_end(&mut head)
        .map_err(unreadable)?;

    if head.windows(4).any(|w| w == b"%PDF") {
        Ok(())
    } else {
        Err(RasterizationError::NotAPdf {
            path: pdf_path.to_path_buf(),
            magic: head.iter().take(8).copied().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn header_at_start_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("ok.pdf");
        fs::write(&p, b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n").unwrap();
        assert!(check_pdf_header(&p).is_ok());
    }

    #[test]
    fn header_after_leading_bytes_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("prefixed.pdf");
        let mut bytes = vec![b' '; 100];
        bytes.extend_from_slice(b"%PDF-1.4\n");
        fs::write(&p, bytes).unwrap();
        assert!(check_pdf_header(&p).is_ok());
    }

    #[test]
    fn non_pdf_is_rejected_with_magic() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("broken.pdf");
        fs::write(&p, b"PK\x03\x04 this is a zip").unwrap();

        match check_pdf_header(&p) {
            Err(RasterizationError::NotAPdf { path, magic }) => {
                assert_eq!(path, p);
                assert_eq!(&magic[..4], b"PK\x03\x04");
            }
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("empty.pdf");
        fs::write(&p, b"").unwrap();
        assert!(matches!(
            check_pdf_header(&p),
            Err(RasterizationError::NotAPdf { .. })
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            check_pdf_header(&tmp.path().join("gone.pdf")),
            Err(RasterizationError::Unreadable { .. })
        ));
    }

    #[test]
    fn pdfium_rasterizer_rejects_garbage_before_binding() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("broken.pdf");
        fs::write(&p, b"definitely not a pdf").unwrap();

        let rasterizer = PdfiumRasterizer::new().with_library_dir(tmp.path());
        assert!(matches!(
            rasterizer.rasterize(&p),
            Err(RasterizationError::NotAPdf { .. })
        ));
        assert!(rasterizer.pdfium.get().is_none());
    }
}
