//! End-to-end tests against a real PDFium library.
//!
//! These need libpdfium on the library search path (or in the working
//! directory), so they are gated behind the `E2E_ENABLED` environment
//! variable and do not run in CI unless explicitly requested.
//!
//! Run with:
//!   E2E_ENABLED=1 LD_LIBRARY_PATH=. cargo test --test e2e -- --nocapture

use pdf2slides::{
    PdfiumRasterizer, Pdf2SlidesError, Pipeline, PipelineConfig, RasterizationError, Rasterizer,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

macro_rules! e2e_skip_unless_enabled {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    }};
}

/// A valid PDF with `pages` blank one-inch-square pages.
fn minimal_pdf(pages: usize) -> Vec<u8> {
    let mut objects = vec!["<< /Type /Catalog /Pages 2 0 R >>".to_string()];
    let kids: Vec<String> = (0..pages).map(|i| format!("{} 0 R", i + 3)).collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages
    ));
    for _ in 0..pages {
        objects.push("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 72 72] >>".to_string());
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        )
        .as_bytes(),
    );
    out
}

fn workspace(files: &[(&str, Vec<u8>)]) -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let uploads = tmp.path().join("uploads");
    let images = tmp.path().join("images");
    fs::create_dir(&uploads).unwrap();
    for (name, bytes) in files {
        fs::write(uploads.join(name), bytes).unwrap();
    }
    (tmp, uploads, images)
}

fn rasterizer() -> PdfiumRasterizer {
    PdfiumRasterizer::new().with_library_dir(env!("CARGO_MANIFEST_DIR"))
}

// ── Rasterizer ───────────────────────────────────────────────────────────────

#[test]
fn test_rasterize_renders_every_page_at_200_dpi() {
    e2e_skip_unless_enabled!();
    let (_tmp, uploads, _) = workspace(&[("square.pdf", minimal_pdf(3))]);

    let pages = rasterizer()
        .rasterize(&uploads.join("square.pdf"))
        .expect("rasterize should succeed");

    assert_eq!(pages.len(), 3);
    for page in &pages {
        // One inch at 200 DPI, allowing for rounding inside pdfium.
        assert!((199..=201).contains(&page.width()), "width {}", page.width());
        assert!((199..=201).contains(&page.height()), "height {}", page.height());
    }
}

#[test]
fn test_rasterize_corrupt_pdf() {
    e2e_skip_unless_enabled!();
    let (_tmp, uploads, _) =
        workspace(&[("broken.pdf", b"%PDF-1.4\nthis is not a document".to_vec())]);

    let err = rasterizer()
        .rasterize(&uploads.join("broken.pdf"))
        .unwrap_err();
    assert!(
        matches!(err, RasterizationError::CorruptPdf { .. }),
        "got {err:?}"
    );
}

// ── Full pipeline ────────────────────────────────────────────────────────────

#[test]
fn test_pipeline_report_pdf() {
    e2e_skip_unless_enabled!();
    let (_tmp, uploads, images) = workspace(&[("report.pdf", minimal_pdf(3))]);
    let config = PipelineConfig::builder()
        .input_dir(&uploads)
        .output_dir(&images)
        .build()
        .unwrap();

    let report = Pipeline::new(config, rasterizer()).run().unwrap();

    assert_eq!(report.stats.pages_written, 3);
    for i in 0..3 {
        let path = images.join(format!("report-slide-{i}.jpg"));
        let img = image::open(&path).expect("output should be a readable JPEG");
        assert!(img.width() > 0);
    }
}

#[test]
fn test_pipeline_stops_at_corrupt_pdf() {
    e2e_skip_unless_enabled!();
    let (_tmp, uploads, images) = workspace(&[
        ("a.pdf", minimal_pdf(1)),
        ("broken.pdf", b"%PDF-1.4\n\x00\x00garbage".to_vec()),
        ("c.pdf", minimal_pdf(2)),
    ]);
    let config = PipelineConfig::builder()
        .input_dir(&uploads)
        .output_dir(&images)
        .build()
        .unwrap();

    let err = Pipeline::new(config, rasterizer()).run().unwrap_err();

    assert!(matches!(err, Pdf2SlidesError::Rasterization(_)), "got {err:?}");
    assert!(images.join("a-slide-0.jpg").is_file());
    assert!(!images.join("c-slide-0.jpg").exists());
}
