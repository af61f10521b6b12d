//! Pipeline stages for PDF-to-JPEG conversion.
//!
//! Each submodule implements exactly one step, driven in order by
//! [`crate::convert::Pipeline`].
//!
//! ## Data Flow
//!
//! ```text
//! locate ──▶ render ──▶ write
//! (glob)     (pdfium)   (jpeg)
//! ```
//!
//! 1. [`locate`] — list `<input-dir>/*.<ext>` files; a missing directory is
//!    an empty list, not an error
//! 2. [`render`] — the [`render::Rasterizer`] seam and its PDFium-backed
//!    implementation
//! 3. [`write`]  — flatten each page to RGB and save it as
//!    `<base>-slide-<ordinal>.jpg`

pub mod locate;
pub mod render;
pub mod write;
