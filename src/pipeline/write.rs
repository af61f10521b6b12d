//! Image writing: persist a rendered page as `<base>-slide-<ordinal>.jpg`.
//!
//! JPEG carries no alpha channel, and PDFium hands back RGBA bitmaps, so
//! every page is flattened to 8-bit RGB before encoding. Existing files with
//! the same name are overwritten.

use crate::error::WriteError;
use crate::pipeline::render::PageImage;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JPEG quality used for every page.
pub const JPEG_QUALITY: u8 = 75;

/// File name for page `ordinal` of the source whose base name is `base`.
pub fn output_file_name(base: &OsStr, ordinal: usize) -> OsString {
    let mut name = base.to_os_string();
    name.push(format!("-slide-{ordinal}.jpg"));
    name
}

/// Encode `page` as JPEG into `output_dir`, returning the written path.
///
/// The page is encoded in memory first, so an encoding failure leaves any
/// existing file at the target path untouched. The directory must already
/// exist; see [`crate::config::PipelineConfig::create_output_dir`].
pub fn write_page(page: &PageImage, base: &OsStr, output_dir: &Path) -> Result<PathBuf, WriteError> {
    let path = output_dir.join(output_file_name(base, page.ordinal));

    let rgb = DynamicImage::ImageRgb8(page.image.to_rgb8());
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))
        .map_err(|source| WriteError::Encode {
            path: path.clone(),
            source,
        })?;

    fs::write(&path, &jpeg).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound && !output_dir.is_dir() {
            WriteError::OutputDirMissing {
                path: output_dir.to_path_buf(),
            }
        } else {
            WriteError::Create {
                path: path.clone(),
                source,
            }
        }
    })?;

    debug!(
        "Wrote {} ({}x{} px, {} bytes)",
        path.display(),
        rgb.width(),
        rgb.height(),
        jpeg.len()
    );
    Ok(path)
}
