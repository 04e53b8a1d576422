//! Decoding corpus images and encoding synthesized canvases

use image::{DynamicImage, ExtendedColorType, ImageFormat};
use std::path::Path;

use crate::io::error::{Result, SynthesisError, WithPath};
use crate::spatial::Canvas;

/// Convert a decoded image into a canvas, keeping its channel count
///
/// 8-bit gray, gray-alpha, RGB and RGBA images map to 1 to 4 channels
/// directly; anything else is converted to 8-bit RGBA first.
///
/// # Errors
///
/// Returns an error if the pixel buffer doesn't match the image dimensions
pub fn canvas_from_image(img: DynamicImage) -> Result<Canvas> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (depth, data) = match img {
        DynamicImage::ImageLuma8(buffer) => (1, buffer.into_raw()),
        DynamicImage::ImageLumaA8(buffer) => (2, buffer.into_raw()),
        DynamicImage::ImageRgb8(buffer) => (3, buffer.into_raw()),
        DynamicImage::ImageRgba8(buffer) => (4, buffer.into_raw()),
        other => (4, other.to_rgba8().into_raw()),
    };
    Canvas::from_raw(width, height, depth, data)
}

/// Load a corpus image from disk
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_corpus(path: &Path) -> Result<Canvas> {
    let img = image::open(path).with_path(path)?;
    canvas_from_image(img)
}

/// Save a canvas as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let color = match canvas.depth() {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        _ => ExtendedColorType::Rgba8,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let (width, height) = (canvas.width() as u32, canvas.height() as u32);
    let data = canvas.view().iter().copied().collect::<Vec<u8>>();
    image::save_buffer_with_format(path, &data, width, height, color, ImageFormat::Png).map_err(
        |e| SynthesisError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        },
    )
}
