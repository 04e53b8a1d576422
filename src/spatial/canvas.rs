//! Channel-interleaved byte image buffers
//!
//! A canvas stores `height x width x depth` bytes in row-major order, one byte
//! per channel. Both the corpus and the synthesized output are canvases; the
//! synthesis engine reads and writes whole pixels through [`Pixel`].

use ndarray::{Array3, ArrayView3};

use crate::io::error::{Result, SynthesisError};
use crate::spatial::geometry::Coord;

/// Largest number of channels a pixel can carry
pub const MAX_CHANNELS: usize = 4;

/// Up to four channel bytes of a single pixel
///
/// Channels beyond the owning canvas' depth are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel(pub [u8; MAX_CHANNELS]);

impl Pixel {
    /// Red, or luminance for one and two channel images
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    /// Green, or alpha for two channel images
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Alpha for four channel images
    pub const fn a(self) -> u8 {
        self.0[3]
    }

    /// Channel value, zero for channels the pixel does not carry
    pub fn channel(self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(0)
    }

    /// The first `depth` channels
    pub fn channels(&self, depth: usize) -> &[u8] {
        self.0.get(..depth.min(MAX_CHANNELS)).unwrap_or(&[])
    }
}

/// Byte-per-channel image buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Array3<u8>,
}

impl Canvas {
    /// Allocate a zero-filled canvas
    ///
    /// Zero-area canvases are allowed here; the synthesis driver rejects them.
    ///
    /// # Errors
    ///
    /// Returns an error if `depth` is not in `1..=4`
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self> {
        validate_depth(depth)?;
        Ok(Self {
            pixels: Array3::zeros((height, width, depth)),
        })
    }

    /// Wrap a row-major, channel-interleaved byte buffer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `depth` is not in `1..=4`
    /// - The buffer length differs from `width * height * depth`
    pub fn from_raw(width: usize, height: usize, depth: usize, data: Vec<u8>) -> Result<Self> {
        validate_depth(depth)?;
        let expected = width * height * depth;
        if data.len() != expected {
            return Err(SynthesisError::InvalidSourceData {
                reason: format!(
                    "buffer holds {} bytes, {width}x{height}x{depth} needs {expected}",
                    data.len()
                ),
            });
        }
        let pixels = Array3::from_shape_vec((height, width, depth), data).map_err(|e| {
            SynthesisError::InvalidSourceData {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Channels per pixel
    pub fn depth(&self) -> usize {
        self.pixels.dim().2
    }

    /// Number of pixels
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Check whether `point` addresses a pixel of this canvas
    pub fn contains(&self, point: Coord) -> bool {
        point.within(self.width(), self.height())
    }

    /// Read a pixel, or `None` when `point` is outside the canvas
    pub fn pixel(&self, point: Coord) -> Option<Pixel> {
        let (row, col) = point.to_index()?;
        if row >= self.height() || col >= self.width() {
            return None;
        }
        let mut pixel = Pixel::default();
        for (channel, slot) in pixel.0.iter_mut().enumerate().take(self.depth()) {
            *slot = self.pixels.get((row, col, channel)).copied().unwrap_or(0);
        }
        Some(pixel)
    }

    /// Write the first `depth` channels of `pixel` at `point`
    ///
    /// Returns false when `point` is outside the canvas.
    pub fn set_pixel(&mut self, point: Coord, pixel: Pixel) -> bool {
        let Some((row, col)) = point.to_index() else {
            return false;
        };
        if row >= self.height() || col >= self.width() {
            return false;
        }
        let depth = self.depth();
        for (channel, &value) in pixel.channels(depth).iter().enumerate() {
            if let Some(slot) = self.pixels.get_mut((row, col, channel)) {
                *slot = value;
            }
        }
        true
    }

    /// Replace the contents with a zero-filled buffer of new dimensions
    ///
    /// The previous buffer is dropped; nothing of it survives.
    ///
    /// # Errors
    ///
    /// Returns an error if `depth` is not in `1..=4`
    pub fn reallocate(&mut self, width: usize, height: usize, depth: usize) -> Result<()> {
        validate_depth(depth)?;
        self.pixels = Array3::zeros((height, width, depth));
        Ok(())
    }

    /// Borrow the underlying `(height, width, depth)` array
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Consume the canvas and return its row-major byte buffer
    pub fn into_raw(self) -> Vec<u8> {
        if self.pixels.is_standard_layout() {
            self.pixels.into_raw_vec_and_offset().0
        } else {
            self.pixels.iter().copied().collect()
        }
    }
}

fn validate_depth(depth: usize) -> Result<()> {
    if (1..=MAX_CHANNELS).contains(&depth) {
        Ok(())
    } else {
        Err(crate::io::error::invalid_parameter(
            "depth",
            &depth,
            &"channel count must be between 1 and 4",
        ))
    }
}
