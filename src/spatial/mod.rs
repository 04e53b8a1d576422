//! Spatial data structures for synthesis
//!
//! This module contains spatial-related functionality including:
//! - Coordinate arithmetic and axis tiling
//! - Channel-interleaved pixel buffers
//! - Per-pixel status bookkeeping
//! - The distance-sorted neighbor offset list

/// Byte-per-channel image buffers and pixel values
pub mod canvas;
/// Coordinate arithmetic, bounds checks and tiling
pub mod geometry;
/// Relative offsets sorted nearest first
pub mod offsets;
/// Per-output-pixel value and provenance tracking
pub mod status;

pub use canvas::{Canvas, Pixel};
pub use geometry::{Coord, Tiling};
pub use offsets::OffsetList;
pub use status::{Status, StatusGrid};
