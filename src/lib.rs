//! Texture resynthesis by randomized neighborhood matching
//!
//! Fills an output canvas pixel by pixel with content drawn from a corpus image.
//! Each pixel is matched against its already-synthesized neighbors, trying
//! corpus positions suggested by those neighbors' provenance plus a batch of
//! uniformly random corpus positions, and keeping the cheapest under a robust
//! per-channel difference cost.

#![forbid(unsafe_code)]

/// Synthesis engine: difference table, candidate search and the run driver
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Numeric helpers for robust costs and seeded randomness
pub mod math;
/// Coordinates, pixel buffers and per-pixel bookkeeping grids
pub mod spatial;

pub use io::error::{Result, SynthesisError};
