//! Relative offsets ordered nearest first
//!
//! Neighbor search walks this list from the start and stops after collecting
//! enough already-synthesized pixels, so the closest known pixels are always
//! the ones that take part in matching.

use crate::io::error::{Result, allocation_failure};
use crate::spatial::geometry::Coord;

/// Every offset spanning the overlap of corpus and output, sorted by squared length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetList {
    offsets: Vec<Coord>,
}

impl OffsetList {
    /// Build the offset list for the given corpus and output dimensions
    ///
    /// With `w = min(corpus_w, output_w)` and `h = min(corpus_h, output_h)`, the
    /// list holds every `(x, y)` with `|x| < w` and `|y| < h`, sorted ascending
    /// by `x² + y²`. Ties keep generation order (rows top to bottom, columns left
    /// to right), which makes the ordering deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be allocated
    pub fn build(corpus: (usize, usize), output: (usize, usize)) -> Result<Self> {
        let width = corpus.0.min(output.0) as i32;
        let height = corpus.1.min(output.1) as i32;

        let count = Self::expected_len(corpus, output);
        let mut offsets = Vec::new();
        offsets
            .try_reserve_exact(count)
            .map_err(|e| allocation_failure("offset list", count, &e))?;

        for y in (-height + 1)..height {
            for x in (-width + 1)..width {
                offsets.push(Coord::new(x, y));
            }
        }

        offsets.sort_by_key(|offset| offset.norm_squared());

        Ok(Self { offsets })
    }

    /// Number of offsets a list built for these dimensions contains
    pub fn expected_len(corpus: (usize, usize), output: (usize, usize)) -> usize {
        let width = corpus.0.min(output.0);
        let height = corpus.1.min(output.1);
        if width == 0 || height == 0 {
            return 0;
        }
        (2 * width - 1) * (2 * height - 1)
    }

    /// Offsets in search order
    pub fn as_slice(&self) -> &[Coord] {
        &self.offsets
    }

    /// Number of offsets
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
