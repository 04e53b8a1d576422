use ndarray::Array2;

use crate::spatial::geometry::Coord;

/// Marker for a corpus pixel never evaluated during this run
pub const UNTRIED: i64 = -1;

/// Per-corpus-pixel record of the last search step that evaluated it
///
/// Each output pixel's search gets a fresh, strictly increasing step number.
/// A corpus pixel counts as tried only when its mark equals the current step,
/// so moving on to the next pixel invalidates every mark without clearing the
/// grid.
pub struct TriedGrid {
    marks: Array2<i64>,

    /// Dedup performance statistics
    pub stats: CacheStats,
}

/// Effectiveness of the coherence-candidate dedup
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Candidates skipped because they were already evaluated this step
    pub hits: usize,
    /// Candidates evaluated and marked
    pub misses: usize,
}

impl TriedGrid {
    /// Create a grid sized to the corpus with every entry untried
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            marks: Array2::from_elem((height, width), UNTRIED),
            stats: CacheStats::default(),
        }
    }

    /// Check whether `point` was already evaluated during `step`
    ///
    /// Points outside the grid are never tried.
    pub fn is_tried(&self, point: Coord, step: usize) -> bool {
        point
            .to_index()
            .and_then(|index| self.marks.get(index))
            .is_some_and(|&mark| mark == step as i64)
    }

    /// Record that `point` has been evaluated during `step`
    pub fn mark(&mut self, point: Coord, step: usize) {
        if let Some(mark) = point.to_index().and_then(|index| self.marks.get_mut(index)) {
            *mark = step as i64;
        }
    }

    /// Evaluate `point` once per step
    ///
    /// Runs `evaluate` and marks the point unless it was already marked for
    /// `step`, in which case nothing happens. Returns whether `evaluate` ran.
    pub fn try_once<F>(&mut self, point: Coord, step: usize, evaluate: F) -> bool
    where
        F: FnOnce(),
    {
        if self.is_tried(point, step) {
            self.stats.hits += 1;
            return false;
        }
        self.stats.misses += 1;
        evaluate();
        self.mark(point, step);
        true
    }
}
