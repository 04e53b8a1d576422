//! Per-output-pixel synthesis status

use ndarray::Array2;

use crate::spatial::geometry::Coord;

/// Synthesis state of one output pixel
///
/// Progresses from unprocessed, to valued (the pixel is usable as a neighbor),
/// to valued with a known corpus source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    /// The pixel has been reached by the processing walk
    pub has_value: bool,
    /// Corpus position the pixel's value was copied from
    pub source: Option<Coord>,
}

impl Status {
    /// Whether a corpus source has been committed
    pub const fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

/// Grid of [`Status`] values, one per output pixel, initially all unprocessed
#[derive(Debug, Clone)]
pub struct StatusGrid {
    cells: Array2<Status>,
}

impl StatusGrid {
    /// Create a grid with every pixel unprocessed
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::default((height, width)),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.cells.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.cells.dim().0
    }

    /// Status at `point`, or `None` outside the grid
    pub fn get(&self, point: Coord) -> Option<&Status> {
        self.cells.get(point.to_index()?)
    }

    /// Mark `point` as reached by the processing walk
    pub fn mark_valued(&mut self, point: Coord) {
        if let Some(cell) = point.to_index().and_then(|index| self.cells.get_mut(index)) {
            cell.has_value = true;
        }
    }

    /// Record the committed corpus source of `point`
    pub fn commit(&mut self, point: Coord, source: Coord) {
        if let Some(cell) = point.to_index().and_then(|index| self.cells.get_mut(index)) {
            cell.has_value = true;
            cell.source = Some(source);
        }
    }

    /// Iterate over all statuses in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.cells.iter()
    }

    /// Number of pixels that have both a value and a source
    pub fn completed(&self) -> usize {
        self.cells
            .iter()
            .filter(|status| status.has_value && status.has_source())
            .count()
    }
}
