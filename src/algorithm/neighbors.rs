//! Nearest-first gathering of already-synthesized output pixels
//!
//! The gathered neighbors form the context every candidate is scored against.
//! Each neighbor carries its offset from the target pixel, the value it had
//! when gathered and, when known, the corpus position that value came from.

use crate::spatial::{Canvas, Coord, OffsetList, Pixel, StatusGrid, Tiling};

/// One known pixel near the pixel being synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Offset from the target pixel
    pub offset: Coord,
    /// Output value at the neighbor
    pub value: Pixel,
    /// Corpus position the neighbor was copied from, if committed
    pub source: Option<Coord>,
}

impl Neighbor {
    /// Corpus position that would continue this neighbor's source at the target
    ///
    /// `None` when the neighbor has no source yet. The result may fall outside
    /// the corpus.
    pub fn coherent_candidate(&self) -> Option<Coord> {
        self.source.map(|source| source - self.offset)
    }
}

/// Reusable buffer of up to `capacity` gathered neighbors
#[derive(Debug, Clone)]
pub struct NeighborSet {
    neighbors: Vec<Neighbor>,
    capacity: usize,
}

impl NeighborSet {
    /// Create an empty set that gathers at most `capacity` neighbors
    pub fn new(capacity: usize) -> Self {
        Self {
            neighbors: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Gathered neighbors, nearest first
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// Replace the contents with the neighbors of `position`
    ///
    /// Walks `offsets` in order, wrapping or clipping each candidate position
    /// against the output canvas, and keeps those already marked as valued.
    /// Stops once `capacity` neighbors are held or the offsets run out. The
    /// target itself is valued before gathering, so with a non-zero capacity the
    /// first neighbor is always the zero offset.
    pub fn gather(
        &mut self,
        position: Coord,
        offsets: &OffsetList,
        output: &Canvas,
        status: &StatusGrid,
        tiling: Tiling,
    ) {
        self.neighbors.clear();
        if self.capacity == 0 {
            return;
        }

        let (width, height) = (output.width(), output.height());
        for &offset in offsets.as_slice() {
            let mut point = position + offset;
            if !crate::spatial::geometry::wrap_or_clip(&mut point, tiling, width, height) {
                continue;
            }

            let Some(cell) = status.get(point) else {
                continue;
            };
            if !cell.has_value {
                continue;
            }

            self.neighbors.push(Neighbor {
                offset,
                value: output.pixel(point).unwrap_or_default(),
                source: cell.source,
            });
            if self.neighbors.len() >= self.capacity {
                break;
            }
        }
    }
}
