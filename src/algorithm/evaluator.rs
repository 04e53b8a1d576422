//! Candidate scoring with branch-and-bound pruning
//!
//! A candidate corpus position is scored by laying the gathered neighbor
//! offsets over the corpus around it and summing per-channel difference costs.
//! Every term is non-negative, so scoring stops as soon as the running sum
//! reaches the best total seen so far.

use crate::algorithm::difference::{Cost, DiffTable};
use crate::algorithm::neighbors::Neighbor;
use crate::spatial::{Canvas, Coord};

/// Cheapest candidate seen during one pixel's search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch {
    /// Total cost of `point`, `Cost::MAX` before any candidate was accepted
    pub cost: Cost,
    /// Winning corpus position
    pub point: Coord,
}

impl BestMatch {
    /// Start a search whose fallback is `point`
    pub const fn new(point: Coord) -> Self {
        Self {
            cost: Cost::MAX,
            point,
        }
    }

    /// Whether a perfect match has been found
    pub const fn is_exact(&self) -> bool {
        self.cost == 0
    }
}

/// Scores corpus positions against a neighbor context
pub struct Evaluator<'a> {
    corpus: &'a Canvas,
    table: &'a DiffTable,
    channels: usize,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator comparing the first `channels` channels
    pub fn new(corpus: &'a Canvas, table: &'a DiffTable, channels: usize) -> Self {
        Self {
            corpus,
            table,
            channels: channels.min(corpus.depth()),
        }
    }

    /// Cost of one neighbor's contribution for a candidate at `candidate`
    ///
    /// Neighbor 0 is the target pixel itself and contributes nothing unless its
    /// corpus counterpart falls outside the corpus.
    fn term(&self, candidate: Coord, index: usize, neighbor: &Neighbor) -> Cost {
        let Some(corpus_pixel) = self.corpus.pixel(candidate + neighbor.offset) else {
            return self.table.out_of_range() * self.channels as Cost;
        };
        if index == 0 {
            return 0;
        }
        self.table.pixel_cost(
            neighbor.value.channels(self.channels),
            corpus_pixel.channels(self.channels),
        )
    }

    /// Total cost of `candidate`, abandoning once it reaches `bound`
    ///
    /// Returns `None` when the partial sum reaches `bound` after any neighbor,
    /// otherwise the complete total, which is then below `bound`.
    pub fn cost_within(&self, candidate: Coord, neighbors: &[Neighbor], bound: Cost) -> Option<Cost> {
        let mut sum: Cost = 0;
        for (index, neighbor) in neighbors.iter().enumerate() {
            sum += self.term(candidate, index, neighbor);
            if sum >= bound {
                return None;
            }
        }
        (sum < bound).then_some(sum)
    }

    /// Total cost of `candidate` without pruning
    pub fn full_cost(&self, candidate: Coord, neighbors: &[Neighbor]) -> Cost {
        neighbors
            .iter()
            .enumerate()
            .map(|(index, neighbor)| self.term(candidate, index, neighbor))
            .sum()
    }

    /// Score `candidate` and make it the best match if strictly cheaper
    ///
    /// Returns whether `best` was replaced.
    pub fn try_point(&self, candidate: Coord, neighbors: &[Neighbor], best: &mut BestMatch) -> bool {
        match self.cost_within(candidate, neighbors, best.cost) {
            Some(cost) => {
                best.cost = cost;
                best.point = candidate;
                true
            }
            None => false,
        }
    }
}
