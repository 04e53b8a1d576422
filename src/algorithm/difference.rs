//! Robust per-channel difference costs
//!
//! Precomputes the cost of every signed byte delta once per run. Costs are
//! fixed point with `COST_SCALE` representing a full-range mismatch.

use crate::math::robust::normalized_cauchy_cost;

/// Accumulated match cost
pub type Cost = u64;

/// Fixed-point cost of a maximal single-channel mismatch
pub const COST_SCALE: Cost = 65_536;

// Deltas -256..=255, indexed by delta + 256. Slot 0 (delta -256) never occurs
// for byte inputs and doubles as the out-of-range penalty.
const TABLE_OFFSET: i32 = 256;
const TABLE_LEN: usize = 512;

/// Cost of each signed channel delta for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTable {
    costs: [Cost; TABLE_LEN],
}

impl DiffTable {
    /// Build the table for an outlier sensitivity in `[0, 1]`
    ///
    /// A positive `autism` uses the normalised Cauchy penalty, which saturates
    /// for large deltas. Zero turns the table into an exact-equality test:
    /// nothing for a zero delta, the full scale for anything else.
    pub fn new(autism: f64) -> Self {
        let mut costs = [0; TABLE_LEN];
        for (slot, delta) in costs.iter_mut().zip(-TABLE_OFFSET..TABLE_OFFSET) {
            *slot = if autism > 0.0 {
                normalized_cauchy_cost(delta, autism, COST_SCALE as f64) as Cost
            } else if delta == 0 {
                0
            } else {
                COST_SCALE
            };
        }
        Self { costs }
    }

    /// Cost of a single channel differing by `delta`
    ///
    /// Deltas outside `-256..=255` are clamped to the nearest end.
    pub fn cost(&self, delta: i32) -> Cost {
        let index = (delta + TABLE_OFFSET).clamp(0, TABLE_LEN as i32 - 1) as usize;
        self.costs.get(index).copied().unwrap_or(COST_SCALE)
    }

    /// Penalty for one channel of a neighbor with no corpus counterpart
    pub fn out_of_range(&self) -> Cost {
        self.costs.first().copied().unwrap_or(COST_SCALE)
    }

    /// Sum of channel costs over the channels both slices carry
    pub fn pixel_cost(&self, observed: &[u8], corpus: &[u8]) -> Cost {
        observed
            .iter()
            .zip(corpus)
            .map(|(&o, &c)| self.cost(i32::from(o) - i32::from(c)))
            .sum()
    }
}
