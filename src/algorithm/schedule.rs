//! Processing order of output pixels
//!
//! The order is a shuffled raster of the output canvas, extended by polish
//! passes that re-append shrinking prefixes of a fresh shuffle. Pixels that
//! appear more than once are resynthesized with more context the later they
//! come up. The driver consumes the order from the back.

use std::fmt;
use std::str::FromStr;

use crate::io::configuration::MAX_POLISH;
use crate::io::error::{Result, SynthesisError, allocation_failure, invalid_parameter};
use crate::math::random::RandomSelector;
use crate::spatial::Coord;

/// How the number of polish passes is derived from the `polish` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolishMode {
    /// One shuffle, then `polish` passes that each reshuffle the base and
    /// append its shrinking prefixes; `polish == 0` is a plain permutation
    #[default]
    Bounded,
    /// The historical loop bound, which never ends for a non-zero `polish`
    ///
    /// `polish == 0` runs no pass at all, leaving the raster unshuffled. Any
    /// other value keeps appending until the order length limit is hit and the
    /// run fails with an allocation error.
    Legacy,
}

impl fmt::Display for PolishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded => f.write_str("bounded"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

impl FromStr for PolishMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounded" => Ok(Self::Bounded),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!(
                "unknown polish mode '{other}' (expected 'bounded' or 'legacy')"
            )),
        }
    }
}

/// Parameters controlling the processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPolicy {
    /// Extra refinement passes
    pub polish: u32,
    /// Prefix decay per appended chunk, in 256ths
    pub magic: u32,
    /// Pass-count interpretation
    pub mode: PolishMode,
    /// Upper bound on the order length, see [`OrderPolicy::effective_limit`]
    pub limit: usize,
}

impl OrderPolicy {
    /// Build the processing order for a `width x height` canvas
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The order would exceed its length limit or cannot be allocated
    /// - Legacy mode is asked for a pass loop that can never grow or end
    pub fn build(
        &self,
        width: usize,
        height: usize,
        selector: &mut RandomSelector,
    ) -> Result<Vec<Coord>> {
        let area = width * height;
        let limit = self.effective_limit(area);
        let mut order = Vec::new();
        order
            .try_reserve_exact(area)
            .map_err(|e| allocation_failure("processing order", area, &e))?;
        order.extend((0..area).map(|index| Coord::from_raster_index(index, width)));

        match self.mode {
            PolishMode::Bounded => {
                selector.shuffle(&mut order);
                for _ in 0..self.polish {
                    self.run_pass(&mut order, area, limit, selector)?;
                }
            }
            PolishMode::Legacy => {
                if self.polish == 0 {
                    return Ok(order);
                }
                if Self::pass_growth(area, self.magic) == 0 {
                    return Err(invalid_parameter(
                        "polish",
                        &self.polish,
                        &"legacy pass loop would never terminate: passes append nothing",
                    ));
                }
                while order.len() <= limit {
                    self.run_pass(&mut order, area, limit, selector)?;
                }
            }
        }

        Ok(order)
    }

    /// Largest order this policy may build for a canvas of `area` pixels
    ///
    /// The configured `limit`, further capped at the longest order bounded mode
    /// could produce with the same `magic` and the most polish passes allowed.
    pub fn effective_limit(&self, area: usize) -> usize {
        self.limit.min(Self::bounded_len(area, MAX_POLISH, self.magic))
    }

    /// Entries one pass appends to an order whose base covers `area` pixels
    pub fn pass_growth(area: usize, magic: u32) -> usize {
        if magic == 0 {
            return 0;
        }
        let mut total = 0;
        let mut n = area;
        loop {
            n = n * magic as usize / 256;
            if n == 0 {
                return total;
            }
            total += n;
        }
    }

    /// Length of a bounded-mode order for a canvas of `area` pixels
    pub fn bounded_len(area: usize, polish: u32, magic: u32) -> usize {
        area.saturating_add((polish as usize).saturating_mul(Self::pass_growth(area, magic)))
    }

    // Shuffles the base prefix, then appends its shrinking prefixes.
    fn run_pass(
        &self,
        order: &mut Vec<Coord>,
        area: usize,
        limit: usize,
        selector: &mut RandomSelector,
    ) -> Result<()> {
        if let Some(base) = order.get_mut(..area) {
            selector.shuffle(base);
        }

        if self.magic == 0 {
            return Ok(());
        }

        let mut n = area;
        loop {
            n = n * self.magic as usize / 256;
            if n == 0 {
                return Ok(());
            }

            let requested = order.len() + n;
            if requested > limit {
                return Err(SynthesisError::AllocationFailure {
                    buffer: "processing order",
                    requested,
                    reason: format!("exceeds the limit of {limit} entries"),
                });
            }
            order
                .try_reserve(n)
                .map_err(|e| allocation_failure("processing order", requested, &e))?;
            order.extend_from_within(..n);
        }
    }
}
