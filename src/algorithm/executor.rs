use tracing::debug;

use crate::{
    algorithm::cache::TriedGrid,
    algorithm::difference::DiffTable,
    algorithm::evaluator::{BestMatch, Evaluator},
    algorithm::neighbors::NeighborSet,
    algorithm::schedule::{OrderPolicy, PolishMode},
    io::configuration::{
        DEFAULT_AUTISM, DEFAULT_MAGIC, DEFAULT_NEIGHBORS, DEFAULT_POLISH, DEFAULT_TRIES,
        MAX_MAGIC, MAX_NEIGHBORS, MAX_ORDER_LENGTH, MAX_POLISH, MAX_TRIES,
    },
    io::error::{Result, SynthesisError, invalid_parameter},
    math::random::RandomSelector,
    spatial::{Canvas, Coord, OffsetList, StatusGrid, Tiling},
};

/// Channels taken into account when matching; a fourth (alpha) channel is ignored
pub const MATCHED_CHANNELS: usize = 3;

/// Synthesis parameters, immutable for the duration of a run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthesisConfig {
    /// Wrap-around of the output canvas during neighbor search
    pub tiling: Tiling,
    /// Outlier sensitivity of the difference table, in `[0, 1]`
    pub autism: f64,
    /// Neighbors matched per pixel
    pub neighbors: usize,
    /// Random corpus candidates per pixel
    pub tries: usize,
    /// Extra refinement passes
    pub polish: u32,
    /// Prefix decay of refinement passes, in 256ths
    pub magic: u32,
    /// Interpretation of `polish`
    pub polish_mode: PolishMode,
    /// Largest processing order the run may allocate
    pub order_limit: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            tiling: Tiling::BOTH,
            autism: f64::from(DEFAULT_AUTISM) / 256.0,
            neighbors: DEFAULT_NEIGHBORS,
            tries: DEFAULT_TRIES,
            polish: DEFAULT_POLISH,
            magic: DEFAULT_MAGIC,
            polish_mode: PolishMode::Bounded,
            order_limit: MAX_ORDER_LENGTH,
        }
    }
}

impl SynthesisConfig {
    /// Check every parameter against its documented range
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter that is out of range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.autism) {
            return Err(invalid_parameter(
                "autism",
                &self.autism,
                &"must be between 0 and 1",
            ));
        }
        if self.neighbors > MAX_NEIGHBORS {
            return Err(invalid_parameter(
                "neighbors",
                &self.neighbors,
                &format!("must be at most {MAX_NEIGHBORS}"),
            ));
        }
        if self.tries > MAX_TRIES {
            return Err(invalid_parameter(
                "tries",
                &self.tries,
                &format!("must be at most {MAX_TRIES}"),
            ));
        }
        if self.polish > MAX_POLISH {
            return Err(invalid_parameter(
                "polish",
                &self.polish,
                &format!("must be at most {MAX_POLISH}"),
            ));
        }
        if self.magic > MAX_MAGIC {
            return Err(invalid_parameter(
                "magic",
                &self.magic,
                &format!("must be at most {MAX_MAGIC}"),
            ));
        }
        Ok(())
    }

    /// Processing order policy derived from the polish parameters
    pub const fn order_policy(&self) -> OrderPolicy {
        OrderPolicy {
            polish: self.polish,
            magic: self.magic,
            mode: self.polish_mode,
            limit: self.order_limit,
        }
    }
}

/// Output canvas and per-pixel status of a finished run
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// Synthesized pixels
    pub output: Canvas,
    /// Final status of every output pixel
    pub status: StatusGrid,
}

/// Pixel-by-pixel texture synthesis driver
///
/// Owns all state of one run: the corpus, the output being written, the status
/// and tried grids, the offset list, the difference table and the processing
/// order. Each step synthesizes one entry of the order, walking it from the
/// back; the run is complete once the order is exhausted.
pub struct Resynthesizer {
    /// Run parameters
    pub config: SynthesisConfig,
    /// Source texture
    pub corpus: Canvas,
    /// Canvas being synthesized
    pub output: Canvas,
    /// Per-output-pixel status
    pub status: StatusGrid,
    /// Coherence candidate dedup
    pub tried: TriedGrid,
    /// Neighbor search order
    pub offsets: OffsetList,
    /// Channel difference costs
    pub diff_table: DiffTable,
    /// Output positions in processing order, consumed from the back
    pub order: Vec<Coord>,
    /// Neighbor buffer reused across steps
    pub neighbors: NeighborSet,
    /// Random number generator for shuffling and random candidates
    pub random_selector: RandomSelector,
    /// Number of steps performed, also the tried-grid step number of the next one
    pub iteration: usize,
    /// Channels compared and copied
    channels: usize,
    /// Most recently committed corpus position
    best_point: Coord,
}

impl Resynthesizer {
    /// Prepare a run synthesizing a `width x height` canvas from `corpus`
    ///
    /// The output keeps at most three channels of the corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The corpus or the output has zero area (nothing is allocated)
    /// - A parameter is out of range
    /// - The offset list or processing order cannot be allocated
    pub fn new(
        corpus: Canvas,
        width: usize,
        height: usize,
        config: SynthesisConfig,
        seed: u64,
    ) -> Result<Self> {
        if corpus.area() == 0 || width * height == 0 {
            return Err(SynthesisError::InvalidInputGeometry {
                corpus: (corpus.width(), corpus.height()),
                output: (width, height),
            });
        }
        config.validate()?;

        let channels = corpus.depth().min(MATCHED_CHANNELS);
        let mut random_selector = RandomSelector::new(seed);

        let offsets = OffsetList::build((corpus.width(), corpus.height()), (width, height))?;
        let diff_table = DiffTable::new(config.autism);
        let order = config
            .order_policy()
            .build(width, height, &mut random_selector)?;

        debug!(
            corpus_width = corpus.width(),
            corpus_height = corpus.height(),
            width,
            height,
            channels,
            offsets = offsets.len(),
            order = order.len(),
            "prepared synthesis run"
        );

        Ok(Self {
            output: Canvas::new(width, height, channels)?,
            status: StatusGrid::new(width, height),
            tried: TriedGrid::new(corpus.width(), corpus.height()),
            neighbors: NeighborSet::new(config.neighbors),
            config,
            corpus,
            offsets,
            diff_table,
            order,
            random_selector,
            iteration: 0,
            channels,
            best_point: Coord::default(),
        })
    }

    /// Total number of steps the run will perform
    pub const fn total_steps(&self) -> usize {
        self.iteration + self.order.len()
    }

    /// Whether every entry of the processing order has been synthesized
    pub const fn is_complete(&self) -> bool {
        self.order.is_empty()
    }

    /// Access the output canvas
    pub const fn output(&self) -> &Canvas {
        &self.output
    }

    /// Access the status grid
    pub const fn status(&self) -> &StatusGrid {
        &self.status
    }

    /// Channels compared and copied per pixel
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Synthesize the next pixel of the processing order
    ///
    /// Returns false once the order is exhausted.
    pub fn execute_step(&mut self) -> bool {
        let Some(position) = self.order.pop() else {
            return false;
        };
        let step = self.iteration;
        self.iteration += 1;

        // Valued before gathering so the pixel is its own first neighbor
        self.status.mark_valued(position);

        self.neighbors.gather(
            position,
            &self.offsets,
            &self.output,
            &self.status,
            self.config.tiling,
        );

        let evaluator = Evaluator::new(&self.corpus, &self.diff_table, self.channels);
        let neighbors = self.neighbors.as_slice();
        let mut best = BestMatch::new(self.best_point);

        for neighbor in neighbors {
            if best.is_exact() {
                break;
            }
            let Some(candidate) = neighbor.coherent_candidate() else {
                continue;
            };
            if !self.corpus.contains(candidate) {
                continue;
            }
            self.tried.try_once(candidate, step, || {
                evaluator.try_point(candidate, neighbors, &mut best);
            });
        }

        let corpus_area = self.corpus.area();
        let corpus_width = self.corpus.width();
        for _ in 0..self.config.tries {
            if best.is_exact() {
                break;
            }
            let candidate =
                Coord::from_raster_index(self.random_selector.index(corpus_area), corpus_width);
            evaluator.try_point(candidate, neighbors, &mut best);
        }

        self.commit(position, best.point);
        true
    }

    // Copies the corpus pixel at `source` into the output and records provenance.
    fn commit(&mut self, position: Coord, source: Coord) {
        if let Some(pixel) = self.corpus.pixel(source) {
            self.output.set_pixel(position, pixel);
        }
        self.status.commit(position, source);
        self.best_point = source;
    }

    /// Run every remaining step
    pub fn run_to_completion(&mut self) {
        while self.execute_step() {}
        debug!(
            steps = self.iteration,
            dedup_hits = self.tried.stats.hits,
            dedup_misses = self.tried.stats.misses,
            "synthesis run complete"
        );
    }

    /// Finish the run and hand over the output and final statuses
    pub fn finish(mut self) -> Synthesis {
        self.run_to_completion();
        Synthesis {
            output: self.output,
            status: self.status,
        }
    }
}

/// Synthesize a `width x height` canvas from `corpus` in one call
///
/// # Errors
///
/// Returns an error if the run cannot be prepared, see [`Resynthesizer::new`]
pub fn synthesize(
    corpus: Canvas,
    width: usize,
    height: usize,
    config: SynthesisConfig,
    seed: u64,
) -> Result<Synthesis> {
    Ok(Resynthesizer::new(corpus, width, height, config, seed)?.finish())
}
