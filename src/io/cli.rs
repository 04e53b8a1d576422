//! Command-line interface for batch texture resynthesis

use crate::algorithm::executor::{Resynthesizer, SynthesisConfig};
use crate::algorithm::schedule::PolishMode;
use crate::io::configuration::{
    DEFAULT_AUTISM, DEFAULT_MAGIC, DEFAULT_NEIGHBORS, DEFAULT_POLISH, DEFAULT_SCALE, DEFAULT_SEED,
    DEFAULT_TRIES, MAX_AUTISM, MAX_MAGIC, MAX_NEIGHBORS, MAX_POLISH, MAX_RADIUS, MAX_SCALE,
    MAX_TRIES, MIN_SCALE, OUTPUT_SUFFIX, PROGRESS_REFRESH_STEPS, circle_neighborhood,
    output_dimensions, square_neighborhood,
};
use crate::io::error::{Result, SynthesisError};
use crate::io::image::{load_corpus, save_png};
use crate::io::progress::ProgressManager;
use crate::math::random::resolve_seed;
use crate::spatial::Tiling;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{Level, debug, error, info, warn};

/// File extensions picked up when a directory is given
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Parser)]
#[command(name = "resynth")]
#[command(
    author,
    version,
    about = "Resynthesize textures from example images",
    allow_negative_numbers = true
)]
/// Command-line arguments for the resynthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Image files (or directories of images) to resynthesize; each result is
    /// saved as {name}.resynth.png
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Sensitivity to outliers, in 256ths [0, 256]
    #[arg(short, long, default_value_t = DEFAULT_AUTISM as i64)]
    pub autism: i64,

    /// Points to use when sampling [0, 1093]
    #[arg(short = 'N', long)]
    pub neighbors: Option<i64>,

    /// Square neighborhood radius, overrides --neighbors [0, 32]
    #[arg(short, long)]
    pub radius: Option<i64>,

    /// Circle neighborhood radius, overrides --radius and --neighbors [1, 128]
    #[arg(short = 'R', long)]
    pub circle_radius: Option<i64>,

    /// Random points added to candidates [0, 65536]
    #[arg(short = 'M', long, default_value_t = DEFAULT_TRIES as i64)]
    pub tries: i64,

    /// Extra refinement passes [0, 9]
    #[arg(short, long, default_value_t = i64::from(DEFAULT_POLISH))]
    pub polish: i64,

    /// Decay of refinement pass lengths, in 256ths [0, 255]
    #[arg(short, long, default_value_t = i64::from(DEFAULT_MAGIC))]
    pub magic: i64,

    /// Output size multiplier; negative values set width and height [-8192, 32]
    #[arg(short, long, default_value_t = i64::from(DEFAULT_SCALE))]
    pub scale: i64,

    /// Random seed; 0 derives one from the current time
    #[arg(short = 'S', long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Interpretation of --polish: "bounded" or "legacy"
    #[arg(long, default_value_t = PolishMode::Bounded)]
    pub polish_mode: PolishMode,

    /// Disable horizontal wrap-around of the output
    #[arg(long)]
    pub no_h_tile: bool,

    /// Disable vertical wrap-around of the output
    #[arg(long)]
    pub no_v_tile: bool,

    /// Suppress progress output and informational logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Log run details
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip inputs whose output file already exists
    #[arg(long)]
    pub skip_existing: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by --quiet and --verbose
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            Level::WARN
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Neighbor count after applying neighborhood options and clamping
    ///
    /// A circle radius takes precedence over a square radius, which takes
    /// precedence over an explicit count. Large square neighborhoods are cut
    /// down to the largest accepted count.
    pub fn neighbor_count(&self) -> usize {
        if let Some(radius) = self.circle_radius {
            return circle_neighborhood(clamp_to_usize(radius, 1, usize::MAX));
        }
        if let Some(radius) = self.radius {
            let side = clamp_to_usize(radius, 0, MAX_RADIUS);
            return square_neighborhood(side).min(MAX_NEIGHBORS);
        }
        self.neighbors.map_or(DEFAULT_NEIGHBORS, |count| {
            clamp_to_usize(count, 0, MAX_NEIGHBORS)
        })
    }

    /// Scale clamped into its accepted range
    pub fn clamped_scale(&self) -> i32 {
        self.scale.clamp(i64::from(MIN_SCALE), i64::from(MAX_SCALE)) as i32
    }

    /// Synthesis parameters with every value clamped into range
    pub fn synthesis_config(&self) -> SynthesisConfig {
        let autism = self.autism.clamp(0, i64::from(MAX_AUTISM));
        SynthesisConfig {
            tiling: Tiling {
                horizontal: !self.no_h_tile,
                vertical: !self.no_v_tile,
            },
            autism: autism as f64 / 256.0,
            neighbors: self.neighbor_count(),
            tries: clamp_to_usize(self.tries, 0, MAX_TRIES),
            polish: self.polish.clamp(0, i64::from(MAX_POLISH)) as u32,
            magic: self.magic.clamp(0, i64::from(MAX_MAGIC)) as u32,
            polish_mode: self.polish_mode,
            ..SynthesisConfig::default()
        }
    }
}

// The output path on stdout is meant for scripts
#[allow(clippy::print_stdout)]
fn report_output(path: &Path) {
    println!("{}", path.display());
}

fn clamp_to_usize(value: i64, min: usize, max: usize) -> usize {
    let value = usize::try_from(value.max(0)).unwrap_or(usize::MAX);
    value.clamp(min, max)
}

/// Outcome counts of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Files resynthesized and saved
    pub processed: usize,
    /// Files skipped because their output exists
    pub skipped: usize,
    /// Files that failed to load, synthesize or save
    pub failed: usize,
}

/// Orchestrates batch resynthesis with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Resynthesize every input file
    ///
    /// A failing file is logged and counted; the remaining files are still
    /// processed.
    pub fn process(&mut self) -> ProcessSummary {
        let mut summary = ProcessSummary::default();
        let files = self.collect_files(&mut summary);

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            match self.process_file(file, index) {
                Ok(output_path) => {
                    summary.processed += 1;
                    report_output(&output_path);
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("{}: {e}", file.display());
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.complete_file(index, false);
                    }
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        summary
    }

    fn collect_files(&self, summary: &mut ProcessSummary) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for target in &self.cli.files {
            if target.is_dir() {
                match Self::images_in_directory(target) {
                    Ok(found) => files.extend(found),
                    Err(e) => {
                        summary.failed += 1;
                        error!("{}: {e}", target.display());
                    }
                }
            } else {
                files.push(target.clone());
            }
        }

        files.retain(|path| {
            if self.cli.skip_existing && Self::get_output_path(path).exists() {
                warn!("Skipping: {} (output exists)", path.display());
                summary.skipped += 1;
                false
            } else {
                true
            }
        });
        files
    }

    /// Image files directly inside `dir`, sorted, excluding previous outputs
    ///
    /// # Errors
    ///
    /// Returns a file system error naming `dir` if it cannot be listed
    pub fn images_in_directory(dir: &Path) -> Result<Vec<PathBuf>> {
        let listing_error = |source| SynthesisError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read directory",
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(listing_error)? {
            let path = entry.map_err(listing_error)?.path();
            let is_image = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            let is_output = path
                .to_str()
                .is_some_and(|name| name.ends_with(OUTPUT_SUFFIX));
            if path.is_file() && is_image && !is_output {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<PathBuf> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let corpus = load_corpus(input_path)?;
        let (width, height) =
            output_dimensions(self.cli.clamped_scale(), corpus.width(), corpus.height());
        let seed = resolve_seed(self.cli.seed);
        debug!(
            file = %input_path.display(),
            seed,
            width,
            height,
            "starting resynthesis"
        );

        let mut executor =
            Resynthesizer::new(corpus, width, height, self.cli.synthesis_config(), seed)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, executor.total_steps());
        }

        while executor.execute_step() {
            if executor.iteration % PROGRESS_REFRESH_STEPS == 0 {
                if let Some(ref mut pm) = self.progress_manager {
                    pm.update_steps(index, executor.iteration);
                }
            }
        }

        save_png(executor.output(), &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, true);
        }
        info!(
            "{} -> {} in {:.2?}",
            input_path.display(),
            output_path.display(),
            start_time.elapsed()
        );

        Ok(output_path)
    }

    /// Output path for an input: the extension is replaced by `.resynth.png`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        input_path.with_extension(OUTPUT_SUFFIX.trim_start_matches('.'))
    }
}
