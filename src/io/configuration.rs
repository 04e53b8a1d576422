//! Synthesis constants and runtime configuration defaults

// Default values for configurable parameters
/// Default outlier sensitivity, in 256ths
pub const DEFAULT_AUTISM: u32 = 32;
/// Default number of neighbors matched per pixel
pub const DEFAULT_NEIGHBORS: usize = 29;
/// Default number of random corpus candidates per pixel
pub const DEFAULT_TRIES: usize = 192;
/// Default number of extra polish passes
pub const DEFAULT_POLISH: u32 = 0;
/// Default polish prefix decay, in 256ths (3/4)
pub const DEFAULT_MAGIC: u32 = 192;
/// Default output size multiplier
pub const DEFAULT_SCALE: i32 = 1;
/// Seed value meaning "derive from the wall clock"
pub const DEFAULT_SEED: u64 = 0;

// Accepted ranges; the CLI clamps into these, the core rejects values outside
/// Largest outlier sensitivity, in 256ths
pub const MAX_AUTISM: u32 = 256;
/// Largest random candidate count
pub const MAX_TRIES: usize = 65_536;
/// Largest polish pass count
pub const MAX_POLISH: u32 = 9;
/// Largest polish prefix decay
pub const MAX_MAGIC: u32 = 255;
/// Smallest scale (a 8192 pixel square)
pub const MIN_SCALE: i32 = -8192;
/// Largest scale multiplier
pub const MAX_SCALE: i32 = 32;
/// Largest square neighborhood radius
pub const MAX_RADIUS: usize = 32;

/// Output side length used when the scale is 0
pub const FALLBACK_OUTPUT_SIDE: usize = 256;

// Polish passes duplicate entries; each run is further capped by its canvas area
/// Absolute ceiling on the number of entries in a processing order
pub const MAX_ORDER_LENGTH: usize = 1 << 30;

/// Number of lattice points within circles of growing radius (OEIS A057961)
///
/// Entry `r - 1` is the neighbor count of a circular neighborhood of radius `r`.
pub const DISC_SIZES: [usize; 128] = [
    1, 5, 9, 13, 21, 25, 29, 37, 45, 49, 57, 61, 69, 81, 89, 97, 101, 109, 113, 121, 129, 137,
    145, 149, 161, 169, 177, 185, 193, 197, 213, 221, 225, 233, 241, 249, 253, 261, 277, 285, 293,
    301, 305, 317, 325, 333, 341, 349, 357, 365, 373, 377, 385, 401, 405, 421, 429, 437, 441, 457,
    465, 473, 481, 489, 497, 505, 509, 517, 529, 545, 553, 561, 569, 577, 593, 601, 609, 613, 621,
    633, 641, 657, 665, 673, 681, 697, 709, 717, 725, 733, 741, 749, 757, 761, 769, 777, 793, 797,
    805, 821, 829, 845, 853, 861, 869, 877, 885, 889, 901, 917, 925, 933, 941, 949, 965, 973, 981,
    989, 997, 1005, 1009, 1033, 1041, 1049, 1057, 1069, 1085, 1093,
];

/// Largest neighbor count, the biggest circular neighborhood
pub const MAX_NEIGHBORS: usize = DISC_SIZES[DISC_SIZES.len() - 1];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Synthesis steps between progress bar refreshes
pub const PROGRESS_REFRESH_STEPS: usize = 4096;

// Output settings
/// Replaces the input extension to form the output filename
pub const OUTPUT_SUFFIX: &str = ".resynth.png";

/// Output canvas dimensions for a corpus of `width x height`
///
/// A positive scale multiplies the corpus dimensions, a negative one gives a
/// square of side `|scale|`, and zero falls back to a 256 pixel square.
pub const fn output_dimensions(scale: i32, width: usize, height: usize) -> (usize, usize) {
    if scale > 0 {
        (scale as usize * width, scale as usize * height)
    } else if scale < 0 {
        let side = scale.unsigned_abs() as usize;
        (side, side)
    } else {
        (FALLBACK_OUTPUT_SIDE, FALLBACK_OUTPUT_SIDE)
    }
}

/// Neighbor count of a square neighborhood of `radius`, `(2r + 1)²`
pub const fn square_neighborhood(radius: usize) -> usize {
    let side = 2 * radius + 1;
    side * side
}

/// Neighbor count of a circular neighborhood, radius clamped to `1..=128`
pub fn circle_neighborhood(radius: usize) -> usize {
    let index = radius.clamp(1, DISC_SIZES.len()) - 1;
    DISC_SIZES.get(index).copied().unwrap_or(MAX_NEIGHBORS)
}
