/// Per-corpus-pixel record of candidates already evaluated for the current pixel
pub mod cache;
/// Robust per-channel difference cost table
pub mod difference;
/// Candidate cost evaluation with branch-and-bound pruning
pub mod evaluator;
/// Synthesis driver and run state
pub mod executor;
/// Nearest-first gathering of already-synthesized neighbors
pub mod neighbors;
/// Processing order construction including polish passes
pub mod schedule;
