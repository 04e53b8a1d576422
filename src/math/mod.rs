//! Mathematical utilities for the synthesis engine

/// Seeded random selection for reproducible runs
pub mod random;
/// Robust error transforms used to weight pixel mismatches
pub mod robust;
