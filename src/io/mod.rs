//! Collaborators around the synthesis core: CLI, image files, logging and errors

/// Command-line front end and batch file processing
pub mod cli;
/// Defaults, ranges and sizing policy
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Image decoding and PNG export
pub mod image;
/// Diagnostic logging setup
pub mod logging;
/// Terminal progress bars
pub mod progress;
