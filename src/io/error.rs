//! Error types and path context for synthesis operations

use std::collections::TryReserveError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum SynthesisError {
    /// Failed to load the corpus image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the synthesized image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Corpus or output canvas has zero area
    ///
    /// The run is aborted before any buffer is allocated.
    InvalidInputGeometry {
        /// Corpus dimensions (width, height)
        corpus: (usize, usize),
        /// Output dimensions (width, height)
        output: (usize, usize),
    },

    /// Decoded pixel data doesn't match its declared layout
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A run buffer could not be allocated
    AllocationFailure {
        /// Which buffer was being allocated
        buffer: &'static str,
        /// Number of elements requested
        requested: usize,
        /// Allocator diagnostic
        reason: String,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidInputGeometry { corpus, output } => {
                write!(
                    f,
                    "Invalid sizes: corpus {}x{} ({} pixels), output {}x{} ({} pixels)",
                    corpus.0,
                    corpus.1,
                    corpus.0 * corpus.1,
                    output.0,
                    output.1,
                    output.0 * output.1
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::AllocationFailure {
                buffer,
                requested,
                reason,
            } => {
                write!(
                    f,
                    "Ran out of memory allocating {buffer} ({requested} elements): {reason}"
                )
            }
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Attaches the path being worked on to path-bearing errors
pub trait WithPath<T> {
    /// Replace the placeholder path of a converted error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<SynthesisError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                SynthesisError::ImageLoad { path: slot, .. }
                | SynthesisError::ImageExport { path: slot, .. }
                | SynthesisError::FileSystem { path: slot, .. } => {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for SynthesisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SynthesisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an allocation failure error from a failed reservation
pub fn allocation_failure(
    buffer: &'static str,
    requested: usize,
    reason: &TryReserveError,
) -> SynthesisError {
    SynthesisError::AllocationFailure {
        buffer,
        requested,
        reason: reason.to_string(),
    }
}
