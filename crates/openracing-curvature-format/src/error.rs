//! Error types for the curvature artifact format.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for format operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised while encoding, decoding or storing a curvature artifact.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Writer or reader failure without an associated file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reading, writing or renaming a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    File {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Input ends before the header or the declared records.
    #[error("Truncated curvature data: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the header.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// Header declares a negative point count.
    #[error("Negative point count {0} in header")]
    NegativeCount(i32),

    /// Input continues after the declared records.
    #[error("Trailing bytes after curvature data: expected {expected} bytes, got {actual}")]
    TrailingBytes {
        /// Bytes required by the header.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// Point count does not fit the `i32` header.
    #[error("Cannot encode {0} points, the format holds at most 2147483647")]
    TooManyPoints(usize),
}

impl FormatError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// True for filesystem and stream failures, as opposed to bad data.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::File { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_display() {
        let err = FormatError::Truncated {
            expected: 16,
            actual: 10,
        };
        insta::assert_snapshot!(err.to_string(), @"Truncated curvature data: expected 16 bytes, got 10");
    }

    #[test]
    fn test_file_display_includes_path() {
        let err = FormatError::file(
            "tracks/spa/curvature.bin",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        insta::assert_snapshot!(err.to_string(), @"I/O error on tracks/spa/curvature.bin: denied");
        assert!(err.is_io());
    }

    #[test]
    fn test_data_errors_are_not_io() {
        assert!(!FormatError::NegativeCount(-1).is_io());
        assert!(!FormatError::TooManyPoints(usize::MAX).is_io());
    }
}
