//! Error types for track geometry operations.

use thiserror::Error;

/// Error type for path parsing, SVG extraction and arc-length queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The path data could not be tokenized into valid drawing commands.
    #[error("Malformed path data at byte {position}: {reason}")]
    MalformedPath {
        /// Byte offset in the path data where parsing failed.
        position: usize,
        /// What the parser expected or found.
        reason: String,
    },

    /// The path data parsed but produced no segment with a non-zero length.
    #[error("Path data contains no drawable segments")]
    EmptyPath,

    /// A distance ratio outside `[0, 1]` (or a non-finite one) was requested.
    #[error("Distance ratio {0} is outside the valid range [0, 1]")]
    InvalidRatio(f64),

    /// The SVG document is not well-formed XML.
    #[error("Invalid SVG document: {0}")]
    SvgParse(String),

    /// No `<path>` element carries the requested id.
    #[error("No <path> element with id '{id}' found in SVG document")]
    TrackElementNotFound {
        /// The element id that was searched for.
        id: String,
    },

    /// More than one `<path>` element carries the requested id.
    #[error("Found {count} <path> elements with id '{id}', expected exactly one")]
    DuplicateTrackElement {
        /// The element id that was searched for.
        id: String,
        /// How many elements matched.
        count: usize,
    },

    /// The track element exists but has no usable `d` attribute.
    #[error("Path element '{id}' has no 'd' attribute")]
    MissingPathData {
        /// The element id that was searched for.
        id: String,
    },
}

impl GeometryError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            position,
            reason: reason.into(),
        }
    }
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed() {
        let err = GeometryError::malformed(7, "expected a number");
        insta::assert_snapshot!(err.to_string(), @"Malformed path data at byte 7: expected a number");
    }

    #[test]
    fn test_error_display_invalid_ratio() {
        let err = GeometryError::InvalidRatio(1.5);
        insta::assert_snapshot!(err.to_string(), @"Distance ratio 1.5 is outside the valid range [0, 1]");
    }

    #[test]
    fn test_error_display_duplicate() {
        let err = GeometryError::DuplicateTrackElement {
            id: "track".to_string(),
            count: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 <path> elements"));
        assert!(msg.contains("'track'"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = GeometryError::EmptyPath;
        let _: &dyn std::error::Error = &err;
    }
}
