//! Encoding and decoding of the artifact byte layout.

use std::io::Write;

use openracing_track_curvature::TrackPoint;

use crate::error::{FormatError, FormatResult};
use crate::record::CurvatureRecord;

/// Size of the `i32` point count header.
pub const HEADER_LEN: usize = 4;

/// Size of one `x, y, curvature` record.
pub const RECORD_LEN: usize = 12;

/// Size in bytes of an artifact holding `count` points.
#[inline]
pub const fn encoded_len(count: usize) -> usize {
    HEADER_LEN.saturating_add(count.saturating_mul(RECORD_LEN))
}

fn header(count: usize) -> FormatResult<[u8; HEADER_LEN]> {
    let Ok(count) = i32::try_from(count) else {
        return Err(FormatError::TooManyPoints(count));
    };
    Ok(count.to_le_bytes())
}

/// Encode `points` into a new buffer.
///
/// # Errors
///
/// [`FormatError::TooManyPoints`] if the count does not fit an `i32`.
///
/// # Example
///
/// ```
/// use openracing_curvature_format::{encode, encoded_len};
/// use openracing_track_curvature::TrackPoint;
///
/// let points = [TrackPoint::new(1.0, 2.0, 0.0), TrackPoint::new(3.0, 4.0, 0.5)];
/// let bytes = encode(&points)?;
/// assert_eq!(bytes.len(), encoded_len(2));
/// assert_eq!(&bytes[..4], &2i32.to_le_bytes());
/// # Ok::<(), openracing_curvature_format::FormatError>(())
/// ```
pub fn encode(points: &[TrackPoint]) -> FormatResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(encoded_len(points.len()));
    encode_into(points, &mut buffer)?;
    Ok(buffer)
}

/// Encode `points` into `writer`.
///
/// The header is validated before anything is written.
///
/// # Errors
///
/// [`FormatError::TooManyPoints`] if the count does not fit an `i32`, or
/// [`FormatError::Io`] if the writer fails.
pub fn encode_into<W: Write>(points: &[TrackPoint], mut writer: W) -> FormatResult<()> {
    writer.write_all(&header(points.len())?)?;
    for point in points {
        writer.write_all(&CurvatureRecord::from(point).to_le_bytes())?;
    }
    Ok(())
}

/// Decode a complete artifact.
///
/// # Errors
///
/// - [`FormatError::Truncated`] if the data ends early
/// - [`FormatError::NegativeCount`] if the header is negative
/// - [`FormatError::TrailingBytes`] if data follows the last record
pub fn decode(bytes: &[u8]) -> FormatResult<Vec<CurvatureRecord>> {
    let Some((header, body)) = bytes.split_first_chunk::<HEADER_LEN>() else {
        return Err(FormatError::Truncated {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    };

    let raw_count = i32::from_le_bytes(*header);
    let Ok(count) = usize::try_from(raw_count) else {
        return Err(FormatError::NegativeCount(raw_count));
    };

    let expected = encoded_len(count);
    if bytes.len() < expected {
        return Err(FormatError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(FormatError::TrailingBytes {
            expected,
            actual: bytes.len(),
        });
    }

    body.chunks_exact(RECORD_LEN)
        .map(CurvatureRecord::from_le_bytes)
        .collect::<Option<Vec<_>>>()
        .ok_or(FormatError::Truncated {
            expected,
            actual: bytes.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(encoded_len(0), 4);
        assert_eq!(encoded_len(1), 16);
        assert_eq!(encoded_len(5_891), 4 + 12 * 5_891);
        assert_eq!(encoded_len(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_exact_bytes() {
        let points = [TrackPoint::new(1.0, -2.0, 0.0).with_curvature(0.5)];
        let bytes = must(encode(&points));
        assert_eq!(
            bytes,
            vec![1, 0, 0, 0, 0, 0, 128, 63, 0, 0, 0, 192, 0, 0, 0, 63]
        );
    }

    #[test]
    fn test_distance_ratio_is_not_stored() {
        let a = must(encode(&[TrackPoint::new(1.0, 1.0, 0.0)]));
        let b = must(encode(&[TrackPoint::new(1.0, 1.0, 0.75)]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_sequence() {
        let bytes = must(encode(&[]));
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert!(must(decode(&bytes)).is_empty());
    }

    #[test]
    fn test_decode_short_header() {
        assert!(matches!(
            decode(&[1, 0]),
            Err(FormatError::Truncated {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_decode_negative_count() {
        assert!(matches!(
            decode(&(-3i32).to_le_bytes()),
            Err(FormatError::NegativeCount(-3))
        ));
    }

    #[test]
    fn test_decode_missing_records() {
        let mut bytes = must(encode(&[TrackPoint::default(); 3]));
        bytes.truncate(30);
        assert!(matches!(
            decode(&bytes),
            Err(FormatError::Truncated {
                expected: 40,
                actual: 30
            })
        ));
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let mut bytes = must(encode(&[TrackPoint::default(); 2]));
        bytes.push(0);
        assert!(matches!(
            decode(&bytes),
            Err(FormatError::TrailingBytes {
                expected: 28,
                actual: 29
            })
        ));
    }

    #[test]
    fn test_writer_failure_is_io() {
        struct Failing;
        impl Write for Failing {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = encode_into(&[TrackPoint::default()], Failing);
        assert!(matches!(result, Err(FormatError::Io(_))));
    }
}
