//! Curvature Profile Artifact Format for OpenRacing
//!
//! Fixed-layout binary format consumed by the runtime to look up track
//! curvature by distance. All values are little-endian with no padding:
//!
//! | Offset          | Type  | Field                 |
//! |-----------------|-------|-----------------------|
//! | 0               | `i32` | point count `N`       |
//! | 4 + 12·i        | `f32` | `x` of point `i`      |
//! | 4 + 12·i + 4    | `f32` | `y` of point `i`      |
//! | 4 + 12·i + 8    | `f32` | curvature of point `i`|
//!
//! A file is exactly `4 + 12·N` bytes. There is no version tag or checksum;
//! the runtime consumer reads this layout as is. Distance ratios are implied
//! by the index (`i / N`) and are not stored.
//!
//! # Example
//!
//! ```
//! use openracing_curvature_format::{decode, encode};
//! use openracing_track_curvature::TrackPoint;
//!
//! let points = vec![
//!     TrackPoint::new(0.0, 0.0, 0.0).with_curvature(0.1),
//!     TrackPoint::new(1.0, 0.0, 0.5).with_curvature(0.2),
//! ];
//! let records = decode(&encode(&points)?)?;
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].curvature, 0.2f32);
//! # Ok::<(), openracing_curvature_format::FormatError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod codec;
pub mod error;
pub mod file;
pub mod prelude;
pub mod record;

pub use codec::{HEADER_LEN, RECORD_LEN, decode, encode, encode_into, encoded_len};
pub use error::{FormatError, FormatResult};
pub use file::{read_file, temp_path, write_atomic};
pub use record::CurvatureRecord;
