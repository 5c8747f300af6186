//! Prelude for openracing-curvature-format

pub use crate::codec::{HEADER_LEN, RECORD_LEN, decode, encode, encode_into, encoded_len};
pub use crate::error::{FormatError, FormatResult};
pub use crate::file::{read_file, write_atomic};
pub use crate::record::CurvatureRecord;
