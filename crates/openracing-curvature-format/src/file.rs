//! Atomic artifact files.
//!
//! An artifact is written to `<path>.tmp` and renamed over `path` only once
//! every byte has been flushed, so a reader never observes a partial file. On
//! failure the temporary file is removed and any existing artifact is left
//! untouched.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use openracing_track_curvature::TrackPoint;
use tracing::{debug, warn};

use crate::codec::{decode, encode_into, encoded_len};
use crate::error::{FormatError, FormatResult};
use crate::record::CurvatureRecord;

/// Temporary sibling used while writing `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("curvature"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Encode `points` and atomically replace `path` with the result.
///
/// # Errors
///
/// [`FormatError::TooManyPoints`] before any file is touched, or
/// [`FormatError::File`] if the temporary file cannot be written or renamed.
pub fn write_atomic(path: &Path, points: &[TrackPoint]) -> FormatResult<()> {
    let temp = temp_path(path);
    debug!(path = ?path, temp = ?temp, points = points.len(), "Writing curvature file atomically");

    if let Err(err) = write_temp(&temp, points) {
        remove_temp(&temp);
        return Err(err);
    }

    if let Err(source) = fs::rename(&temp, path) {
        remove_temp(&temp);
        return Err(FormatError::file(path, source));
    }

    debug!(path = ?path, bytes = encoded_len(points.len()), "Curvature file written");
    Ok(())
}

fn write_temp(temp: &Path, points: &[TrackPoint]) -> FormatResult<()> {
    // Refuse oversized input before creating the file.
    if i32::try_from(points.len()).is_err() {
        return Err(FormatError::TooManyPoints(points.len()));
    }

    let file = File::create(temp).map_err(|source| FormatError::file(temp, source))?;
    let mut writer = BufWriter::new(file);
    encode_into(points, &mut writer).map_err(|err| match err {
        FormatError::Io(source) => FormatError::file(temp, source),
        other => other,
    })?;

    let file = writer
        .into_inner()
        .map_err(|err| FormatError::file(temp, err.into_error()))?;
    file.sync_all()
        .map_err(|source| FormatError::file(temp, source))?;
    Ok(())
}

fn remove_temp(temp: &Path) {
    if let Err(err) = fs::remove_file(temp)
        && err.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = ?temp, error = %err, "Failed to remove temporary curvature file");
    }
}

/// Read and decode the artifact at `path`.
///
/// # Errors
///
/// [`FormatError::File`] if the file cannot be read, otherwise any
/// [`decode`] error.
pub fn read_file(path: &Path) -> FormatResult<Vec<CurvatureRecord>> {
    debug!(path = ?path, "Reading curvature file");
    let bytes = fs::read(path).map_err(|source| FormatError::file(path, source))?;
    decode(&bytes)
}
