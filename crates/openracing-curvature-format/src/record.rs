//! Decoded artifact records.

use openracing_track_curvature::TrackPoint;
use serde::{Deserialize, Serialize};

/// One point as stored in the artifact, at `f32` precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvatureRecord {
    /// Position in drawing units.
    pub x: f32,
    /// Position in drawing units.
    pub y: f32,
    /// Smoothed curvature in radians.
    pub curvature: f32,
}

impl CurvatureRecord {
    /// Little-endian bytes in on-disk order.
    pub fn to_le_bytes(self) -> [u8; 12] {
        let mut bytes = [0u8; 12];
        for (slot, value) in bytes
            .chunks_exact_mut(4)
            .zip([self.x, self.y, self.curvature])
        {
            slot.copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Parse a record from its 12 on-disk bytes.
    ///
    /// Returns `None` when fewer than 12 bytes are given.
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        let (x, rest) = bytes.split_first_chunk::<4>()?;
        let (y, rest) = rest.split_first_chunk::<4>()?;
        let (curvature, _) = rest.split_first_chunk::<4>()?;
        Some(Self {
            x: f32::from_le_bytes(*x),
            y: f32::from_le_bytes(*y),
            curvature: f32::from_le_bytes(*curvature),
        })
    }
}

impl From<&TrackPoint> for CurvatureRecord {
    fn from(point: &TrackPoint) -> Self {
        Self {
            x: point.x as f32,
            y: point.y as f32,
            curvature: point.curvature as f32,
        }
    }
}

impl From<TrackPoint> for CurvatureRecord {
    fn from(point: TrackPoint) -> Self {
        Self::from(&point)
    }
}
