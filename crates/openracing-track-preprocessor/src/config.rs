//! Track metadata and processing parameters.

use std::fs;
use std::path::Path;

use openracing_track_curvature::DEFAULT_ATTENUATION;
use openracing_track_geometry::DEFAULT_TRACK_ELEMENT_ID;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

/// Default distance between curvature samples, in metres.
pub const DEFAULT_STEP_SIZE_M: f64 = 1.0;

/// Contents of a track's `track.json`.
///
/// Only `lap_length_km` feeds the pipeline; the other fields are reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Short identifier such as `"monza"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Race distance in laps.
    pub laps: u32,
    /// Physical length of one lap in kilometres.
    pub lap_length_km: f64,
    /// Offset of the start line along the SVG outline.
    #[serde(default)]
    pub svg_start_offset: f64,
}

impl TrackMetadata {
    /// Parse and validate metadata from JSON text.
    ///
    /// ```
    /// use openracing_track_preprocessor::TrackMetadata;
    ///
    /// let meta = TrackMetadata::from_json_str(
    ///     r#"{"id":"spa","name":"Spa","laps":44,"lap_length_km":7.004,"svg_start_offset":0.0}"#,
    /// )?;
    /// assert!((meta.lap_length_m() - 7004.0).abs() < 1e-9);
    /// # Ok::<(), openracing_track_preprocessor::PipelineError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`PipelineError::Metadata`] if the JSON does not match, or
    /// [`PipelineError::InvalidConfiguration`] if the lap length is unusable.
    pub fn from_json_str(json: &str) -> PipelineResult<Self> {
        let metadata: Self =
            serde_json::from_str(json).map_err(|source| PipelineError::Metadata {
                path: "<inline>".into(),
                source,
            })?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Load and validate `path`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Read`] if the file cannot be read, otherwise as
    /// [`TrackMetadata::from_json_str`].
    pub fn load(path: &Path) -> PipelineResult<Self> {
        debug!(path = ?path, "Loading track metadata");
        let text = fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let metadata: Self =
            serde_json::from_str(&text).map_err(|source| PipelineError::Metadata {
                path: path.to_path_buf(),
                source,
            })?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Check that the lap length is finite and positive.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidConfiguration`] otherwise.
    pub fn validate(&self) -> PipelineResult<()> {
        validate_lap_length_km(self.lap_length_km)
    }

    /// Lap length in metres.
    pub fn lap_length_m(&self) -> f64 {
        self.lap_length_km * 1000.0
    }
}

pub(crate) fn validate_lap_length_km(lap_length_km: f64) -> PipelineResult<()> {
    if lap_length_km.is_finite() && lap_length_km > 0.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidConfiguration(format!(
            "lap_length_km must be finite and positive, got {lap_length_km}"
        )))
    }
}

/// Parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Distance between curvature samples in metres.
    pub step_size_m: f64,
    /// Lookahead attenuation per sample, strictly inside `(0, 1)`.
    pub attenuation: f64,
    /// `id` of the track `<path>` element in `track.svg`.
    pub track_element_id: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            step_size_m: DEFAULT_STEP_SIZE_M,
            attenuation: DEFAULT_ATTENUATION,
            track_element_id: DEFAULT_TRACK_ELEMENT_ID.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.step_size_m.is_finite() || self.step_size_m <= 0.0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "step_size_m must be finite and positive, got {}",
                self.step_size_m
            )));
        }
        if !self.attenuation.is_finite() || self.attenuation <= 0.0 || self.attenuation >= 1.0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "attenuation must be strictly between 0 and 1, got {}",
                self.attenuation
            )));
        }
        if self.track_element_id.trim().is_empty() {
            return Err(PipelineError::InvalidConfiguration(
                "track_element_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPA: &str = r#"{
        "id": "spa",
        "name": "Circuit de Spa-Francorchamps",
        "description": "Eau Rouge and Raidillon",
        "laps": 44,
        "lap_length_km": 7.004,
        "svg_start_offset": 0.12
    }"#;

    #[test]
    fn test_parse_full_metadata() -> PipelineResult<()> {
        let meta = TrackMetadata::from_json_str(SPA)?;
        assert_eq!(meta.id, "spa");
        assert_eq!(meta.laps, 44);
        assert_eq!(meta.description.as_deref(), Some("Eau Rouge and Raidillon"));
        assert!((meta.svg_start_offset - 0.12).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_optional_fields_default() -> PipelineResult<()> {
        let meta =
            TrackMetadata::from_json_str(r#"{"id":"x","name":"X","laps":1,"lap_length_km":1.0}"#)?;
        assert!(meta.description.is_none());
        assert_eq!(meta.svg_start_offset, 0.0);
        Ok(())
    }

    #[test]
    fn test_missing_lap_length_is_metadata_error() {
        let result = TrackMetadata::from_json_str(r#"{"id":"x","name":"X","laps":1}"#);
        assert!(matches!(result, Err(PipelineError::Metadata { .. })));
    }

    #[test]
    fn test_non_positive_lap_length() {
        for value in ["0.0", "-3.2"] {
            let json = format!(r#"{{"id":"x","name":"X","laps":1,"lap_length_km":{value}}}"#);
            assert!(matches!(
                TrackMetadata::from_json_str(&json),
                Err(PipelineError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_default_config() -> PipelineResult<()> {
        let config = PipelineConfig::default();
        assert_eq!(config.step_size_m, 1.0);
        assert_eq!(config.attenuation, 0.95);
        assert_eq!(config.track_element_id, "track");
        config.validate()
    }

    #[test]
    fn test_config_partial_json_uses_defaults() -> Result<(), serde_json::Error> {
        let config: PipelineConfig = serde_json::from_str(r#"{"attenuation": 0.9}"#)?;
        assert_eq!(config.attenuation, 0.9);
        assert_eq!(config.step_size_m, DEFAULT_STEP_SIZE_M);
        Ok(())
    }

    #[test]
    fn test_config_validation() {
        let bad = [
            PipelineConfig {
                step_size_m: 0.0,
                ..PipelineConfig::default()
            },
            PipelineConfig {
                attenuation: 1.0,
                ..PipelineConfig::default()
            },
            PipelineConfig {
                attenuation: f64::NAN,
                ..PipelineConfig::default()
            },
            PipelineConfig {
                track_element_id: " ".into(),
                ..PipelineConfig::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(PipelineError::InvalidConfiguration(_))),
                "{config:?} was accepted"
            );
        }
    }
}
