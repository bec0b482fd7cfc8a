// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Largest number of probe radii walked around an edge midpoint.
pub const MAX_PROBE_DISTANCE: u32 = 4096;

/// Largest keypoint border margin, in pixels.
pub const MAX_DETECTOR_BORDER: u32 = 4096;

/// Full scan settings. Every section falls back to its defaults when omitted
/// from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub search: CornerSearchConfig,
    pub preprocess: PreprocessConfig,
    pub detector: DetectorConfig,
}

/// Corner ranking and quadrilateral search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerSearchConfig {
    /// Candidates kept per corner role (K).
    pub point_limit_per_corner: usize,
    /// Number of probe radii tried around each edge midpoint.
    pub max_distance: u32,
    /// Luma threshold, as a percentage of 255, a sample must exceed to count
    /// as an edge.
    pub threshold_percent: u8,
    /// Accepted quadrilaterals smaller than this fraction of the image are
    /// flagged as degenerate.
    pub min_area_fraction: f64,
}

impl Default for CornerSearchConfig {
    fn default() -> Self {
        Self {
            point_limit_per_corner: 4,
            max_distance: 4,
            threshold_percent: 90,
            min_area_fraction: 0.10,
        }
    }
}

/// Image preparation applied before keypoint detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Contrast level in (-255, 259); 0 is a no-op.
    pub contrast: f32,
    /// Channels darker than this percentage of 255 are raised to it.
    pub high_pass_percent: f32,
    /// Brightness offset as a percentage of 255.
    pub brightness_percent: f32,
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            contrast: 20.0,
            high_pass_percent: 20.0,
            brightness_percent: 20.0,
            blur_sigma: 2.0,
            canny_low: 75.0,
            canny_high: 200.0,
        }
    }
}

/// FAST keypoint detector settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub fast_threshold: u8,
    /// Keypoints closer than this to the image border are dropped.
    pub border: u32,
    /// Strongest keypoints kept.
    pub max_candidates: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            fast_threshold: 30,
            border: 4,
            max_candidates: 500,
        }
    }
}

impl ScanConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the scan pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.point_limit_per_corner == 0 {
            return Err(invalid("point_limit_per_corner must be at least 1"));
        }
        if search.max_distance == 0 {
            return Err(invalid("max_distance must be at least 1"));
        }
        if search.max_distance > MAX_PROBE_DISTANCE {
            return Err(invalid(format!(
                "max_distance must be at most {MAX_PROBE_DISTANCE}, got {}",
                search.max_distance
            )));
        }
        if search.threshold_percent > 100 {
            return Err(invalid(format!(
                "threshold_percent must be 0..=100, got {}",
                search.threshold_percent
            )));
        }
        if !(0.0..=1.0).contains(&search.min_area_fraction) {
            return Err(invalid(format!(
                "min_area_fraction must be within [0, 1], got {}",
                search.min_area_fraction
            )));
        }

        let pre = &self.preprocess;
        if !(pre.contrast > -255.0 && pre.contrast < 259.0) {
            return Err(invalid(format!(
                "contrast must be within (-255, 259), got {}",
                pre.contrast
            )));
        }
        if !(pre.blur_sigma > 0.0) {
            return Err(invalid(format!(
                "blur_sigma must be positive, got {}",
                pre.blur_sigma
            )));
        }
        if pre.canny_low > pre.canny_high {
            return Err(invalid(format!(
                "canny_low ({}) exceeds canny_high ({})",
                pre.canny_low, pre.canny_high
            )));
        }

        if self.detector.border > MAX_DETECTOR_BORDER {
            return Err(invalid(format!(
                "detector border must be at most {MAX_DETECTOR_BORDER}, got {}",
                self.detector.border
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ScanError {
    ScanError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.point_limit_per_corner, 4);
        assert_eq!(config.search.max_distance, 4);
        assert_eq!(config.search.threshold_percent, 90);
    }

    #[test]
    fn zero_point_limit_is_rejected() {
        let mut config = ScanConfig::default();
        config.search.point_limit_per_corner = 0;
        assert!(matches!(config.validate(), Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn threshold_above_100_is_rejected() {
        let mut config = ScanConfig::default();
        config.search.threshold_percent = 101;
        assert!(config.validate().is_err());
        config.search.threshold_percent = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oversized_probe_distance_is_rejected() {
        let mut config = ScanConfig::default();
        config.search.max_distance = MAX_PROBE_DISTANCE;
        assert!(config.validate().is_ok());
        config.search.max_distance = MAX_PROBE_DISTANCE + 1;
        assert!(matches!(config.validate(), Err(ScanError::InvalidConfig(_))));
        config.search.max_distance = u32::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_detector_border_is_rejected() {
        let mut config = ScanConfig::default();
        config.detector.border = MAX_DETECTOR_BORDER;
        assert!(config.validate().is_ok());
        config.detector.border = u32::MAX;
        assert!(matches!(config.validate(), Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_canny_thresholds_are_rejected() {
        let mut config = ScanConfig::default();
        config.preprocess.canny_low = 250.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "search": {{ "threshold_percent": 75 }} }}"#).unwrap();

        let config = ScanConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.search.threshold_percent, 75);
        assert_eq!(config.search.point_limit_per_corner, 4);
        assert_eq!(config.preprocess, PreprocessConfig::default());
    }

    #[test]
    fn invalid_json_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "search": {{ "max_distance": 0 }} }}"#).unwrap();
        assert!(matches!(
            ScanConfig::from_json_file(file.path()),
            Err(ScanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let mut config = ScanConfig::default();
        config.detector.max_candidates = 42;
        let text = config.to_json_pretty().unwrap();
        let back: ScanConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
