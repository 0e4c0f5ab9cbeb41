//! Calculation parameters.
//!
//! A [`SasaResult`](crate::result::SasaResult) records the parameters it was
//! computed with, and every run node built from it keeps a snapshot so that
//! reports can state how the numbers were obtained.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SasaError;

/// Default probe radius (water), in Ångström.
pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_SHRAKE_RUPLEY_POINTS: u32 = 100;
pub const DEFAULT_LEE_RICHARDS_SLICES: u32 = 20;
pub const DEFAULT_THREADS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    LeeRichards,
    ShrakeRupley,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::LeeRichards
    }
}

/// Parameters of a SASA calculation.
///
/// Missing fields fall back to their defaults when deserialized, so a JSON
/// document like `{"probe_radius": 1.2}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub algorithm: Algorithm,
    pub probe_radius: f64,
    pub shrake_rupley_n_points: u32,
    pub lee_richards_n_slices: u32,
    pub n_threads: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            probe_radius: DEFAULT_PROBE_RADIUS,
            shrake_rupley_n_points: DEFAULT_SHRAKE_RUPLEY_POINTS,
            lee_richards_n_slices: DEFAULT_LEE_RICHARDS_SLICES,
            n_threads: DEFAULT_THREADS,
        }
    }
}

impl Parameters {
    pub fn from_json_str(json: &str) -> Result<Self, SasaError> {
        let parameters: Parameters = serde_json::from_str(json)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Load parameters from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SasaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), SasaError> {
        if !(self.probe_radius >= 0.0) {
            return Err(SasaError::InvalidParameters(format!(
                "probe radius must be non-negative, got {}",
                self.probe_radius
            )));
        }
        if self.n_threads == 0 {
            return Err(SasaError::InvalidParameters(
                "number of threads must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = Parameters::default();
        assert_eq!(p.algorithm, Algorithm::LeeRichards);
        assert_eq!(p.probe_radius, DEFAULT_PROBE_RADIUS);
        assert_eq!(p.n_threads, DEFAULT_THREADS);
    }

    #[test]
    fn partial_json() {
        let p = Parameters::from_json_str(
            r#"{"algorithm": "shrake-rupley", "probe_radius": 1.2}"#,
        )
        .unwrap();
        assert_eq!(p.algorithm, Algorithm::ShrakeRupley);
        assert_eq!(p.probe_radius, 1.2);
        assert_eq!(p.shrake_rupley_n_points, DEFAULT_SHRAKE_RUPLEY_POINTS);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Parameters::from_json_str(r#"{"probe_radius": -1.0}"#),
            Err(SasaError::InvalidParameters(_))
        ));
        let err = Parameters::from_json_str(r#"{"n_threads": 0}"#).unwrap_err();
        assert_eq!(err.kind(), "invalid-parameters");
        assert!(matches!(
            Parameters::from_json_str("not json"),
            Err(SasaError::Json(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Parameters::from_path("/nonexistent/params.json"),
            Err(SasaError::Io(_))
        ));
    }
}
