// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tuning parameters for the decomposition engine.

use crate::error::{DecomposeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default relative convergence tolerance of the polar iteration.
pub const DEFAULT_POLAR_TOLERANCE: f32 = 1.0e-6;
/// Default cap on polar Newton iterations.
pub const DEFAULT_MAX_POLAR_ITERATIONS: u32 = 32;
/// Default cap on Jacobi sweeps.
pub const DEFAULT_MAX_JACOBI_SWEEPS: u32 = 20;

/// Parameters controlling the iterative solvers.
///
/// Missing fields take their default value when loaded from JSON, so
/// `{"max_polar_iterations": 64}` is a complete config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeConfig {
    /// Relative 1-norm change below which the polar iteration stops.
    pub polar_tolerance: f32,
    /// Iteration cap after which the polar decomposition fails.
    pub max_polar_iterations: u32,
    /// Sweep cap of the Jacobi eigen-solver.
    pub max_jacobi_sweeps: u32,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            polar_tolerance: DEFAULT_POLAR_TOLERANCE,
            max_polar_iterations: DEFAULT_MAX_POLAR_ITERATIONS,
            max_jacobi_sweeps: DEFAULT_MAX_JACOBI_SWEEPS,
        }
    }
}

impl DecomposeConfig {
    /// Load a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.polar_tolerance.is_finite() || self.polar_tolerance <= 0.0 {
            return Err(DecomposeError::InvalidConfig(format!(
                "polar_tolerance must be finite and > 0, got {}",
                self.polar_tolerance
            )));
        }
        if self.max_polar_iterations == 0 {
            return Err(DecomposeError::InvalidConfig(
                "max_polar_iterations must be at least 1".to_string(),
            ));
        }
        if self.max_jacobi_sweeps == 0 {
            return Err(DecomposeError::InvalidConfig(
                "max_jacobi_sweeps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DecomposeConfig::default();
        assert_eq!(config.polar_tolerance, 1.0e-6);
        assert_eq!(config.max_polar_iterations, 32);
        assert_eq!(config.max_jacobi_sweeps, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DecomposeConfig::from_json(r#"{ "max_polar_iterations": 64 }"#).unwrap();
        assert_eq!(config.max_polar_iterations, 64);
        assert_eq!(config.polar_tolerance, DEFAULT_POLAR_TOLERANCE);
        assert_eq!(config.max_jacobi_sweeps, DEFAULT_MAX_JACOBI_SWEEPS);

        let empty = DecomposeConfig::from_json("{}").unwrap();
        assert_eq!(empty, DecomposeConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = DecomposeConfig {
            polar_tolerance: 1.0e-4,
            max_polar_iterations: 8,
            max_jacobi_sweeps: 5,
        };
        let json = config.to_json().unwrap();
        assert_eq!(DecomposeConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for json in [
            r#"{ "polar_tolerance": 0.0 }"#,
            r#"{ "polar_tolerance": -1.0 }"#,
            r#"{ "max_polar_iterations": 0 }"#,
            r#"{ "max_jacobi_sweeps": 0 }"#,
        ] {
            let err = DecomposeConfig::from_json(json).unwrap_err();
            assert!(matches!(err, DecomposeError::InvalidConfig(_)), "{json}");
        }

        let nan = DecomposeConfig {
            polar_tolerance: f32::NAN,
            ..DecomposeConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = DecomposeConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DecomposeError::Serialization(_)));

        let err = DecomposeConfig::from_json(r#"{ "max_jacobi_sweeps": "lots" }"#).unwrap_err();
        assert!(matches!(err, DecomposeError::Serialization(_)));
    }
}
