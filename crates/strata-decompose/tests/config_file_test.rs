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

//! Integration tests for loading decomposition settings from disk.

use strata_decompose::{DecomposeConfig, DecomposeError, Decomposer, Result};
use strata_math::{Mat4, Vec3};
use tempfile::tempdir;

#[test]
fn test_config_file_round_trip() -> Result<()> {
    // --- 1. Setup: write a config to a temporary file ---
    let dir = tempdir()?;
    let path = dir.path().join("decompose.json");
    let config = DecomposeConfig {
        polar_tolerance: 1.0e-5,
        max_polar_iterations: 12,
        max_jacobi_sweeps: 8,
    };
    config.to_file(&path)?;

    // --- 2. Load it back and build a decomposer ---
    let loaded = DecomposeConfig::from_file(&path)?;
    assert_eq!(loaded, config);
    let decomposer = Decomposer::new(loaded)?;

    // --- 3. The loaded settings drive the decomposition ---
    let parts = decomposer.decompose(&Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)))?;
    assert_eq!(decomposer.config().max_polar_iterations, 12);
    assert!((parts.scale.y - 3.0).abs() < 1e-5);
    Ok(())
}

#[test]
fn test_hand_written_partial_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "max_jacobi_sweeps": 50 }"#)?;

    let loaded = DecomposeConfig::from_file(&path)?;
    assert_eq!(loaded.max_jacobi_sweeps, 50);
    assert_eq!(loaded.max_polar_iterations, DecomposeConfig::default().max_polar_iterations);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = DecomposeConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DecomposeError::Io(_)));
}

#[test]
fn test_invalid_file_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");

    std::fs::write(&path, r#"{ "max_polar_iterations": 0 }"#).unwrap();
    let err = DecomposeConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, DecomposeError::InvalidConfig(_)));

    std::fs::write(&path, "true").unwrap();
    let err = DecomposeConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, DecomposeError::Serialization(_)));
}
