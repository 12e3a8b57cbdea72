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

//! Error types returned by the decomposition engine.

use thiserror::Error;

/// An error that can occur while configuring or running a decomposition.
#[derive(Debug, Error)]
pub enum DecomposeError {
    /// The scaled Newton iteration of the polar decomposition hit its iteration cap.
    ///
    /// `residual` is the last relative change `‖ΔM‖₁ / ‖M‖₁`. It is NaN when the
    /// input matrix contained non-finite values.
    #[error("polar decomposition did not converge after {iterations} iterations (residual {residual})")]
    PolarNotConverged {
        /// Number of Newton iterations performed.
        iterations: u32,
        /// Relative 1-norm change of the last iteration.
        residual: f32,
    },

    /// A configuration value is out of range.
    #[error("invalid decomposition config: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration could not be parsed or written as JSON.
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A `Result` alias using [`DecomposeError`].
pub type Result<T> = std::result::Result<T, DecomposeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DecomposeError::PolarNotConverged {
            iterations: 4,
            residual: 0.5,
        };
        assert_eq!(
            err.to_string(),
            "polar decomposition did not converge after 4 iterations (residual 0.5)"
        );

        let err = DecomposeError::InvalidConfig("polar_tolerance must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "invalid decomposition config: polar_tolerance must be > 0"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DecomposeError = io.into();
        assert!(matches!(err, DecomposeError::Io(_)));
    }
}
