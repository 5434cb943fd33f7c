// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunable limits and thresholds for homology computation.
//!
//! Every value can be overridden per call. [`HomologyConfig::default`] always
//! yields the built-in constants; [`HomologyConfig::from_env`] layers
//! `TOPOLITE_*` environment variables on top of them for hosts that configure
//! the engine through the process environment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Persistence below which a feature is not flagged as significant.
pub const MIN_PERSISTENCE: f64 = 0.01;

/// Persistence below which a feature is counted as discretization noise.
pub const NOISE_THRESHOLD: f64 = 0.05;

/// Number of intervals used when sampling a Betti curve.
pub const DEFAULT_FILTRATION_STEPS: usize = 20;

/// Ceiling on the total number of simplices a builder may emit.
pub const MAX_SIMPLICES: usize = 2_000_000;

/// Highest simplex dimension modeled (triangles).
pub const MAX_DIMENSION: usize = 2;

/// Persistence at or below this is treated as zero. Equal filtration values
/// computed from different point pairs can differ by rounding.
pub const PERSISTENCE_EPSILON: f64 = 1e-9;

/// Configuration for complex construction and persistence analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomologyConfig {
    /// Pairs with persistence strictly above this are significant.
    pub min_persistence: f64,
    /// Pairs with persistence below this are counted as noise.
    pub noise_threshold: f64,
    /// Default number of Betti-curve sampling intervals.
    pub filtration_steps: usize,
    /// Builders fail with `ComplexTooLarge` past this many simplices.
    pub max_simplices: usize,
    /// Highest simplex dimension to build (0, 1 or 2).
    pub max_dimension: usize,
}

impl HomologyConfig {
    /// Load configuration from environment variables, falling back to the
    /// built-in defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            min_persistence: std::env::var("TOPOLITE_MIN_PERSISTENCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MIN_PERSISTENCE),
            noise_threshold: std::env::var("TOPOLITE_NOISE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(NOISE_THRESHOLD),
            filtration_steps: std::env::var("TOPOLITE_FILTRATION_STEPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FILTRATION_STEPS),
            max_simplices: std::env::var("TOPOLITE_MAX_SIMPLICES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_SIMPLICES),
            max_dimension: std::env::var("TOPOLITE_MAX_DIMENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_DIMENSION),
        }
    }

    pub fn with_min_persistence(mut self, value: f64) -> Self {
        self.min_persistence = value;
        self
    }

    pub fn with_noise_threshold(mut self, value: f64) -> Self {
        self.noise_threshold = value;
        self
    }

    pub fn with_filtration_steps(mut self, value: usize) -> Self {
        self.filtration_steps = value;
        self
    }

    pub fn with_max_simplices(mut self, value: usize) -> Self {
        self.max_simplices = value;
        self
    }

    pub fn with_max_dimension(mut self, value: usize) -> Self {
        self.max_dimension = value;
        self
    }

    /// Checks that every value is usable.
    ///
    /// A `max_dimension` above 2 is a request for higher-dimensional analysis
    /// and fails with `UnsupportedDimension` rather than being truncated.
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension > MAX_DIMENSION {
            return Err(Error::UnsupportedDimension(self.max_dimension));
        }
        if !self.min_persistence.is_finite() || self.min_persistence < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_persistence must be finite and non-negative, got {}",
                self.min_persistence
            )));
        }
        if !self.noise_threshold.is_finite() || self.noise_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "noise_threshold must be finite and non-negative, got {}",
                self.noise_threshold
            )));
        }
        if self.filtration_steps == 0 {
            return Err(Error::InvalidConfig("filtration_steps must be at least 1".into()));
        }
        if self.max_simplices == 0 {
            return Err(Error::InvalidConfig("max_simplices must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for HomologyConfig {
    fn default() -> Self {
        Self {
            min_persistence: MIN_PERSISTENCE,
            noise_threshold: NOISE_THRESHOLD,
            filtration_steps: DEFAULT_FILTRATION_STEPS,
            max_simplices: MAX_SIMPLICES,
            max_dimension: MAX_DIMENSION,
        }
    }
}
