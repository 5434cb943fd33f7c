// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for inspection routines.

/// Result type alias for inspection routines.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting a model or scan.
///
/// Topological findings (wrong hole count, open shell, Euler mismatch) are
/// never errors; they are reported as discrepancies or issues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying homology computation rejected the input.
    #[error(transparent)]
    Homology(#[from] topolite_homology::Error),

    /// Hole classification thresholds are not ordered `0 <= probable < definite`.
    #[error("invalid hole thresholds: {0}")]
    InvalidThresholds(String),

    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
