// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for complex construction and homology computation.

/// Result type alias for homology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building complexes or computing homology.
///
/// Input contract violations and resource limits are reported here. Analysis
/// outcomes such as an unexpected hole count are never errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A face references a vertex that does not exist in the mesh.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A face has fewer than three vertex indices.
    #[error("face {face} has {len} indices, at least 3 are required")]
    MalformedFace { face: usize, len: usize },

    /// A required input collection is empty.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// The distance threshold is zero, negative or not finite.
    #[error("epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),

    /// A point has a NaN or infinite coordinate.
    #[error("point {0} has a non-finite coordinate")]
    NonFiniteCoordinate(usize),

    /// A simplex lists the same vertex more than once.
    #[error("simplex repeats a vertex: {0:?}")]
    DegenerateSimplex(Vec<usize>),

    /// The complex would exceed the configured simplex ceiling.
    #[error("complex too large: {count} simplices exceeds the limit of {limit}")]
    ComplexTooLarge { count: usize, limit: usize },

    /// Only dimensions 0 through 2 are modeled.
    #[error("dimension {0} is not supported (maximum is 2)")]
    UnsupportedDimension(usize),

    /// A sparse column references a row past the matrix height.
    #[error("row {row} is out of range for a matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    /// All points coincide, so no default filtration range exists.
    #[error("point cloud has a zero bounding box; pass max_epsilon explicitly")]
    DegeneratePointCloud,

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Betti numbers disagree with the raw simplex counts.
    #[error("Euler characteristic mismatch: homology gives {homology}, counts give {counts}")]
    EulerMismatch { homology: i64, counts: i64 },
}
