// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Topolite Homology
//!
//! Simplicial homology and persistent homology for triangle meshes and point
//! clouds, up to dimension 2.
//!
//! Meshes become simplicial complexes through [`build_complex_from_mesh`];
//! point clouds become Vietoris–Rips flag complexes through
//! [`build_rips_complex`]. [`compute_homology`] reduces the mod-2 boundary
//! matrices and returns Betti numbers β₀ (components), β₁ (loops, through
//! holes) and β₂ (enclosed voids). [`compute_persistence`] sweeps a Rips
//! filtration and reports when each feature is born and when it dies.
//!
//! All coefficients are in GF(2). Every call is stateless and borrows its
//! input immutably.
//!
//! ```no_run
//! use topolite_homology::{build_complex_from_mesh, compute_homology, HomologyConfig, IndexedMesh};
//!
//! let mesh = IndexedMesh::from_planar(
//!     &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
//!     vec![vec![0, 1, 2], vec![0, 2, 3]],
//! );
//! let complex = build_complex_from_mesh(&mesh, &HomologyConfig::default())?;
//! let homology = compute_homology(&complex)?;
//! assert_eq!(homology.betti.as_array(), [1, 0, 0]);
//! # Ok::<(), topolite_homology::Error>(())
//! ```

pub mod boundary;
pub mod builders;
pub mod complex;
pub mod config;
pub mod error;
pub mod filtration;
pub mod geometry;
pub mod homology;
pub mod mesh;
pub mod persistence;
pub mod reduction;
pub mod simplex;

pub use boundary::{boundary_matrix, BoundaryMatrix, Z2Matrix};
pub use builders::{build_complex_from_mesh, build_rips_complex};
pub use complex::{SimplexCounts, SimplicialComplex};
pub use config::{HomologyConfig, PERSISTENCE_EPSILON};
pub use error::{Error, Result};
pub use filtration::Filtration;
pub use geometry::{bounding_box_diagonal, circumcircle, lift_2d};
pub use homology::{compute_homology, BettiNumbers, BoundaryRanks, HomologyResult};
pub use mesh::IndexedMesh;
pub use persistence::{
    compute_persistence, persistence_of_complex, BettiCurve, BettiSample, DimensionSummary,
    PersistenceDiagram, PersistenceOptions, PersistencePair, PersistenceResult,
    PersistenceSummary,
};
pub use reduction::{reduce, Reduction};
pub use simplex::{Simplex, SimplexKey, VertexId};

/// Re-exported so callers can build points without depending on nalgebra.
pub use nalgebra::Point3;
