// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-set helpers used by the Rips builder and the persistence defaults.
//!
//! Coordinates only ever feed distance computations; the homology math itself
//! never reads them.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

/// Lifts planar `[x, y]` points into 3D with `z = 0`.
pub fn lift_2d(points: &[[f64; 2]]) -> Vec<Point3<f64>> {
    points.iter().map(|&[x, y]| Point3::new(x, y, 0.0)).collect()
}

/// Fails with `NonFiniteCoordinate` on the first point holding NaN or ±∞.
pub fn check_finite(points: &[Point3<f64>]) -> Result<()> {
    match points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
    {
        Some(i) => Err(Error::NonFiniteCoordinate(i)),
        None => Ok(()),
    }
}

/// Axis-aligned bounds as `(min, max)`, or `None` for an empty slice.
pub fn bounds(points: &[Point3<f64>]) -> Option<(Point3<f64>, Point3<f64>)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min = min.inf(p);
        max = max.sup(p);
    }
    Some((min, max))
}

/// Length of the bounding-box diagonal; 0 for empty or single-point input.
pub fn bounding_box_diagonal(points: &[Point3<f64>]) -> f64 {
    bounds(points).map_or(0.0, |(min, max)| (max - min).norm())
}

/// Circumscribed circle of a triangle as `(center, radius)`.
///
/// Returns `None` for collinear or coincident corners, where no finite circle
/// exists.
pub fn circumcircle(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> Option<(Point3<f64>, f64)> {
    let ab: Vector3<f64> = b - a;
    let ac: Vector3<f64> = c - a;
    let normal = ab.cross(&ac);
    let denom = 2.0 * normal.norm_squared();

    let scale = ab.norm_squared().max(ac.norm_squared());
    if scale == 0.0 || denom <= 1e-12 * scale * scale {
        return None;
    }

    let offset =
        (normal.cross(&ab) * ac.norm_squared() + ac.cross(&normal) * ab.norm_squared()) / denom;
    Some((a + offset, offset.norm()))
}
