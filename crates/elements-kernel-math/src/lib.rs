#![warn(missing_docs)]

//! Math types for the elements geometry kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types
//! for building geometry: points, vectors, directions, orthonormal
//! frames, parameter domains, and tolerance constants.

mod domain;
mod transform;

pub use domain::Domain;
pub use transform::Transform;

use nalgebra::{Unit, Vector2, Vector3};
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D parameter space.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Default tolerance for "almost equal" point and vector comparisons.
pub const EPSILON: f64 = 1e-9;

/// Errors from frame construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MathError {
    /// The axes supplied for a frame were zero or parallel.
    #[error("cannot build a frame: axes are zero-length or parallel")]
    DegenerateFrame,
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Point equality and degeneracy tolerance.
    pub linear: f64,
    /// Slack used by intersection routines: parallel tests, barycentric
    /// bounds, hit de-duplication and planarity checks.
    pub intersection: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default kernel tolerances (1e-9 linear, 1e-6 intersection, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: EPSILON,
        intersection: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Equality within [`EPSILON`], used instead of exact float equality.
pub trait ApproxEq {
    /// True if `self` and `other` differ by less than `tolerance` in every component.
    fn is_almost_equal_within(&self, other: &Self, tolerance: f64) -> bool;

    /// True if `self` and `other` differ by less than [`EPSILON`] in every component.
    fn is_almost_equal_to(&self, other: &Self) -> bool {
        self.is_almost_equal_within(other, EPSILON)
    }
}

impl ApproxEq for f64 {
    fn is_almost_equal_within(&self, other: &Self, tolerance: f64) -> bool {
        (self - other).abs() < tolerance
    }
}

impl ApproxEq for Vec3 {
    fn is_almost_equal_within(&self, other: &Self, tolerance: f64) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| (a - b).abs() < tolerance)
    }
}

impl ApproxEq for Point3 {
    fn is_almost_equal_within(&self, other: &Self, tolerance: f64) -> bool {
        self.coords.is_almost_equal_within(&other.coords, tolerance)
    }
}

impl ApproxEq for Dir3 {
    fn is_almost_equal_within(&self, other: &Self, tolerance: f64) -> bool {
        self.as_ref().is_almost_equal_within(other.as_ref(), tolerance)
    }
}

/// Average of a set of points, or `None` for an empty slice.
pub fn average(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Pick a unit vector perpendicular to `v`.
///
/// Uses the world axis least aligned with `v`, so the result is stable for
/// axis-aligned input.
pub fn any_perpendicular(v: &Vec3) -> Option<Dir3> {
    let arbitrary = if v.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    Dir3::try_new(arbitrary.cross(v), EPSILON)
}
