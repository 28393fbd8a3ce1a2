//! Orthonormal coordinate frames.

use serde::{Deserialize, Serialize};

use crate::{any_perpendicular, ApproxEq, Dir3, MathError, Point3, Vec3, EPSILON};

/// A right-handed orthonormal frame: an origin plus unit X, Y and Z axes.
///
/// Frames place curves, openings and sampled points in world space. They
/// are immutable values; every constructor guarantees the axes are
/// mutually orthogonal unit vectors with `x × y = z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "FrameRecord", try_from = "FrameRecord")]
pub struct Transform {
    origin: Point3,
    x_axis: Dir3,
    y_axis: Dir3,
    z_axis: Dir3,
}

impl Transform {
    /// World frame at the origin.
    pub fn identity() -> Self {
        Self::from_origin(Point3::origin())
    }

    /// World-aligned frame at `origin`.
    pub fn from_origin(origin: Point3) -> Self {
        Self {
            origin,
            x_axis: Dir3::new_unchecked(Vec3::x()),
            y_axis: Dir3::new_unchecked(Vec3::y()),
            z_axis: Dir3::new_unchecked(Vec3::z()),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::from_origin(Point3::new(dx, dy, dz))
    }

    /// Build a frame from an X axis and a Z axis.
    ///
    /// `z` is made orthogonal to `x` and the Y axis is derived as `z × x`.
    pub fn from_x_and_z(origin: Point3, x: Vec3, z: Vec3) -> Result<Self, MathError> {
        let x_axis = Dir3::try_new(x, EPSILON).ok_or(MathError::DegenerateFrame)?;
        let z_ortho = z - z.dot(x_axis.as_ref()) * x_axis.as_ref();
        let z_axis = Dir3::try_new(z_ortho, EPSILON).ok_or(MathError::DegenerateFrame)?;
        let y_axis = Dir3::new_normalize(z_axis.cross(x_axis.as_ref()));
        Ok(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Build a frame whose Z axis is `normal`; X and Y are chosen arbitrarily.
    pub fn from_normal(origin: Point3, normal: Vec3) -> Result<Self, MathError> {
        let x = any_perpendicular(&normal).ok_or(MathError::DegenerateFrame)?;
        Self::from_x_and_z(origin, x.into_inner(), normal)
    }

    /// Origin of the frame.
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Unit X axis.
    pub fn x_axis(&self) -> Dir3 {
        self.x_axis
    }

    /// Unit Y axis.
    pub fn y_axis(&self) -> Dir3 {
        self.y_axis
    }

    /// Unit Z axis.
    pub fn z_axis(&self) -> Dir3 {
        self.z_axis
    }

    /// Same axes, different origin.
    pub fn moved_to(&self, origin: Point3) -> Self {
        Self { origin, ..*self }
    }

    /// Map a point from frame-local coordinates to world coordinates.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.origin + self.apply_vec(&p.coords)
    }

    /// Map a vector from frame-local to world coordinates (ignores the origin).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        v.x * self.x_axis.as_ref() + v.y * self.y_axis.as_ref() + v.z * self.z_axis.as_ref()
    }

    /// Map a world point into frame-local coordinates.
    pub fn inverse_apply_point(&self, p: &Point3) -> Point3 {
        Point3::from(self.inverse_apply_vec(&(p - self.origin)))
    }

    /// Map a world vector into frame-local coordinates.
    pub fn inverse_apply_vec(&self, v: &Vec3) -> Vec3 {
        Vec3::new(
            v.dot(self.x_axis.as_ref()),
            v.dot(self.y_axis.as_ref()),
            v.dot(self.z_axis.as_ref()),
        )
    }

    /// True when the axes coincide with the world axes.
    pub fn is_world_aligned(&self) -> bool {
        self.x_axis.is_almost_equal_to(&Vec3::x_axis())
            && self.y_axis.is_almost_equal_to(&Vec3::y_axis())
            && self.z_axis.is_almost_equal_to(&Vec3::z_axis())
    }
}

/// Persisted form of a frame; Y is re-derived on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FrameRecord {
    origin: Point3,
    x_axis: Vec3,
    z_axis: Vec3,
}

impl From<Transform> for FrameRecord {
    fn from(t: Transform) -> Self {
        Self {
            origin: t.origin,
            x_axis: t.x_axis.into_inner(),
            z_axis: t.z_axis.into_inner(),
        }
    }
}

impl TryFrom<FrameRecord> for Transform {
    type Error = MathError;

    fn try_from(r: FrameRecord) -> Result<Self, Self::Error> {
        Transform::from_x_and_z(r.origin, r.x_axis, r.z_axis)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ApproxEq for Transform {
    fn is_almost_equal_within(&self, other: &Self, tolerance: f64) -> bool {
        self.origin.is_almost_equal_within(&other.origin, tolerance)
            && self.x_axis.is_almost_equal_within(&other.x_axis, tolerance)
            && self.y_axis.is_almost_equal_within(&other.y_axis, tolerance)
            && self.z_axis.is_almost_equal_within(&other.z_axis, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_orthonormal(t: &Transform) {
        assert_relative_eq!(t.x_axis().dot(t.y_axis().as_ref()), 0.0, epsilon = 1e-12);
        assert_relative_eq!(t.y_axis().dot(t.z_axis().as_ref()), 0.0, epsilon = 1e-12);
        assert_relative_eq!(t.z_axis().dot(t.x_axis().as_ref()), 0.0, epsilon = 1e-12);
        let z = t.x_axis().cross(t.y_axis().as_ref());
        assert!(z.is_almost_equal_to(t.z_axis().as_ref()));
    }

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(t.apply_point(&p).is_almost_equal_to(&p));
        assert!(t.is_world_aligned());
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert_relative_eq!(result.x, 11.0, epsilon = 1e-12);
        assert_relative_eq!(result.y, 22.0, epsilon = 1e-12);
        assert_relative_eq!(result.z, 33.0, epsilon = 1e-12);
        // Vectors ignore the origin.
        let v = t.apply_vec(&Vec3::new(1.0, 0.0, 0.0));
        assert!(v.is_almost_equal_to(&Vec3::x()));
    }

    #[test]
    fn test_from_x_and_z_derives_y() {
        let t = Transform::from_x_and_z(Point3::origin(), Vec3::x(), Vec3::z()).unwrap();
        assert!(t.y_axis().is_almost_equal_to(&Vec3::y_axis()));

        // Non-orthogonal, non-unit input is orthonormalized.
        let t = Transform::from_x_and_z(
            Point3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 3.0),
        )
        .unwrap();
        assert_orthonormal(&t);
        assert!(t.z_axis().is_almost_equal_to(&Vec3::z_axis()));
    }

    #[test]
    fn test_degenerate_frame() {
        assert_eq!(
            Transform::from_x_and_z(Point3::origin(), Vec3::z(), Vec3::z() * 2.0),
            Err(MathError::DegenerateFrame)
        );
        assert_eq!(
            Transform::from_x_and_z(Point3::origin(), Vec3::zeros(), Vec3::z()),
            Err(MathError::DegenerateFrame)
        );
    }

    #[test]
    fn test_from_normal() {
        let n = Vec3::new(1.0, 1.0, 0.0);
        let t = Transform::from_normal(Point3::origin(), n).unwrap();
        assert_orthonormal(&t);
        assert!(t.z_axis().is_almost_equal_to(&Dir3::new_normalize(n)));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::from_x_and_z(
            Point3::new(5.0, -2.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        let p = Point3::new(3.0, 4.0, -7.0);
        let local = t.inverse_apply_point(&p);
        assert!(t.apply_point(&local).is_almost_equal_to(&p));
    }

    #[test]
    fn test_apply_rotated_frame() {
        // X along world Y, Z along world X: local (1, 2, 3) -> world (3, 1, 2)
        let t = Transform::from_x_and_z(Point3::origin(), Vec3::y(), Vec3::x()).unwrap();
        let p = t.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert!(p.is_almost_equal_to(&Point3::new(3.0, 1.0, 2.0)));
    }
}
