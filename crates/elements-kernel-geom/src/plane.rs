//! Infinite planes.

use elements_kernel_math::{Dir3, MathError, Point2, Point3, Transform, Vec3};

/// An infinite plane with an orthonormal (u, v) parametrization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Origin point on the plane.
    pub origin: Point3,
    /// Unit vector along the u direction.
    pub x_dir: Dir3,
    /// Unit vector along the v direction.
    pub y_dir: Dir3,
    /// Unit normal (x_dir × y_dir).
    pub normal_dir: Dir3,
}

impl Plane {
    /// Create a plane spanned by two directions. `y_dir` only needs to be
    /// independent of `x_dir`; it is orthogonalized.
    pub fn new(origin: Point3, x_dir: Vec3, y_dir: Vec3) -> Result<Self, MathError> {
        let frame = Transform::from_x_and_z(origin, x_dir, x_dir.cross(&y_dir))?;
        Ok(Self::from_frame(&frame))
    }

    /// The XY plane of a frame.
    pub fn from_frame(frame: &Transform) -> Self {
        Self {
            origin: frame.origin(),
            x_dir: frame.x_axis(),
            y_dir: frame.y_axis(),
            normal_dir: frame.z_axis(),
        }
    }

    /// Create a plane from origin and normal. U/V directions are chosen arbitrarily.
    pub fn from_normal(origin: Point3, normal: Vec3) -> Result<Self, MathError> {
        Ok(Self::from_frame(&Transform::from_normal(origin, normal)?))
    }

    /// XY plane at the origin.
    pub fn xy() -> Self {
        Self::from_frame(&Transform::identity())
    }

    /// Project a 3D point onto this plane's (u, v) parameter space.
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(self.x_dir.as_ref()), d.dot(self.y_dir.as_ref()))
    }

    /// Point on the plane at `(u, v)`.
    pub fn point_at(&self, uv: &Point2) -> Point3 {
        self.origin + uv.x * self.x_dir.as_ref() + uv.y * self.y_dir.as_ref()
    }

    /// Signed distance from a point to this plane.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(self.normal_dir.as_ref())
    }
}
