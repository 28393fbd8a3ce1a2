//! Ray representation and basic ray-geometry tests.

use elements_kernel_geom::Line;
use elements_kernel_math::{Dir3, Point3, Tolerance, Vec2, Vec3, EPSILON};
use elements_kernel_mesh::Aabb3;

use crate::RayError;

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
    /// Precomputed reciprocal of direction components for fast AABB tests.
    inv_direction: Vec3,
    /// Sign of direction components (0 if positive, 1 if negative).
    sign: [usize; 3],
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Result<Self, RayError> {
        let dir = Dir3::try_new(direction, EPSILON).ok_or(RayError::ZeroDirection)?;
        Ok(Self::from_unit(origin, dir))
    }

    /// Create a ray from an already normalized direction.
    pub fn from_unit(origin: Point3, direction: Dir3) -> Self {
        let inv = Vec3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z);
        let sign = [
            usize::from(inv.x < 0.0),
            usize::from(inv.y < 0.0),
            usize::from(inv.z < 0.0),
        ];
        Self {
            origin,
            direction,
            inv_direction: inv,
            sign,
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Test ray-AABB intersection using the slab method.
    ///
    /// Returns `Some((t_min, t_max))` if the ray intersects the box,
    /// where `t_min` and `t_max` are the entry and exit parameters.
    /// Returns `None` if no intersection.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let bounds = [aabb.min, aabb.max];

        let tx1 = (bounds[self.sign[0]].x - self.origin.x) * self.inv_direction.x;
        let tx2 = (bounds[1 - self.sign[0]].x - self.origin.x) * self.inv_direction.x;

        let mut t_min = tx1;
        let mut t_max = tx2;

        let ty1 = (bounds[self.sign[1]].y - self.origin.y) * self.inv_direction.y;
        let ty2 = (bounds[1 - self.sign[1]].y - self.origin.y) * self.inv_direction.y;

        t_min = t_min.max(ty1);
        t_max = t_max.min(ty2);

        let tz1 = (bounds[self.sign[2]].z - self.origin.z) * self.inv_direction.z;
        let tz2 = (bounds[1 - self.sign[2]].z - self.origin.z) * self.inv_direction.z;

        t_min = t_min.max(tz1);
        t_max = t_max.min(tz2);

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }

    /// Intersect with another ray, both projected onto the XY plane.
    ///
    /// Returns the point on `self` where the projections cross. Unless
    /// `both_sides` is set, the crossing must lie ahead of both origins.
    /// Parallel rays, and rays whose projection is a point, never intersect.
    pub fn intersects_ray(&self, other: &Ray, both_sides: bool) -> Option<Point3> {
        let d1 = Vec2::new(self.direction.x, self.direction.y);
        let d2 = Vec2::new(other.direction.x, other.direction.y);
        let denom = cross2(&d1, &d2);
        // Sine of the angle between the projections.
        if denom.abs() <= Tolerance::DEFAULT.intersection * d1.norm() * d2.norm() {
            return None;
        }
        let w = Vec2::new(
            other.origin.x - self.origin.x,
            other.origin.y - self.origin.y,
        );
        let t = cross2(&w, &d2) / denom;
        let s = cross2(&w, &d1) / denom;
        if !both_sides && (t < 0.0 || s < 0.0) {
            return None;
        }
        Some(self.at(t))
    }
}

fn cross2(a: &Vec2, b: &Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

impl From<&Line> for Ray {
    /// Ray from the line's start toward its end.
    fn from(line: &Line) -> Self {
        use elements_kernel_geom::Curve3d;
        Ray::from_unit(line.start(), line.direction())
    }
}

/// Result of a ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parameter along the ray where intersection occurs.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
    /// Index of the mesh triangle that was hit, for mesh queries.
    pub triangle: Option<usize>,
}
