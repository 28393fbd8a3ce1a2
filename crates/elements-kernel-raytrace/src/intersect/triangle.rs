//! Ray-triangle intersection.

use elements_kernel_geom::Plane;
use elements_kernel_math::{Point3, Tolerance};

use super::intersect_plane;
use crate::{Ray, RayHit};

/// Intersect a ray with the triangle `a b c`.
///
/// Hits on edges and vertices count, within the intersection tolerance.
/// Returns `None` for a degenerate triangle, a ray parallel to the
/// triangle's plane, or a crossing behind the ray origin.
pub fn intersect_triangle(ray: &Ray, a: &Point3, b: &Point3, c: &Point3) -> Option<RayHit> {
    let plane = Plane::new(*a, b - a, c - a).ok()?;
    let t = intersect_plane(ray, &plane)?;
    let point = ray.at(t);

    let v0 = b - a;
    let v1 = c - a;
    let v2 = point - a;
    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);
    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;

    let eps = Tolerance::DEFAULT.intersection;
    if v < -eps || w < -eps || v + w > 1.0 + eps {
        return None;
    }

    Some(RayHit {
        t,
        point,
        triangle: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use elements_kernel_math::{ApproxEq, Vec3};

    fn triangle() -> [Point3; 3] {
        [
            Point3::new(-0.5, -0.5, 1.0),
            Point3::new(0.5, -0.5, 1.0),
            Point3::new(0.0, 0.5, 1.0),
        ]
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let [a, b, c] = triangle();
        let up = Ray::new(Point3::origin(), Vec3::z()).unwrap();
        let hit = intersect_triangle(&up, &a, &b, &c).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!(hit.point.is_almost_equal_to(&Point3::new(0.0, 0.0, 1.0)));

        let down = Ray::new(Point3::origin(), -Vec3::z()).unwrap();
        assert!(intersect_triangle(&down, &a, &b, &c).is_none());
    }

    #[test]
    fn test_triangle_hit_at_vertex() {
        let [a, b, c] = triangle();
        let ray = Ray::new(Point3::new(-0.5, -0.5, 0.0), Vec3::z()).unwrap();
        let hit = intersect_triangle(&ray, &a, &b, &c).unwrap();
        assert!(hit.point.is_almost_equal_to(&a));
    }

    #[test]
    fn test_parallel_ray_misses() {
        let [a, b, c] = triangle();
        let ray = Ray::new(Point3::origin(), Vec3::x()).unwrap();
        assert!(intersect_triangle(&ray, &a, &b, &c).is_none());
        // In the triangle's own plane, still parallel.
        let ray = Ray::new(Point3::new(-1.0, 0.0, 1.0), Vec3::x()).unwrap();
        assert!(intersect_triangle(&ray, &a, &b, &c).is_none());
    }

    #[test]
    fn test_outside_triangle_misses() {
        let [a, b, c] = triangle();
        let ray = Ray::new(Point3::new(0.4, 0.4, 0.0), Vec3::z()).unwrap();
        assert!(intersect_triangle(&ray, &a, &b, &c).is_none());
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let a = Point3::origin();
        let b = Point3::new(1.0, 0.0, 1.0);
        let c = Point3::new(2.0, 0.0, 2.0);
        let ray = Ray::new(Point3::new(0.5, -1.0, 0.5), Vec3::y()).unwrap();
        assert!(intersect_triangle(&ray, &a, &b, &c).is_none());
    }
}
