//! Ray-plane intersection (closed-form).

use elements_kernel_geom::Plane;
use elements_kernel_math::Tolerance;

use crate::Ray;

/// Intersect a ray with a plane.
///
/// Returns the ray parameter of the crossing, or `None` if the ray is
/// parallel to the plane or crosses it behind the origin.
pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<f64> {
    let normal = plane.normal_dir.as_ref();
    let denom = ray.direction.as_ref().dot(normal);

    if denom.abs() < Tolerance::DEFAULT.intersection {
        return None;
    }

    let t = (plane.origin - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use elements_kernel_math::{Point3, Vec3};

    #[test]
    fn test_ray_plane_perpendicular() {
        let ray = Ray::new(Point3::new(3.0, 4.0, 10.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let t = intersect_plane(&ray, &Plane::xy()).unwrap();
        assert!((t - 10.0).abs() < 1e-10);
        let uv = Plane::xy().project(&ray.at(t));
        assert!((uv.x - 3.0).abs() < 1e-10);
        assert!((uv.y - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_plane_parallel() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::x()).unwrap();
        assert!(intersect_plane(&ray, &Plane::xy()).is_none());
    }

    #[test]
    fn test_ray_plane_behind() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::z()).unwrap();
        assert!(intersect_plane(&ray, &Plane::xy()).is_none());
    }
}
