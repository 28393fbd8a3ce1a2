//! Ray-mesh and ray-solid intersection.

use elements_kernel_math::{Point3, Tolerance};
use elements_kernel_mesh::Mesh;
use elements_kernel_solids::Solid;
use rayon::prelude::*;
use tracing::debug;

use super::intersect_triangle;
use crate::{Ray, RayHit};

/// All hits of a ray against a mesh, nearest first.
///
/// Hits closer together along the ray than the intersection tolerance
/// (a ray through a shared edge or vertex) are reported once. A ray running
/// along a mesh edge does not hit anything on that edge.
pub fn intersect_mesh(ray: &Ray, mesh: &Mesh) -> Vec<RayHit> {
    let tol = Tolerance::DEFAULT;
    if mesh.is_empty() {
        return Vec::new();
    }
    let mut bounds = mesh.bounds();
    bounds.expand(tol.intersection);
    if ray.intersect_aabb(&bounds).is_none() {
        return Vec::new();
    }

    let mut hits: Vec<RayHit> = mesh
        .triangles()
        .iter()
        .enumerate()
        .filter_map(|(i, tri)| {
            let [a, b, c] = mesh.triangle_points(tri);
            intersect_triangle(ray, &a, &b, &c).map(|hit| RayHit {
                triangle: Some(i),
                ..hit
            })
        })
        .collect();

    let grazed = grazed_spans(ray, mesh, tol.intersection);
    if !grazed.is_empty() {
        hits.retain(|hit| {
            !grazed
                .iter()
                .any(|&(t0, t1)| hit.t >= t0 - tol.intersection && hit.t <= t1 + tol.intersection)
        });
    }

    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    hits.dedup_by(|later, kept| (later.t - kept.t).abs() < tol.intersection);
    hits
}

/// Parameter spans of the mesh edges that lie on the ray's line.
fn grazed_spans(ray: &Ray, mesh: &Mesh, tol: f64) -> Vec<(f64, f64)> {
    let dir = ray.direction.as_ref();
    let on_line = |p: &Point3| (p - ray.origin).cross(dir).norm() < tol;
    let mut spans = Vec::new();
    for tri in mesh.triangles() {
        let pts = mesh.triangle_points(tri);
        for k in 0..3 {
            let (p, q) = (pts[k], pts[(k + 1) % 3]);
            if on_line(&p) && on_line(&q) {
                let (tp, tq) = ((p - ray.origin).dot(dir), (q - ray.origin).dot(dir));
                spans.push((tp.min(tq), tp.max(tq)));
            }
        }
    }
    spans
}

/// All hits of a ray against a solid's mesh, nearest first.
pub fn intersect_solid(ray: &Ray, solid: &Solid) -> Vec<RayHit> {
    intersect_mesh(ray, &solid.mesh())
}

/// Intersect many rays against one mesh in parallel. The result holds one
/// hit list per ray, in input order.
pub fn cast_rays(rays: &[Ray], mesh: &Mesh) -> Vec<Vec<RayHit>> {
    debug!(
        rays = rays.len(),
        triangles = mesh.num_triangles(),
        "casting rays"
    );
    rays.par_iter().map(|ray| intersect_mesh(ray, mesh)).collect()
}
