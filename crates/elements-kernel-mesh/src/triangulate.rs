//! Ear-clipping triangulation of planar polygons.

use elements_kernel_math::{Dir3, Point2, Point3, Transform};
use tracing::warn;

/// Triangulate a simple planar polygon lying in the plane of `normal`.
///
/// Returns index triples into `points`, wound in the same direction as the
/// input loop. Falls back to a fan around vertex 0 when no ear can be
/// found (self-intersecting or degenerate input).
pub fn triangulate(points: &[Point3], normal: &Dir3) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![[0, 1, 2]];
    }

    let Ok(frame) = Transform::from_normal(points[0], normal.into_inner()) else {
        return fan(n);
    };
    let verts_2d: Vec<Point2> = points
        .iter()
        .map(|p| {
            let local = frame.inverse_apply_point(p);
            Point2::new(local.x, local.y)
        })
        .collect();
    let ccw = signed_area(&verts_2d) >= 0.0;

    let mut out = Vec::with_capacity(n - 2);
    let mut remaining: Vec<usize> = (0..n).collect();

    while remaining.len() > 3 {
        let m = remaining.len();
        let mut found_ear = false;

        for i in 0..m {
            let prev = (i + m - 1) % m;
            let next = (i + 1) % m;

            let a = verts_2d[remaining[prev]];
            let b = verts_2d[remaining[i]];
            let c = verts_2d[remaining[next]];

            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            let is_convex = if ccw { cross > 0.0 } else { cross < 0.0 };
            if !is_convex {
                continue;
            }

            let blocked = (0..m)
                .filter(|&j| j != prev && j != i && j != next)
                .any(|j| point_in_triangle_2d(&verts_2d[remaining[j]], &a, &b, &c));
            if blocked {
                continue;
            }

            out.push([remaining[prev], remaining[i], remaining[next]]);
            remaining.remove(i);
            found_ear = true;
            break;
        }

        if !found_ear {
            warn!(
                vertices = n,
                remaining = remaining.len(),
                "ear clipping stuck, using fan triangulation"
            );
            return fan(n);
        }
    }

    out.push([remaining[0], remaining[1], remaining[2]]);
    out
}

fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1]).collect()
}

fn signed_area(pts: &[Point2]) -> f64 {
    let n = pts.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += pts[i].x * pts[j].y - pts[j].x * pts[i].y;
    }
    area * 0.5
}

/// Check if a point is strictly inside a triangle in 2D using barycentric coordinates.
fn point_in_triangle_2d(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let inv_denom = 1.0 / (dot00 * dot11 - dot01 * dot01);
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    let eps = 1e-10;
    u > eps && v > eps && (u + v) < 1.0 - eps
}
