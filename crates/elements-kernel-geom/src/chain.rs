//! Arc-length parametrization and offsetting shared by polygons and polylines.

use elements_kernel_math::{Dir3, Point2, Point3, Tolerance, Vec2, Vec3};

use crate::{CurveError, Plane};

/// Cumulative distance at each vertex. Closed chains get one extra entry
/// for the closing segment, so the last value is always the total length.
pub(crate) fn cumulative_lengths(points: &[Point3], closed: bool) -> Vec<f64> {
    let n = points.len();
    let seg_count = segment_count(n, closed);
    let mut params = Vec::with_capacity(seg_count + 1);
    let mut total = 0.0;
    params.push(total);
    for i in 0..seg_count {
        total += (points[(i + 1) % n] - points[i]).norm();
        params.push(total);
    }
    params
}

pub(crate) fn segment_count(n: usize, closed: bool) -> usize {
    if closed {
        n
    } else {
        n.saturating_sub(1)
    }
}

/// Newell normal of the loop through `points` (unnormalized; its length is
/// twice the enclosed area).
pub(crate) fn newell_normal(points: &[Point3]) -> Vec3 {
    let n = points.len();
    let mut normal = Vec3::zeros();
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Index of the first coincident consecutive pair, if any.
/// Index of the first point with a NaN or infinite coordinate.
pub(crate) fn find_non_finite(points: &[Point3]) -> Option<usize> {
    points.iter().position(|p| !p.coords.iter().all(|c| c.is_finite()))
}

pub(crate) fn find_coincident(points: &[Point3], closed: bool) -> Option<(usize, usize)> {
    let tol = Tolerance::DEFAULT;
    let n = points.len();
    (0..segment_count(n, closed))
        .map(|i| (i, (i + 1) % n))
        .find(|&(i, j)| tol.points_equal(&points[i], &points[j]))
}

fn locate(params: &[f64], t: f64) -> (usize, f64) {
    let total = params[params.len() - 1];
    let t = t.clamp(0.0, total);
    let seg_count = params.len() - 1;
    let i = params
        .partition_point(|&p| p <= t)
        .saturating_sub(1)
        .min(seg_count - 1);
    (i, t)
}

fn segment_dir(points: &[Point3], i: usize) -> Vec3 {
    let n = points.len();
    (points[(i + 1) % n] - points[i]).normalize()
}

/// Point at arc length `t` along the chain, clamped to its ends.
pub(crate) fn point_at(points: &[Point3], closed: bool, t: f64) -> Point3 {
    let params = cumulative_lengths(points, closed);
    let (i, t) = locate(&params, t);
    let n = points.len();
    let a = points[i];
    let b = points[(i + 1) % n];
    let len = params[i + 1] - params[i];
    a + (b - a) * ((t - params[i]) / len)
}

/// Unit tangent at arc length `t`. At a vertex this is the bisector of
/// the adjacent segment directions.
pub(crate) fn tangent_at(points: &[Point3], closed: bool, t: f64) -> Vec3 {
    let tol = Tolerance::DEFAULT;
    let params = cumulative_lengths(points, closed);
    let (i, t) = locate(&params, t);
    let seg_count = params.len() - 1;

    let neighbour = if (t - params[i]).abs() < tol.linear {
        match i {
            0 if closed => Some((seg_count - 1, 0)),
            0 => None,
            _ => Some((i - 1, i)),
        }
    } else if (params[i + 1] - t).abs() < tol.linear {
        if i + 1 < seg_count {
            Some((i, i + 1))
        } else if closed {
            Some((i, 0))
        } else {
            None
        }
    } else {
        None
    };

    let current = segment_dir(points, i);
    match neighbour {
        Some((prev, next)) => {
            let bisector = segment_dir(points, prev) + segment_dir(points, next);
            if bisector.norm() < tol.linear {
                segment_dir(points, next)
            } else {
                bisector.normalize()
            }
        }
        None => current,
    }
}

fn cross2(a: &Vec2, b: &Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Offset every segment by `distance` along `tangent × normal` (reversed
/// when `flip`) and rebuild the vertices at the mitred joins.
pub(crate) fn offset(
    points: &[Point3],
    closed: bool,
    normal: &Dir3,
    distance: f64,
    flip: bool,
) -> Result<Vec<Point3>, CurveError> {
    let tol = Tolerance::DEFAULT;
    let plane = Plane::from_normal(points[0], normal.into_inner())?;
    let n = points.len();
    let uv: Vec<Point2> = points.iter().map(|p| plane.project(p)).collect();
    let heights: Vec<f64> = points.iter().map(|p| plane.signed_distance(p)).collect();
    let sign = if flip { -1.0 } else { 1.0 };

    // (offset start point, unit direction) per segment
    let lines: Vec<(Point2, Vec2)> = (0..segment_count(n, closed))
        .map(|i| {
            let a = uv[i];
            let dir = (uv[(i + 1) % n] - a).normalize();
            let side = Vec2::new(dir.y, -dir.x) * (sign * distance);
            (a + side, dir)
        })
        .collect();

    let seg_count = lines.len();
    let moved = (0..n).map(|v| {
        let incoming = if v > 0 {
            Some(v - 1)
        } else if closed {
            Some(seg_count - 1)
        } else {
            None
        };
        let outgoing = if v < seg_count { Some(v) } else { None };
        let p = match (incoming, outgoing) {
            (Some(a), Some(b)) => {
                let (p1, d1) = lines[a];
                let (p2, d2) = lines[b];
                let denom = cross2(&d1, &d2);
                if denom.abs() < tol.intersection {
                    p2
                } else {
                    let s = cross2(&(p2 - p1), &d2) / denom;
                    p1 + d1 * s
                }
            }
            (Some(a), None) => {
                let (p1, d1) = lines[a];
                p1 + d1 * (uv[v] - p1).dot(&d1)
            }
            (None, Some(b)) => lines[b].0,
            (None, None) => uv[v],
        };
        plane.point_at(&p) + heights[v] * plane.normal_dir.as_ref()
    });
    Ok(moved.collect())
}
