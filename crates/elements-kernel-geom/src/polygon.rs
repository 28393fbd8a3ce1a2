//! Closed planar polygons.

use elements_kernel_math::{average, Dir3, Domain, Point3, Tolerance, Transform};
use serde::{Deserialize, Serialize};

use crate::{chain, tangent_frame, Curve3d, CurveError, CurveSampling, Line, Plane};

/// A closed, planar loop of at least three vertices.
///
/// The closing edge from the last vertex back to the first is implicit.
/// The normal follows the right-hand rule over the vertex order, and the
/// domain is arc length `[0, perimeter]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PolygonRecord", try_from = "PolygonRecord")]
pub struct Polygon {
    vertices: Vec<Point3>,
}

impl Polygon {
    /// Validate and create a polygon.
    ///
    /// A trailing vertex equal to the first is dropped. Fails on fewer than
    /// three vertices, non-finite coordinates, coincident neighbours,
    /// collinear or non-planar input.
    pub fn new(mut vertices: Vec<Point3>) -> Result<Self, CurveError> {
        if let Some(i) = chain::find_non_finite(&vertices) {
            return Err(CurveError::NonFiniteVertex(i));
        }
        let tol = Tolerance::DEFAULT;
        if vertices.len() > 3 && tol.points_equal(&vertices[0], &vertices[vertices.len() - 1]) {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(CurveError::TooFewVertices {
                kind: "polygon",
                required: 3,
                found: vertices.len(),
            });
        }
        if let Some((i, j)) = chain::find_coincident(&vertices, true) {
            return Err(CurveError::CoincidentVertices(i, j));
        }
        let normal = chain::newell_normal(&vertices);
        if normal.norm() < tol.linear {
            return Err(CurveError::ZeroArea);
        }
        let normal = normal.normalize();
        let origin = vertices[0];
        if vertices
            .iter()
            .any(|v| (v - origin).dot(&normal).abs() > tol.intersection)
        {
            return Err(CurveError::NonPlanar);
        }
        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle centered on the origin in the XY plane,
    /// wound counter-clockwise.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, CurveError> {
        for d in [width, height] {
            if !(d > 0.0) {
                return Err(CurveError::InvalidDimension(d));
            }
        }
        let (w, h) = (width / 2.0, height / 2.0);
        Self::new(vec![
            Point3::new(-w, -h, 0.0),
            Point3::new(w, -h, 0.0),
            Point3::new(w, h, 0.0),
            Point3::new(-w, h, 0.0),
        ])
    }

    /// Vertices in order, without the closing duplicate.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Unit normal (right-hand rule over the vertex order).
    pub fn normal(&self) -> Dir3 {
        Dir3::new_normalize(chain::newell_normal(&self.vertices))
    }

    /// Plane of the polygon, anchored at the first vertex.
    pub fn plane(&self) -> Plane {
        let frame = Transform::from_normal(self.vertices[0], self.normal().into_inner())
            .unwrap_or_else(|_| Transform::from_origin(self.vertices[0]));
        Plane::from_frame(&frame)
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        chain::newell_normal(&self.vertices).norm() / 2.0
    }

    /// Total edge length, closing edge included.
    pub fn perimeter(&self) -> f64 {
        let params = chain::cumulative_lengths(&self.vertices, true);
        params[params.len() - 1]
    }

    /// Edges as lines, closing edge last.
    pub fn segments(&self) -> Vec<Line> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Line::new_unchecked(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Vertex average.
    pub fn centroid(&self) -> Point3 {
        average(&self.vertices).unwrap_or_else(Point3::origin)
    }

    /// The same polygon mapped through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| transform.apply_point(p)).collect(),
        }
    }

    /// Vertex order reversed, flipping the normal.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// In-plane offset of every edge with mitred corners. Positive
    /// distances grow the polygon; `flip` shrinks it instead.
    pub fn offset(&self, distance: f64, flip: bool) -> Result<Self, CurveError> {
        let moved = chain::offset(&self.vertices, true, &self.normal(), distance, flip)?;
        Self::new(moved)
    }
}

impl Curve3d for Polygon {
    fn domain(&self) -> Domain {
        Domain::new(0.0, self.perimeter())
    }

    fn length(&self) -> f64 {
        self.perimeter()
    }

    fn start(&self) -> Point3 {
        self.vertices[0]
    }

    fn end(&self) -> Point3 {
        self.vertices[0]
    }

    fn point_at(&self, t: f64) -> Point3 {
        chain::point_at(&self.vertices, true, t)
    }

    fn transform_at(&self, t: f64) -> Transform {
        let tangent = chain::tangent_at(&self.vertices, true, t);
        tangent_frame(self.point_at(t), tangent, self.normal().into_inner())
    }

    /// The vertices, closing back to the first.
    fn sample_parameters_with(&self, _sampling: &CurveSampling) -> Vec<f64> {
        chain::cumulative_lengths(&self.vertices, true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PolygonRecord {
    vertices: Vec<Point3>,
}

impl From<Polygon> for PolygonRecord {
    fn from(p: Polygon) -> Self {
        Self {
            vertices: p.vertices,
        }
    }
}

impl TryFrom<PolygonRecord> for Polygon {
    type Error = CurveError;

    fn try_from(r: PolygonRecord) -> Result<Self, Self::Error> {
        Polygon::new(r.vertices)
    }
}
