//! Open chains of line segments.

use elements_kernel_math::{Dir3, Domain, Point3, Tolerance, Transform, Vec3};
use serde::{Deserialize, Serialize};

use crate::{chain, tangent_frame, Curve3d, CurveError, CurveSampling, Line};

/// An open chain of at least two vertices, parametrized by arc length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PolylineRecord", try_from = "PolylineRecord")]
pub struct Polyline {
    vertices: Vec<Point3>,
}

impl Polyline {
    /// Validate and create a polyline. Consecutive vertices must differ.
    pub fn new(vertices: Vec<Point3>) -> Result<Self, CurveError> {
        if vertices.len() < 2 {
            return Err(CurveError::TooFewVertices {
                kind: "polyline",
                required: 2,
                found: vertices.len(),
            });
        }
        if let Some(i) = chain::find_non_finite(&vertices) {
            return Err(CurveError::NonFiniteVertex(i));
        }
        if let Some((i, j)) = chain::find_coincident(&vertices, false) {
            return Err(CurveError::CoincidentVertices(i, j));
        }
        Ok(Self { vertices })
    }

    /// Vertices in order.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Segments in order.
    pub fn segments(&self) -> Vec<Line> {
        self.vertices
            .windows(2)
            .map(|w| Line::new_unchecked(w[0], w[1]))
            .collect()
    }

    /// Normal of the plane through the vertices, oriented toward +Z when
    /// possible. `None` when the vertices are collinear.
    pub fn normal(&self) -> Option<Dir3> {
        let n = chain::newell_normal(&self.vertices);
        if n.norm() < Tolerance::DEFAULT.linear {
            return None;
        }
        let n = if n.z < 0.0 { -n } else { n };
        Some(Dir3::new_normalize(n))
    }

    fn reference_normal(&self) -> Dir3 {
        self.normal().unwrap_or_else(Vec3::z_axis)
    }

    /// The same polyline mapped through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| transform.apply_point(p)).collect(),
        }
    }

    /// Vertex order reversed.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Offset every segment within the polyline's plane (world XY for
    /// collinear input) along `tangent × normal`, mitring the joins.
    pub fn offset(&self, distance: f64, flip: bool) -> Result<Self, CurveError> {
        let normal = self.reference_normal();
        if self.normal().is_none() {
            // Collinear: offsetting needs a horizontal side direction.
            let dir = self.vertices[self.vertices.len() - 1] - self.vertices[0];
            if dir.cross(&Vec3::z()).norm() < Tolerance::DEFAULT.linear {
                return Err(CurveError::VerticalOffset);
            }
        }
        let moved = chain::offset(&self.vertices, false, &normal, distance, flip)?;
        Self::new(moved)
    }
}

impl Curve3d for Polyline {
    fn domain(&self) -> Domain {
        Domain::new(0.0, self.length())
    }

    fn length(&self) -> f64 {
        let params = chain::cumulative_lengths(&self.vertices, false);
        params[params.len() - 1]
    }

    fn start(&self) -> Point3 {
        self.vertices[0]
    }

    fn end(&self) -> Point3 {
        self.vertices[self.vertices.len() - 1]
    }

    fn point_at(&self, t: f64) -> Point3 {
        chain::point_at(&self.vertices, false, t)
    }

    fn transform_at(&self, t: f64) -> Transform {
        let tangent = chain::tangent_at(&self.vertices, false, t);
        tangent_frame(self.point_at(t), tangent, self.reference_normal().into_inner())
    }

    /// One parameter per vertex.
    fn sample_parameters_with(&self, _sampling: &CurveSampling) -> Vec<f64> {
        chain::cumulative_lengths(&self.vertices, false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PolylineRecord {
    vertices: Vec<Point3>,
}

impl From<Polyline> for PolylineRecord {
    fn from(p: Polyline) -> Self {
        Self {
            vertices: p.vertices,
        }
    }
}

impl TryFrom<PolylineRecord> for Polyline {
    type Error = CurveError;

    fn try_from(r: PolylineRecord) -> Result<Self, Self::Error> {
        Polyline::new(r.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use elements_kernel_math::ApproxEq;

    fn zigzag() -> Polyline {
        Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_length_and_ends() {
        let p = zigzag();
        assert_relative_eq!(p.length(), 7.0, epsilon = 1e-12);
        assert_eq!(p.start(), Point3::origin());
        assert_eq!(p.end(), Point3::new(3.0, 4.0, 0.0));
        assert_eq!(p.segments().len(), 2);
        assert_eq!(p.sample_parameters(), vec![0.0, 3.0, 7.0]);
    }

    #[test]
    fn test_point_at() {
        let p = zigzag();
        assert!(p.point_at(5.0).is_almost_equal_to(&Point3::new(3.0, 2.0, 0.0)));
        assert_eq!(p.point_at(-3.0), p.start());
        assert!(p.point_at(100.0).is_almost_equal_to(&p.end()));
    }

    #[test]
    fn test_validation() {
        let p = Point3::origin();
        assert!(matches!(
            Polyline::new(vec![p]),
            Err(CurveError::TooFewVertices { found: 1, .. })
        ));
        assert_eq!(
            Polyline::new(vec![p, Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]),
            Err(CurveError::CoincidentVertices(1, 2))
        );
        assert_eq!(
            Polyline::new(vec![p, Point3::new(f64::INFINITY, 0.0, 0.0)]),
            Err(CurveError::NonFiniteVertex(1))
        );
    }

    #[test]
    fn test_normal_points_up() {
        assert!(zigzag().normal().unwrap().is_almost_equal_to(&Vec3::z_axis()));
        assert!(zigzag()
            .reversed()
            .normal()
            .unwrap()
            .is_almost_equal_to(&Vec3::z_axis()));
        let straight = Polyline::new(vec![Point3::origin(), Point3::new(1.0, 1.0, 0.0)]).unwrap();
        assert!(straight.normal().is_none());
    }

    #[test]
    fn test_transform_at_vertex() {
        let frame = zigzag().transform_at(3.0);
        let bisector = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!(frame.x_axis().as_ref().is_almost_equal_to(&bisector));
        assert!(frame.z_axis().is_almost_equal_to(&Vec3::z_axis()));
    }

    #[test]
    fn test_offset_matches_line_side() {
        let straight = Polyline::new(vec![Point3::origin(), Point3::new(10.0, 0.0, 0.0)]).unwrap();
        let moved = straight.offset(2.0, false).unwrap();
        assert!(moved.start().is_almost_equal_to(&Point3::new(0.0, -2.0, 0.0)));

        let vertical = Polyline::new(vec![Point3::origin(), Point3::new(0.0, 0.0, 3.0)]).unwrap();
        assert_eq!(vertical.offset(1.0, false), Err(CurveError::VerticalOffset));
    }
}
