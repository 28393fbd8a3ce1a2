//! Straight line segments.

use elements_kernel_math::{Dir3, Domain, Point3, Tolerance, Transform, Vec3, EPSILON};
use serde::{Deserialize, Serialize};

use crate::{chain, tangent_frame, Curve3d, CurveError, CurveSampling};

/// A straight segment from `start` to `end`, parametrized by arc length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "LineRecord", try_from = "LineRecord")]
pub struct Line {
    start: Point3,
    end: Point3,
}

impl Line {
    /// Create a line. Fails if an endpoint is not finite or the endpoints
    /// coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self, CurveError> {
        if let Some(i) = chain::find_non_finite(&[start, end]) {
            return Err(CurveError::NonFiniteVertex(i));
        }
        if Tolerance::DEFAULT.points_equal(&start, &end) {
            return Err(CurveError::ZeroLength);
        }
        Ok(Self { start, end })
    }

    /// Create a line from endpoints already known to be distinct.
    pub(crate) fn new_unchecked(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> Dir3 {
        Dir3::new_normalize(self.end - self.start)
    }

    /// The same line mapped through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self::new_unchecked(
            transform.apply_point(&self.start),
            transform.apply_point(&self.end),
        )
    }

    /// Offset horizontally by `distance` along `direction × Z`, or the
    /// opposite side when `flip` is set.
    pub fn offset(&self, distance: f64, flip: bool) -> Result<Self, CurveError> {
        let side = Dir3::try_new(self.direction().cross(&Vec3::z()), EPSILON)
            .ok_or(CurveError::VerticalOffset)?;
        let sign = if flip { -1.0 } else { 1.0 };
        let shift = side.as_ref() * (sign * distance);
        Ok(Self::new_unchecked(self.start + shift, self.end + shift))
    }
}

impl Curve3d for Line {
    fn domain(&self) -> Domain {
        Domain::new(0.0, self.length())
    }

    fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    fn start(&self) -> Point3 {
        self.start
    }

    fn end(&self) -> Point3 {
        self.end
    }

    fn point_at(&self, t: f64) -> Point3 {
        let len = self.length();
        let t = self.domain().clamp(t);
        if t >= len {
            return self.end;
        }
        self.start + self.direction().as_ref() * t
    }

    /// X along the line, Z toward world up (world X for vertical lines).
    fn transform_at(&self, t: f64) -> Transform {
        tangent_frame(self.point_at(t), self.direction().into_inner(), Vec3::z())
    }

    fn sample_parameters_with(&self, _sampling: &CurveSampling) -> Vec<f64> {
        vec![0.0, self.length()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LineRecord {
    start: Point3,
    end: Point3,
}

impl From<Line> for LineRecord {
    fn from(l: Line) -> Self {
        Self {
            start: l.start,
            end: l.end,
        }
    }
}

impl TryFrom<LineRecord> for Line {
    type Error = CurveError;

    fn try_from(r: LineRecord) -> Result<Self, Self::Error> {
        Line::new(r.start, r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use elements_kernel_math::ApproxEq;

    fn x_line() -> Line {
        Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_zero_length_line() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(Line::new(p, p), Err(CurveError::ZeroLength));
    }

    #[test]
    fn test_non_finite_line() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let nan = Point3::new(f64::NAN, 0.0, 0.0);
        assert_eq!(Line::new(nan, p), Err(CurveError::NonFiniteVertex(0)));
        assert_eq!(Line::new(p, nan), Err(CurveError::NonFiniteVertex(1)));
    }

    #[test]
    fn test_point_at_clamps() {
        let line = Line::new(Point3::new(1.0, 1.0, 0.0), Point3::new(4.0, 5.0, 0.0)).unwrap();
        assert_relative_eq!(line.length(), 5.0, epsilon = 1e-12);
        assert_eq!(line.point_at(-1.0), line.start());
        assert_eq!(line.point_at(5.0), line.end());
        assert_eq!(line.point_at(99.0), line.end());
        assert!(line
            .point_at(2.5)
            .is_almost_equal_to(&Point3::new(2.5, 3.0, 0.0)));
    }

    #[test]
    fn test_transform_at() {
        let t = x_line().transform_at(3.0);
        assert!(t.origin().is_almost_equal_to(&Point3::new(3.0, 0.0, 0.0)));
        assert!(t.x_axis().is_almost_equal_to(&Vec3::x_axis()));
        assert!(t.y_axis().is_almost_equal_to(&Vec3::y_axis()));
        assert!(t.z_axis().is_almost_equal_to(&Vec3::z_axis()));

        let vertical = Line::new(Point3::origin(), Point3::new(0.0, 0.0, 2.0)).unwrap();
        let t = vertical.transform_at(1.0);
        assert!(t.x_axis().is_almost_equal_to(&Vec3::z_axis()));
        assert!(t.z_axis().is_almost_equal_to(&Vec3::x_axis()));
    }

    #[test]
    fn test_offset_sides() {
        let right = x_line().offset(2.0, false).unwrap();
        assert!(right.start().is_almost_equal_to(&Point3::new(0.0, -2.0, 0.0)));
        let left = x_line().offset(2.0, true).unwrap();
        assert!(left.end().is_almost_equal_to(&Point3::new(10.0, 2.0, 0.0)));
    }

    #[test]
    fn test_vertical_offset_fails() {
        let vertical = Line::new(Point3::origin(), Point3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(vertical.offset(1.0, false), Err(CurveError::VerticalOffset));
    }

    #[test]
    fn test_to_polyline() {
        let polyline = x_line().to_polyline(4).unwrap();
        assert_eq!(polyline.vertices().len(), 5);
        assert!(polyline.vertices()[1].is_almost_equal_to(&Point3::new(2.5, 0.0, 0.0)));
    }

    #[test]
    fn test_line_serde() {
        let json = serde_json::to_value(x_line()).unwrap();
        assert_eq!(json["End"][0], 10.0);
        let bad = serde_json::json!({ "Start": [1.0, 0.0, 0.0], "End": [1.0, 0.0, 0.0] });
        assert!(serde_json::from_value::<Line>(bad).is_err());
    }
}
