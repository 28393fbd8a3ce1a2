//! Circular arcs.

use elements_kernel_math::{Dir3, Domain, Point3, Transform, Vec3, EPSILON};
use serde::{Deserialize, Serialize};

use crate::{divide_domain, tangent_frame, Curve3d, CurveError, CurveSampling};

/// A circular arc in the XY plane of `transform`, centered at its origin.
///
/// Angles are in degrees, measured from the frame's X axis toward its Y
/// axis. `end_angle < start_angle` gives a clockwise arc; the domain
/// `[0, sweep]` (radians) then decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ArcRecord", try_from = "ArcRecord")]
pub struct Arc {
    transform: Transform,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Arc in the world XY plane around `center`.
    pub fn new(
        center: Point3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self, CurveError> {
        Self::with_transform(Transform::from_origin(center), radius, start_angle, end_angle)
    }

    /// Arc in the XY plane of `transform`.
    pub fn with_transform(
        transform: Transform,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self, CurveError> {
        if !(radius > 0.0) {
            return Err(CurveError::InvalidRadius(radius));
        }
        if !((end_angle - start_angle).abs() >= EPSILON) {
            return Err(CurveError::DegenerateSweep(start_angle));
        }
        Ok(Self {
            transform,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Full counter-clockwise circle starting on the X axis.
    pub fn circle(center: Point3, radius: f64) -> Result<Self, CurveError> {
        Self::new(center, radius, 0.0, 360.0)
    }

    /// Center point.
    pub fn center(&self) -> Point3 {
        self.transform.origin()
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Start angle in degrees.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// End angle in degrees.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Signed sweep `end - start` in degrees.
    pub fn sweep_angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Frame whose XY plane holds the arc.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Normal of the arc plane.
    pub fn normal(&self) -> Dir3 {
        self.transform.z_axis()
    }

    fn sweep_sign(&self) -> f64 {
        self.sweep_angle().signum()
    }

    fn point_at_angle(&self, theta: f64) -> Point3 {
        let local = Point3::new(self.radius * theta.cos(), self.radius * theta.sin(), 0.0);
        self.transform.apply_point(&local)
    }

    /// The rest of the circle: starts where this arc ends and ends where it
    /// starts, turning the same way. Angles are shifted by whole turns so
    /// that the end angle lies in `(-180°, 180°]`.
    pub fn complement(&self) -> Result<Self, CurveError> {
        let sweep = self.sweep_angle();
        if sweep.abs() >= 360.0 - EPSILON {
            return Err(CurveError::FullCircle);
        }
        let start = self.end_angle - 360.0 * sweep.signum();
        let end = self.start_angle;
        let turns = ((end - 180.0) / 360.0).ceil();
        Self::with_transform(
            self.transform,
            self.radius,
            start - 360.0 * turns,
            end - 360.0 * turns,
        )
    }

    /// Concentric arc, radius grown by `distance` toward the `tangent ×
    /// normal` side (shrunk when `flip`).
    pub fn offset(&self, distance: f64, flip: bool) -> Result<Self, CurveError> {
        let side = if flip { -1.0 } else { 1.0 };
        let radius = self.radius + distance * self.sweep_sign() * side;
        Self::with_transform(self.transform, radius, self.start_angle, self.end_angle)
    }
}

impl Curve3d for Arc {
    /// `[0, sweep]` in radians.
    fn domain(&self) -> Domain {
        Domain::new(0.0, self.sweep_angle().to_radians())
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep_angle().to_radians().abs()
    }

    fn start(&self) -> Point3 {
        self.point_at(0.0)
    }

    fn end(&self) -> Point3 {
        self.point_at(self.domain().max)
    }

    fn point_at(&self, t: f64) -> Point3 {
        let t = self.domain().clamp(t);
        self.point_at_angle(self.start_angle.to_radians() + t)
    }

    /// X along the direction of travel, Z along the arc normal.
    fn transform_at(&self, t: f64) -> Transform {
        let t = self.domain().clamp(t);
        let theta = self.start_angle.to_radians() + t;
        let local_tangent = Vec3::new(-theta.sin(), theta.cos(), 0.0) * self.sweep_sign();
        let tangent = self.transform.apply_vec(&local_tangent);
        tangent_frame(
            self.point_at_angle(theta),
            tangent,
            self.normal().into_inner(),
        )
    }

    fn sample_parameters_with(&self, sampling: &CurveSampling) -> Vec<f64> {
        let step = sampling.angular_step(self.radius);
        let sweep = self.sweep_angle().to_radians().abs();
        let n = ((sweep / step).ceil() as usize).clamp(1, sampling.max_segments.max(1));
        divide_domain(self.domain(), n).unwrap_or_default()
    }
}

/// Persisted form. The plane is written only when it is not the world XY
/// plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ArcRecord {
    center: Point3,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plane: Option<Transform>,
}

impl From<Arc> for ArcRecord {
    fn from(a: Arc) -> Self {
        Self {
            center: a.center(),
            radius: a.radius,
            start_angle: a.start_angle,
            end_angle: a.end_angle,
            plane: (!a.transform.is_world_aligned()).then_some(a.transform),
        }
    }
}

impl TryFrom<ArcRecord> for Arc {
    type Error = CurveError;

    fn try_from(r: ArcRecord) -> Result<Self, Self::Error> {
        let transform = r
            .plane
            .map(|p| p.moved_to(r.center))
            .unwrap_or_else(|| Transform::from_origin(r.center));
        Arc::with_transform(transform, r.radius, r.start_angle, r.end_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use elements_kernel_math::ApproxEq;
    use std::f64::consts::PI;

    #[test]
    fn test_quarter_arc_endpoints() {
        let arc = Arc::new(Point3::origin(), 2.0, 0.0, 90.0).unwrap();
        assert!(arc.start().is_almost_equal_to(&Point3::new(2.0, 0.0, 0.0)));
        assert!(arc.end().is_almost_equal_to(&Point3::new(0.0, 2.0, 0.0)));

        let cw = Arc::new(Point3::origin(), 2.0, 0.0, -90.0).unwrap();
        assert!(cw.start().is_almost_equal_to(&Point3::new(2.0, 0.0, 0.0)));
        assert!(cw.end().is_almost_equal_to(&Point3::new(0.0, -2.0, 0.0)));
        assert!(cw.domain().is_reversed());
    }

    #[test]
    fn test_point_at() {
        let arc = Arc::new(Point3::origin(), 5.0, 0.0, 90.0).unwrap();
        assert!(arc.end().is_almost_equal_to(&Point3::new(0.0, 5.0, 0.0)));
        let half = arc.domain().parameter_at(0.5);
        let expected = Point3::new(5.0 * (PI / 4.0).cos(), 5.0 * (PI / 4.0).sin(), 0.0);
        assert!(arc.point_at(half).is_almost_equal_to(&expected));
        assert_relative_eq!(arc.length(), 5.0 * PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_at_outside_domain_clamps() {
        let arc = Arc::new(Point3::origin(), 5.0, 0.0, 180.0).unwrap();
        let d = arc.domain();
        assert!(arc
            .point_at(d.max)
            .is_almost_equal_to(&Point3::new(-5.0, 0.0, 0.0)));
        assert!(arc
            .point_at(d.min - 1e-15)
            .is_almost_equal_to(&Point3::new(5.0, 0.0, 0.0)));
        assert!(arc
            .point_at(d.max + 1.0)
            .is_almost_equal_to(&Point3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_invalid_arcs() {
        assert_eq!(
            Arc::new(Point3::origin(), 2.0, 10.0, 10.0),
            Err(CurveError::DegenerateSweep(10.0))
        );
        assert_eq!(
            Arc::new(Point3::origin(), 0.0, 0.0, 90.0),
            Err(CurveError::InvalidRadius(0.0))
        );
        assert!(Arc::new(Point3::origin(), f64::NAN, 0.0, 90.0).is_err());
    }

    #[test]
    fn test_transform_at_follows_travel() {
        let arc = Arc::new(Point3::origin(), 5.0, 0.0, 180.0).unwrap();
        let t = arc.transform_at(PI / 2.0);
        assert!(t.origin().is_almost_equal_to(&Point3::new(0.0, 5.0, 0.0)));
        assert!(t.x_axis().as_ref().is_almost_equal_to(&Vec3::new(-1.0, 0.0, 0.0)));
        assert!(t.y_axis().as_ref().is_almost_equal_to(&Vec3::new(0.0, -1.0, 0.0)));
        assert!(t.z_axis().is_almost_equal_to(&Vec3::z_axis()));

        // Clockwise travel flips the tangent but keeps the plane normal.
        let cw = Arc::new(Point3::origin(), 5.0, 0.0, -180.0).unwrap();
        let t = cw.transform_at(-PI / 2.0);
        assert!(t.origin().is_almost_equal_to(&Point3::new(0.0, -5.0, 0.0)));
        assert!(t.x_axis().as_ref().is_almost_equal_to(&Vec3::new(-1.0, 0.0, 0.0)));
        assert!(t.z_axis().is_almost_equal_to(&Vec3::z_axis()));
    }

    #[test]
    fn test_arc_in_transformed_plane() {
        let plane = Transform::from_normal(Point3::origin(), Vec3::x()).unwrap();
        let arc = Arc::with_transform(plane, 2.0, 0.0, 180.0).unwrap();
        for t in arc.sample_parameters() {
            let p = arc.point_at(t);
            assert!(p.x.abs() < 1e-12);
            assert_relative_eq!(p.coords.norm(), 2.0, epsilon = 1e-12);
            let frame = arc.transform_at(t);
            assert!(frame.z_axis().is_almost_equal_to(&Vec3::x_axis()));
            assert!(frame.x_axis().dot(&Vec3::x()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sample_parameters_reversed_arc() {
        let arc = Arc::new(Point3::new(1.0, 1.0, 0.0), 3.0, 0.0, -90.0).unwrap();
        let params = arc.sample_parameters();
        assert!(params.len() >= 2);
        assert_eq!(params[0], 0.0);
        assert_eq!(*params.last().unwrap(), -PI / 2.0);
        assert!(params.windows(2).all(|w| w[1] < w[0]));
        for t in params {
            let d = (arc.point_at(t) - arc.center()).norm();
            assert_relative_eq!(d, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sampling_respects_max_angle() {
        let arc = Arc::circle(Point3::origin(), 0.001).unwrap();
        // Chord height exceeds the radius, so max_angle governs.
        let params = arc.sample_parameters();
        assert!(params.len() >= 37);
        let max_angle = CurveSampling::DEFAULT.max_angle;
        assert!(params.windows(2).all(|w| w[1] - w[0] <= max_angle + 1e-12));
        let coarse = CurveSampling {
            max_segments: 4,
            ..CurveSampling::DEFAULT
        };
        assert_eq!(arc.sample_parameters_with(&coarse).len(), 5);
    }

    #[test]
    fn test_complement() {
        let arc = Arc::new(Point3::origin(), 1.0, 10.0, 20.0).unwrap();
        let c = arc.complement().unwrap();
        assert_relative_eq!(c.start_angle(), -340.0);
        assert_relative_eq!(c.end_angle(), 10.0);

        let arc = Arc::new(Point3::origin(), 1.0, -10.0, 10.0).unwrap();
        let c = arc.complement().unwrap();
        assert_relative_eq!(c.start_angle(), -350.0);
        assert_relative_eq!(c.end_angle(), -10.0);

        let cw = Arc::new(Point3::origin(), 1.0, 0.0, -90.0).unwrap();
        let c = cw.complement().unwrap();
        assert_relative_eq!(c.sweep_angle(), -270.0);
        assert!(c.start().is_almost_equal_to(&cw.end()));
        assert!(c.end().is_almost_equal_to(&cw.start()));
    }

    #[test]
    fn test_complement_is_involution() {
        for (s, e) in [(10.0, 20.0), (-10.0, 10.0), (0.0, 90.0), (0.0, -90.0), (170.0, 180.0)] {
            let arc = Arc::new(Point3::origin(), 1.0, s, e).unwrap();
            let back = arc.complement().unwrap().complement().unwrap();
            assert_relative_eq!(back.start_angle(), s, epsilon = 1e-9);
            assert_relative_eq!(back.end_angle(), e, epsilon = 1e-9);
        }

        let circle = Arc::circle(Point3::origin(), 1.0).unwrap();
        assert_eq!(circle.complement(), Err(CurveError::FullCircle));
    }

    #[test]
    fn test_to_polyline() {
        let arc = Arc::new(Point3::origin(), 1.0, 10.0, 20.0).unwrap();
        let polyline = arc.to_polyline(10).unwrap();
        assert_eq!(polyline.segments().len(), 10);
        assert!(polyline.vertices()[0].is_almost_equal_to(&arc.start()));
        assert!(polyline.vertices()[10].is_almost_equal_to(&arc.end()));
    }

    #[test]
    fn test_circle_to_polygon() {
        let circle = Arc::circle(Point3::origin(), 1.0).unwrap();
        let polygon = circle.to_polygon(10).unwrap();
        assert_eq!(polygon.segments().len(), 10);
        assert!(polygon.vertices()[0].is_almost_equal_to(&circle.point_at(2.0 * PI)));
    }

    #[test]
    fn test_offset() {
        let arc = Arc::new(Point3::origin(), 5.0, 0.0, 90.0).unwrap();
        assert_relative_eq!(arc.offset(1.0, false).unwrap().radius(), 6.0);
        assert_relative_eq!(arc.offset(1.0, true).unwrap().radius(), 4.0);
        let cw = Arc::new(Point3::origin(), 5.0, 0.0, -90.0).unwrap();
        assert_relative_eq!(cw.offset(1.0, false).unwrap().radius(), 4.0);
        assert_eq!(
            arc.offset(5.0, true),
            Err(CurveError::InvalidRadius(0.0))
        );
    }

    #[test]
    fn test_arc_serde() {
        let arc = Arc::new(Point3::new(1.0, 2.0, 0.0), 3.0, 0.0, 90.0).unwrap();
        let json = serde_json::to_value(&arc).unwrap();
        assert_eq!(json["Radius"], 3.0);
        assert_eq!(json["StartAngle"], 0.0);
        assert_eq!(json["EndAngle"], 90.0);
        assert!(json.get("Plane").is_none());
        let back: Arc = serde_json::from_value(json).unwrap();
        assert_eq!(back, arc);

        let bad = serde_json::json!({
            "Center": [0.0, 0.0, 0.0], "Radius": 0.0, "StartAngle": 0.0, "EndAngle": 90.0
        });
        assert!(serde_json::from_value::<Arc>(bad).is_err());
    }
}
