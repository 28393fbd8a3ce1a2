#![warn(missing_docs)]

//! Parametric curve types for the elements geometry kernel.
//!
//! Every curve implements [`Curve3d`]: a parameter [`Domain`], point and
//! frame evaluation, sampling, and conversion to polylines/polygons. The
//! closed [`Curve`] enum holds any of the four variants.
//!
//! # Example
//!
//! ```
//! use elements_kernel_geom::{Arc, Curve3d};
//! use elements_kernel_math::{ApproxEq, Point3};
//!
//! let arc = Arc::new(Point3::origin(), 2.0, 0.0, 90.0).unwrap();
//! assert!(arc.end().is_almost_equal_to(&Point3::new(0.0, 2.0, 0.0)));
//! let polyline = arc.to_polyline(8).unwrap();
//! assert_eq!(polyline.segments().len(), 8);
//! ```

mod arc;
mod chain;
mod line;
mod plane;
mod polygon;
mod polyline;

pub use arc::Arc;
pub use line::Line;
pub use plane::Plane;
pub use polygon::Polygon;
pub use polyline::Polyline;

use std::f64::consts::PI;

use elements_kernel_math::{Domain, MathError, Point3, Tolerance, Transform, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from curve construction and curve operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CurveError {
    /// An arc's start and end angles are equal.
    #[error("degenerate sweep: start and end angle are both {0}°")]
    DegenerateSweep(f64),

    /// An arc radius is not strictly positive.
    #[error("invalid radius {0}: must be greater than zero")]
    InvalidRadius(f64),

    /// A line's endpoints coincide.
    #[error("line has zero length")]
    ZeroLength,

    /// Not enough vertices for the requested curve.
    #[error("{kind} requires at least {required} vertices, found {found}")]
    TooFewVertices {
        /// Curve being built.
        kind: &'static str,
        /// Minimum vertex count.
        required: usize,
        /// Vertex count supplied.
        found: usize,
    },

    /// Two consecutive vertices coincide.
    #[error("vertices {0} and {1} are coincident")]
    CoincidentVertices(usize, usize),

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {0} is not finite")]
    NonFiniteVertex(usize),

    /// Polygon vertices do not lie in one plane.
    #[error("polygon vertices are not coplanar")]
    NonPlanar,

    /// Polygon vertices are collinear.
    #[error("polygon has zero area")]
    ZeroArea,

    /// A segment count of zero was requested.
    #[error("invalid segment count {0}")]
    InvalidSegmentCount(usize),

    /// A vertical line has no perpendicular in the XY plane.
    #[error("vertical lines have no horizontal offset direction")]
    VerticalOffset,

    /// A full circle leaves nothing to complement.
    #[error("a full circle has no complement")]
    FullCircle,

    /// A width or height is not strictly positive.
    #[error("invalid dimension {0}: must be greater than zero")]
    InvalidDimension(f64),

    /// A frame could not be built.
    #[error(transparent)]
    Frame(#[from] MathError),
}

/// Controls how finely curves are sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSampling {
    /// Maximum distance between an arc and its chords.
    pub chord_height: f64,
    /// Maximum angle swept by one chord, in radians.
    pub max_angle: f64,
    /// Upper bound on segments per curve.
    pub max_segments: usize,
}

impl CurveSampling {
    /// Default sampling: 0.01 chord height, 10° max angle, 512 segments.
    pub const DEFAULT: Self = Self {
        chord_height: 0.01,
        max_angle: PI / 18.0,
        max_segments: 512,
    };

    /// Angular step for an arc of the given radius.
    pub fn angular_step(&self, radius: f64) -> f64 {
        if self.chord_height >= radius {
            return self.max_angle;
        }
        let step = 2.0 * (1.0 - self.chord_height / radius).acos();
        step.min(self.max_angle)
    }
}

impl Default for CurveSampling {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A parametric curve in 3D space.
pub trait Curve3d {
    /// Parameter domain.
    fn domain(&self) -> Domain;

    /// Arc length of the curve.
    fn length(&self) -> f64;

    /// Point at the start of the domain.
    fn start(&self) -> Point3;

    /// Point at the end of the domain.
    fn end(&self) -> Point3;

    /// Point at parameter `t`, clamped into the domain.
    fn point_at(&self, t: f64) -> Point3;

    /// Frame at parameter `t`: X is the tangent, Z the curve's defining
    /// normal, Y completes the right-handed frame.
    fn transform_at(&self, t: f64) -> Transform;

    /// Ordered parameters that approximate the curve under `sampling`.
    fn sample_parameters_with(&self, sampling: &CurveSampling) -> Vec<f64>;

    /// Ordered parameters under the default sampling.
    fn sample_parameters(&self) -> Vec<f64> {
        self.sample_parameters_with(&CurveSampling::DEFAULT)
    }

    /// Frames at the sample parameters, squeezed into the part of the
    /// domain left after trimming `start_setback` and `end_setback`
    /// (both in parameter units). Empty if the setbacks overlap.
    fn frames(&self, start_setback: f64, end_setback: f64) -> Vec<Transform> {
        let domain = self.domain();
        let sign = if domain.is_reversed() { -1.0 } else { 1.0 };
        let trimmed = Domain::new(
            domain.min + sign * start_setback,
            domain.max - sign * end_setback,
        );
        if trimmed.length() * sign < 0.0 {
            return Vec::new();
        }
        self.sample_parameters()
            .into_iter()
            .map(|t| self.transform_at(trimmed.parameter_at(domain.fraction_of(t))))
            .collect()
    }

    /// Sample `segments + 1` evenly spaced points into a polyline.
    fn to_polyline(&self, segments: usize) -> Result<Polyline, CurveError> {
        let points = divide_domain(self.domain(), segments)?
            .into_iter()
            .map(|t| self.point_at(t))
            .collect();
        Polyline::new(points)
    }

    /// Sample `segments + 1` evenly spaced points into a polygon. A closing
    /// point equal to the first is dropped.
    fn to_polygon(&self, segments: usize) -> Result<Polygon, CurveError> {
        let mut points: Vec<Point3> = divide_domain(self.domain(), segments)?
            .into_iter()
            .map(|t| self.point_at(t))
            .collect();
        let tol = Tolerance::DEFAULT;
        if points.len() > 3 && tol.points_equal(&points[0], &points[points.len() - 1]) {
            points.pop();
        }
        Polygon::new(points)
    }
}

/// `segments + 1` parameters evenly spaced over `domain`, ends exact.
pub(crate) fn divide_domain(domain: Domain, segments: usize) -> Result<Vec<f64>, CurveError> {
    if segments == 0 {
        return Err(CurveError::InvalidSegmentCount(segments));
    }
    Ok((0..=segments)
        .map(|i| {
            if i == segments {
                domain.max
            } else {
                domain.parameter_at(i as f64 / segments as f64)
            }
        })
        .collect())
}

/// Frame with `tangent` as X and `normal` (orthogonalized) as Z.
///
/// Falls back to world X as the Z hint when the tangent is parallel to
/// `normal`.
pub(crate) fn tangent_frame(origin: Point3, tangent: Vec3, normal: Vec3) -> Transform {
    Transform::from_x_and_z(origin, tangent, normal)
        .or_else(|_| Transform::from_x_and_z(origin, tangent, Vec3::x()))
        .unwrap_or_else(|_| Transform::from_origin(origin))
}

/// The kind of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight segment.
    Line,
    /// Circular arc.
    Arc,
    /// Closed planar polygon.
    Polygon,
    /// Open chain of segments.
    Polyline,
}

/// Any kernel curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum Curve {
    /// A line.
    Line(Line),
    /// An arc.
    Arc(Arc),
    /// A polygon.
    Polygon(Polygon),
    /// A polyline.
    Polyline(Polyline),
}

macro_rules! each_curve {
    ($curve:expr, $c:ident => $body:expr) => {
        match $curve {
            Curve::Line($c) => $body,
            Curve::Arc($c) => $body,
            Curve::Polygon($c) => $body,
            Curve::Polyline($c) => $body,
        }
    };
}

impl Curve {
    /// Variant tag.
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve::Line(_) => CurveKind::Line,
            Curve::Arc(_) => CurveKind::Arc,
            Curve::Polygon(_) => CurveKind::Polygon,
            Curve::Polyline(_) => CurveKind::Polyline,
        }
    }

    /// Offset perpendicular to the tangent, preserving the variant.
    ///
    /// The offset direction is `tangent × normal`; `flip` reverses it.
    pub fn offset(&self, distance: f64, flip: bool) -> Result<Curve, CurveError> {
        Ok(match self {
            Curve::Line(c) => Curve::Line(c.offset(distance, flip)?),
            Curve::Arc(c) => Curve::Arc(c.offset(distance, flip)?),
            Curve::Polygon(c) => Curve::Polygon(c.offset(distance, flip)?),
            Curve::Polyline(c) => Curve::Polyline(c.offset(distance, flip)?),
        })
    }
}

impl Curve3d for Curve {
    fn domain(&self) -> Domain {
        each_curve!(self, c => c.domain())
    }

    fn length(&self) -> f64 {
        each_curve!(self, c => c.length())
    }

    fn start(&self) -> Point3 {
        each_curve!(self, c => c.start())
    }

    fn end(&self) -> Point3 {
        each_curve!(self, c => c.end())
    }

    fn point_at(&self, t: f64) -> Point3 {
        each_curve!(self, c => c.point_at(t))
    }

    fn transform_at(&self, t: f64) -> Transform {
        each_curve!(self, c => c.transform_at(t))
    }

    fn sample_parameters_with(&self, sampling: &CurveSampling) -> Vec<f64> {
        each_curve!(self, c => c.sample_parameters_with(sampling))
    }
}

impl From<Line> for Curve {
    fn from(c: Line) -> Self {
        Curve::Line(c)
    }
}

impl From<Arc> for Curve {
    fn from(c: Arc) -> Self {
        Curve::Arc(c)
    }
}

impl From<Polygon> for Curve {
    fn from(c: Polygon) -> Self {
        Curve::Polygon(c)
    }
}

impl From<Polyline> for Curve {
    fn from(c: Polyline) -> Self {
        Curve::Polyline(c)
    }
}
