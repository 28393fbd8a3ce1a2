//! Sweep operation: a profile carried along a curve.

use elements_kernel_geom::{Curve, Curve3d, Polygon};
use elements_kernel_math::{Point3, Transform};
use elements_kernel_mesh::Mesh;
use serde::{Deserialize, Serialize};

use crate::builder::MeshBuilder;
use crate::SolidError;

/// A profile swept along a path curve.
///
/// The profile is read in its local XY coordinates: local X maps to the
/// Y axis and local Y to the Z axis of each path frame, so the profile
/// plane stays perpendicular to the path tangent. One ring is placed per
/// path sample parameter; consecutive rings are joined with quads and
/// both ends are capped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SweepRecord", try_from = "SweepRecord")]
pub struct Sweep {
    profile: Polygon,
    path: Curve,
    start_setback: f64,
    end_setback: f64,
    reversed: bool,
}

impl Sweep {
    /// Sweep `profile` along the whole of `path`.
    pub fn new(profile: Polygon, path: impl Into<Curve>, reversed: bool) -> Self {
        Self {
            profile,
            path: path.into(),
            start_setback: 0.0,
            end_setback: 0.0,
            reversed,
        }
    }

    /// Trim the swept range by parameter amounts at each end of the path.
    pub fn with_setbacks(mut self, start: f64, end: f64) -> Result<Self, SolidError> {
        if !(start >= 0.0 && end >= 0.0) || start + end >= self.path.domain().length().abs() {
            return Err(SolidError::InvalidSetbacks { start, end });
        }
        self.start_setback = start;
        self.end_setback = end;
        Ok(self)
    }

    /// Cross-section profile, in local XY.
    pub fn profile(&self) -> &Polygon {
        &self.profile
    }

    /// Path curve.
    pub fn path(&self) -> &Curve {
        &self.path
    }

    /// Setbacks at the start and end of the path.
    pub fn setbacks(&self) -> (f64, f64) {
        (self.start_setback, self.end_setback)
    }

    fn ring(&self, frame: &Transform) -> Vec<Point3> {
        self.profile
            .vertices()
            .iter()
            .map(|p| frame.apply_point(&Point3::new(0.0, p.x, p.y)))
            .collect()
    }

    /// Tessellate into a triangle mesh.
    pub fn mesh(&self) -> Mesh {
        let frames = self.path.frames(self.start_setback, self.end_setback);
        let rings: Vec<Vec<Point3>> = frames.iter().map(|f| self.ring(f)).collect();

        let mut builder = MeshBuilder::new();
        if let (Some(first), Some(last)) = (frames.first(), frames.last()) {
            // profile normal (local +Z) maps to the frame X axis
            builder.cap(&rings[0], &first.x_axis(), true);
            builder.cap(&rings[rings.len() - 1], &last.x_axis(), false);
        }
        for pair in rings.windows(2) {
            builder.band(&pair[0], &pair[1]);
        }
        builder.finish(self.reversed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SweepRecord {
    profile: Polygon,
    curve: Curve,
    #[serde(default)]
    start_setback: f64,
    #[serde(default)]
    end_setback: f64,
    #[serde(default)]
    reversed: bool,
}

impl From<Sweep> for SweepRecord {
    fn from(s: Sweep) -> Self {
        Self {
            profile: s.profile,
            curve: s.path,
            start_setback: s.start_setback,
            end_setback: s.end_setback,
            reversed: s.reversed,
        }
    }
}

impl TryFrom<SweepRecord> for Sweep {
    type Error = SolidError;

    fn try_from(r: SweepRecord) -> Result<Self, Self::Error> {
        let sweep = Sweep::new(r.profile, r.curve, r.reversed);
        if r.start_setback == 0.0 && r.end_setback == 0.0 {
            return Ok(sweep);
        }
        sweep.with_setbacks(r.start_setback, r.end_setback)
    }
}
