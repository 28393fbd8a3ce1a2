//! Extrude operation: a profile swept along a straight direction.

use elements_kernel_geom::Polygon;
use elements_kernel_math::{Dir3, Point3, Vec3, EPSILON};
use elements_kernel_mesh::Mesh;
use serde::{Deserialize, Serialize};

use crate::builder::MeshBuilder;
use crate::SolidError;

/// A polygon profile extruded `distance` along `direction`.
///
/// The bottom cap is the profile itself with its winding reversed; the top
/// cap is the profile translated by `distance * direction`. `reversed`
/// flips every triangle of the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ExtrudeRecord", try_from = "ExtrudeRecord")]
pub struct Extrude {
    profile: Polygon,
    distance: f64,
    direction: Dir3,
    reversed: bool,
}

impl Extrude {
    /// Create an extrusion. `direction` is normalized.
    ///
    /// # Example
    ///
    /// ```
    /// use elements_kernel_geom::Polygon;
    /// use elements_kernel_math::Vec3;
    /// use elements_kernel_solids::Extrude;
    ///
    /// let profile = Polygon::rectangle(10.0, 5.0).unwrap();
    /// let extrude = Extrude::new(profile, 20.0, Vec3::z(), false).unwrap();
    /// // 2 triangles per cap, 2 per side
    /// assert_eq!(extrude.mesh().num_triangles(), 12);
    /// ```
    pub fn new(
        profile: Polygon,
        distance: f64,
        direction: Vec3,
        reversed: bool,
    ) -> Result<Self, SolidError> {
        let direction = Dir3::try_new(direction, EPSILON).ok_or(SolidError::ZeroDirection)?;
        if !(distance > 0.0) {
            return Err(SolidError::InvalidDistance(distance));
        }
        Ok(Self {
            profile,
            distance,
            direction,
            reversed,
        })
    }

    /// Profile at the base of the extrusion.
    pub fn profile(&self) -> &Polygon {
        &self.profile
    }

    /// Extrusion length.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Unit extrusion direction.
    pub fn direction(&self) -> Dir3 {
        self.direction
    }

    /// Whether the mesh winding is flipped.
    pub fn reversed(&self) -> bool {
        self.reversed
    }

    /// Tessellate into a closed triangle mesh.
    pub fn mesh(&self) -> Mesh {
        let shift = self.direction.as_ref() * self.distance;
        let bottom = self.profile.vertices();
        let top: Vec<Point3> = bottom.iter().map(|p| p + shift).collect();
        let normal = self.profile.normal();

        let mut builder = MeshBuilder::new();
        builder.cap(bottom, &normal, true);
        builder.cap(&top, &normal, false);
        builder.band(bottom, &top);
        builder.finish(self.reversed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExtrudeRecord {
    profile: Polygon,
    distance: f64,
    direction: Vec3,
    #[serde(default)]
    reversed: bool,
}

impl From<Extrude> for ExtrudeRecord {
    fn from(e: Extrude) -> Self {
        Self {
            profile: e.profile,
            distance: e.distance,
            direction: e.direction.into_inner(),
            reversed: e.reversed,
        }
    }
}

impl TryFrom<ExtrudeRecord> for Extrude {
    type Error = SolidError;

    fn try_from(r: ExtrudeRecord) -> Result<Self, Self::Error> {
        Extrude::new(r.profile, r.distance, r.direction, r.reversed)
    }
}
