//! Openings: voids to be cut from a host element.

use elements_kernel_geom::Polygon;
use elements_kernel_math::Transform;
use elements_kernel_solids::{Extrude, SolidError};
use serde::{Deserialize, Serialize};

use crate::ElementError;

/// A void defined by a perimeter in the XY plane of its own frame.
///
/// The void reaches `depth_front` along the frame's +Z and `depth_back`
/// along its -Z. Carving it out of the host is left to a boolean stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "OpeningRecord")]
pub struct Opening {
    perimeter: Polygon,
    depth_front: f64,
    depth_back: f64,
    transform: Transform,
}

impl Opening {
    /// Create an opening. Depths must be non-negative and not both zero.
    pub fn new(
        perimeter: Polygon,
        depth_front: f64,
        depth_back: f64,
        transform: Transform,
    ) -> Result<Self, ElementError> {
        if !(depth_front >= 0.0 && depth_back >= 0.0 && depth_front + depth_back > 0.0) {
            return Err(ElementError::InvalidOpeningDepth {
                front: depth_front,
                back: depth_back,
            });
        }
        Ok(Self {
            perimeter,
            depth_front,
            depth_back,
            transform,
        })
    }

    /// Perimeter in the opening's local XY plane.
    pub fn perimeter(&self) -> &Polygon {
        &self.perimeter
    }

    /// Depth along the opening's +Z.
    pub fn depth_front(&self) -> f64 {
        self.depth_front
    }

    /// Depth along the opening's -Z.
    pub fn depth_back(&self) -> f64 {
        self.depth_back
    }

    /// Placement of the opening.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The void as an extrusion in world space, from `-depth_back` to
    /// `+depth_front` along the opening's Z axis.
    pub fn void_operation(&self) -> Result<Extrude, SolidError> {
        let z = self.transform.z_axis();
        let base = self
            .transform
            .moved_to(self.transform.origin() - z.as_ref() * self.depth_back);
        let profile = self.perimeter.transformed(&base);
        Extrude::new(
            profile,
            self.depth_front + self.depth_back,
            z.into_inner(),
            false,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OpeningRecord {
    perimeter: Polygon,
    depth_front: f64,
    depth_back: f64,
    transform: Transform,
}

impl TryFrom<OpeningRecord> for Opening {
    type Error = ElementError;

    fn try_from(r: OpeningRecord) -> Result<Self, Self::Error> {
        Opening::new(r.perimeter, r.depth_front, r.depth_back, r.transform)
    }
}
