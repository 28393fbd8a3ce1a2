//! Element representations: the solids an element is drawn with.

use elements_kernel_mesh::Mesh;
use serde::{Deserialize, Serialize};

use crate::Solid;

/// The 3D representation of an element, a list of solids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Representation {
    geometries: Vec<Solid>,
}

impl Representation {
    /// An empty representation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A representation holding one solid.
    pub fn from_solid(solid: Solid) -> Self {
        Self {
            geometries: vec![solid],
        }
    }

    /// Append a solid.
    pub fn push(&mut self, solid: Solid) {
        self.geometries.push(solid);
    }

    /// Remove every solid.
    pub fn clear(&mut self) {
        self.geometries.clear();
    }

    /// Solids in order.
    pub fn geometries(&self) -> &[Solid] {
        &self.geometries
    }

    /// True if there are no solids.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Concatenated mesh of every solid.
    pub fn mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for solid in &self.geometries {
            mesh.merge(&solid.mesh());
        }
        mesh
    }
}

impl From<Solid> for Representation {
    fn from(solid: Solid) -> Self {
        Self::from_solid(solid)
    }
}
