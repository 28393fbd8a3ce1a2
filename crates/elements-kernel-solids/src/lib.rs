#![warn(missing_docs)]

//! Solid operations for the elements geometry kernel.
//!
//! A [`Solid`] is an ordered list of [`SolidOperation`]s. Each operation
//! tessellates itself to a triangle [`Mesh`]; the solid's mesh is their
//! concatenation. No boolean combination is performed. Elements carry
//! their solids in a [`Representation`].
//!
//! # Example
//!
//! ```
//! use elements_kernel_geom::Polygon;
//! use elements_kernel_math::Vec3;
//! use elements_kernel_solids::{Extrude, Solid};
//!
//! let profile = Polygon::rectangle(4.0, 0.2).unwrap();
//! let extrude = Extrude::new(profile, 3.0, Vec3::z(), false).unwrap();
//! let solid = Solid::from_operation(extrude);
//! assert_eq!(solid.mesh().num_triangles(), 12);
//! ```

mod builder;
mod extrude;
mod lamina;
mod representation;
mod sweep;

pub use extrude::Extrude;
pub use lamina::Lamina;
pub use representation::Representation;
pub use sweep::Sweep;

use elements_kernel_geom::CurveError;
use elements_kernel_mesh::Mesh;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from solid construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolidError {
    /// Extrusion direction has zero length.
    #[error("extrusion direction is zero")]
    ZeroDirection,

    /// Extrusion distance is not strictly positive.
    #[error("invalid extrusion distance {0}: must be greater than zero")]
    InvalidDistance(f64),

    /// Sweep setbacks are negative or consume the whole path.
    #[error("invalid setbacks: start {start}, end {end}")]
    InvalidSetbacks {
        /// Setback at the start of the path.
        start: f64,
        /// Setback at the end of the path.
        end: f64,
    },

    /// A profile or path could not be built.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// One construction step of a solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum SolidOperation {
    /// Straight extrusion of a profile.
    Extrude(Extrude),
    /// Profile swept along a curve.
    Sweep(Sweep),
    /// Two-sided planar patch.
    Lamina(Lamina),
}

impl SolidOperation {
    /// Tessellate this operation.
    pub fn mesh(&self) -> Mesh {
        match self {
            SolidOperation::Extrude(op) => op.mesh(),
            SolidOperation::Sweep(op) => op.mesh(),
            SolidOperation::Lamina(op) => op.mesh(),
        }
    }
}

impl From<Extrude> for SolidOperation {
    fn from(op: Extrude) -> Self {
        SolidOperation::Extrude(op)
    }
}

impl From<Sweep> for SolidOperation {
    fn from(op: Sweep) -> Self {
        SolidOperation::Sweep(op)
    }
}

impl From<Lamina> for SolidOperation {
    fn from(op: Lamina) -> Self {
        SolidOperation::Lamina(op)
    }
}

/// An ordered collection of solid operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Solid {
    solid_operations: Vec<SolidOperation>,
}

impl Solid {
    /// A solid with no operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// A solid made of a single operation.
    pub fn from_operation(op: impl Into<SolidOperation>) -> Self {
        Self {
            solid_operations: vec![op.into()],
        }
    }

    /// Append an operation.
    pub fn push(&mut self, op: impl Into<SolidOperation>) {
        self.solid_operations.push(op.into());
    }

    /// Operations in order.
    pub fn operations(&self) -> &[SolidOperation] {
        &self.solid_operations
    }

    /// True if the solid has no operations.
    pub fn is_empty(&self) -> bool {
        self.solid_operations.is_empty()
    }

    /// Concatenated mesh of every operation.
    pub fn mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        for op in &self.solid_operations {
            mesh.merge(&op.mesh());
        }
        mesh
    }
}
