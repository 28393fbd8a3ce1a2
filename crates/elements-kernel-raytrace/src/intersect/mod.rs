//! Ray intersection queries.
//!
//! Planes and triangles are solved in closed form; meshes and solids test
//! every triangle after an AABB cull.

mod mesh;
mod plane;
mod triangle;

pub use mesh::{cast_rays, intersect_mesh, intersect_solid};
pub use plane::intersect_plane;
pub use triangle::intersect_triangle;
