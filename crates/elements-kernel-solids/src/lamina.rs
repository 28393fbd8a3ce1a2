//! Lamina operation: a zero-thickness planar patch.

use elements_kernel_geom::Polygon;
use elements_kernel_mesh::Mesh;
use serde::{Deserialize, Serialize};

use crate::builder::MeshBuilder;

/// A planar patch bounded by a polygon, meshed on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lamina {
    /// Boundary of the patch.
    pub perimeter: Polygon,
}

impl Lamina {
    /// Create a lamina over `perimeter`.
    pub fn new(perimeter: Polygon) -> Self {
        Self { perimeter }
    }

    /// Front faces wound like the perimeter, back faces opposite.
    pub fn mesh(&self) -> Mesh {
        let points = self.perimeter.vertices();
        let normal = self.perimeter.normal();
        let mut builder = MeshBuilder::new();
        builder.cap(points, &normal, false);
        builder.cap(points, &normal, true);
        builder.finish(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lamina_is_two_sided() {
        let mesh = Lamina::new(Polygon::rectangle(2.0, 3.0).unwrap()).mesh();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 4);
        assert_relative_eq!(mesh.area(), 12.0, epsilon = 1e-12);
        let up = mesh
            .triangles()
            .iter()
            .filter(|t| mesh.triangle_normal(t).unwrap().z > 0.0)
            .count();
        assert_eq!(up, 2);
    }
}
