#![warn(missing_docs)]

//! Indexed triangle meshes for the elements geometry kernel.
//!
//! A [`Mesh`] owns a vertex arena and a list of [`Triangle`]s whose corners
//! are `u32` indices into that arena. Triangles are wound counter-clockwise
//! when seen from the side their normal points to. Degenerate triangles are
//! rejected at insertion.

mod bbox;
mod triangulate;

pub use bbox::Aabb3;
pub use triangulate::triangulate;

use elements_kernel_math::{Dir3, Point3, Tolerance, Vec3};
use thiserror::Error;

/// Errors from mesh construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeshError {
    /// The triangle's corners are collinear or repeated.
    #[error("degenerate triangle {0:?}")]
    DegenerateTriangle([u32; 3]),

    /// A triangle refers to a vertex that does not exist.
    #[error("vertex index {index} out of range ({count} vertices)")]
    VertexOutOfRange {
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        count: usize,
    },
}

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position.
    pub position: Point3,
    /// Shading normal, if known.
    pub normal: Option<Dir3>,
}

/// A triangle referring to three vertices of its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Vertex indices, counter-clockwise around the face normal.
    pub vertices: [u32; 3],
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex without a normal, returning its index.
    pub fn add_vertex(&mut self, position: Point3) -> u32 {
        self.vertices.push(Vertex {
            position,
            normal: None,
        });
        (self.vertices.len() - 1) as u32
    }

    /// Add a vertex with a shading normal, returning its index.
    pub fn add_vertex_with_normal(&mut self, position: Point3, normal: Dir3) -> u32 {
        self.vertices.push(Vertex {
            position,
            normal: Some(normal),
        });
        (self.vertices.len() - 1) as u32
    }

    /// Add a triangle over existing vertices, returning its index.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) -> Result<usize, MeshError> {
        let count = self.vertices.len();
        if let Some(&index) = [a, b, c].iter().find(|&&i| i as usize >= count) {
            return Err(MeshError::VertexOutOfRange { index, count });
        }
        let triangle = Triangle {
            vertices: [a, b, c],
        };
        if self.triangle_normal(&triangle).is_none() {
            return Err(MeshError::DegenerateTriangle(triangle.vertices));
        }
        self.triangles.push(triangle);
        Ok(self.triangles.len() - 1)
    }

    /// All vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of a triangle.
    pub fn triangle_points(&self, triangle: &Triangle) -> [Point3; 3] {
        triangle.vertices.map(|i| self.vertices[i as usize].position)
    }

    /// Unit face normal, or `None` for a degenerate triangle.
    pub fn triangle_normal(&self, triangle: &Triangle) -> Option<Dir3> {
        let [a, b, c] = self.triangle_points(triangle);
        let n = (b - a).cross(&(c - a));
        Dir3::try_new(n, Tolerance::DEFAULT.linear)
    }

    /// Append all vertices and triangles of `other`, re-indexing its
    /// triangles.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(other.triangles.iter().map(|t| Triangle {
            vertices: t.vertices.map(|i| i + offset),
        }));
    }

    /// Bounds of every vertex.
    pub fn bounds(&self) -> Aabb3 {
        Aabb3::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Reverse every triangle and vertex normal.
    pub fn flip_winding(&mut self) {
        for t in &mut self.triangles {
            t.vertices.swap(1, 2);
        }
        for v in &mut self.vertices {
            v.normal = v.normal.map(|n| Dir3::new_unchecked(-n.into_inner()));
        }
    }

    /// Replace vertex normals with area-weighted averages of the face
    /// normals around each vertex.
    pub fn compute_normals(&mut self) {
        let mut sums = vec![Vec3::zeros(); self.vertices.len()];
        for t in &self.triangles {
            let [a, b, c] = self.triangle_points(t);
            let weighted = (b - a).cross(&(c - a));
            for &i in &t.vertices {
                sums[i as usize] += weighted;
            }
        }
        for (v, sum) in self.vertices.iter_mut().zip(sums) {
            v.normal = Dir3::try_new(sum, Tolerance::DEFAULT.linear);
        }
    }

    /// Total surface area.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = self.triangle_points(t);
                (b - a).cross(&(c - a)).norm() / 2.0
            })
            .sum()
    }
}
