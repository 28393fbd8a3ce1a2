//! Incremental mesh assembly shared by the solid operations.

use std::collections::HashMap;

use elements_kernel_math::{Dir3, Point3};
use elements_kernel_mesh::{triangulate, Mesh};
use tracing::{debug, warn};

/// Builds a [`Mesh`] from rings and caps, merging coincident positions.
pub(crate) struct MeshBuilder {
    mesh: Mesh,
    // quantized position -> vertex index
    vertex_cache: HashMap<[i64; 3], u32>,
    skipped: usize,
}

fn quantize_pt(p: &Point3) -> [i64; 3] {
    [
        (p.x * 1e9).round() as i64,
        (p.y * 1e9).round() as i64,
        (p.z * 1e9).round() as i64,
    ]
}

impl MeshBuilder {
    pub(crate) fn new() -> Self {
        Self {
            mesh: Mesh::new(),
            vertex_cache: HashMap::new(),
            skipped: 0,
        }
    }

    pub(crate) fn vertex(&mut self, p: &Point3) -> u32 {
        let mesh = &mut self.mesh;
        *self
            .vertex_cache
            .entry(quantize_pt(p))
            .or_insert_with(|| mesh.add_vertex(*p))
    }

    /// Add a triangle; degenerate ones are logged and dropped.
    pub(crate) fn triangle(&mut self, a: u32, b: u32, c: u32) {
        if let Err(err) = self.mesh.add_triangle(a, b, c) {
            warn!(%err, "skipping triangle");
            self.skipped += 1;
        }
    }

    /// Quad `a b c d` as triangles `(a, b, c)` and `(a, c, d)`.
    pub(crate) fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.triangle(a, b, c);
        self.triangle(a, c, d);
    }

    /// Triangulated planar cap, wound like `points` or opposite when `flip`.
    pub(crate) fn cap(&mut self, points: &[Point3], normal: &Dir3, flip: bool) {
        let ids: Vec<u32> = points.iter().map(|p| self.vertex(p)).collect();
        for [a, b, c] in triangulate(points, normal) {
            if flip {
                self.triangle(ids[a], ids[c], ids[b]);
            } else {
                self.triangle(ids[a], ids[b], ids[c]);
            }
        }
    }

    /// Side quads `lower_i, lower_next, upper_next, upper_i` around two
    /// matching closed rings.
    pub(crate) fn band(&mut self, lower: &[Point3], upper: &[Point3]) {
        let n = lower.len();
        let lower: Vec<u32> = lower.iter().map(|p| self.vertex(p)).collect();
        let upper: Vec<u32> = upper.iter().map(|p| self.vertex(p)).collect();
        for i in 0..n {
            let next = (i + 1) % n;
            self.quad(lower[i], lower[next], upper[next], upper[i]);
        }
    }

    pub(crate) fn finish(mut self, reversed: bool) -> Mesh {
        if reversed {
            self.mesh.flip_winding();
        }
        debug!(
            vertices = self.mesh.num_vertices(),
            triangles = self.mesh.num_triangles(),
            skipped = self.skipped,
            "built solid mesh"
        );
        self.mesh
    }
}
