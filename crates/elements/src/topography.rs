//! Terrain as a regular grid of elevations.

use std::sync::OnceLock;

use elements_kernel_math::{Point3, Vec3};
use elements_kernel_mesh::Mesh;
use elements_kernel_raytrace::intersect::intersect_mesh;
use elements_kernel_raytrace::{Ray, RayHit};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ElementError;

/// A square elevation grid anchored at `origin`.
///
/// Elevations are stored row by row: sample `(i, j)` sits at
/// `origin + (i * cell_size, j * cell_size, elevations[j * rows + i])`.
/// The triangle mesh is built on first use and cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "TopographyRecord", try_from = "TopographyRecord")]
pub struct Topography {
    origin: Point3,
    cell_size: f64,
    elevations: Vec<f64>,
    rows: usize,
    mesh: OnceLock<Mesh>,
}

impl Topography {
    /// Create a topography from `rows * rows` elevations.
    pub fn new(origin: Point3, cell_size: f64, elevations: Vec<f64>) -> Result<Self, ElementError> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(ElementError::InvalidCellSize(cell_size));
        }
        let rows = (elevations.len() as f64).sqrt().round() as usize;
        if rows < 2 || rows * rows != elevations.len() {
            return Err(ElementError::InvalidElevationCount(elevations.len()));
        }
        if let Some(i) = elevations.iter().position(|e| !e.is_finite()) {
            return Err(ElementError::NonFiniteElevation(i));
        }
        Ok(Self {
            origin,
            cell_size,
            elevations,
            rows,
            mesh: OnceLock::new(),
        })
    }

    /// Grid origin.
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Spacing between samples.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Elevations, row by row.
    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    /// Samples per side.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Extent of the grid along X and Y.
    pub fn width(&self) -> f64 {
        self.cell_size * (self.rows - 1) as f64
    }

    /// Lowest and highest elevation.
    pub fn elevation_range(&self) -> (f64, f64) {
        self.elevations
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
                (lo.min(e), hi.max(e))
            })
    }

    /// The terrain mesh, two triangles per cell.
    pub fn mesh(&self) -> &Mesh {
        self.mesh.get_or_init(|| self.build_mesh())
    }

    /// All hits of `ray` against the terrain, nearest first.
    pub fn intersect(&self, ray: &Ray) -> Vec<RayHit> {
        intersect_mesh(ray, self.mesh())
    }

    fn build_mesh(&self) -> Mesh {
        let n = self.rows;
        let mut mesh = Mesh::new();
        for j in 0..n {
            for i in 0..n {
                let offset = Vec3::new(
                    i as f64 * self.cell_size,
                    j as f64 * self.cell_size,
                    self.elevations[j * n + i],
                );
                mesh.add_vertex(self.origin + offset);
            }
        }

        let index = |i: usize, j: usize| (j * n + i) as u32;
        for j in 0..n - 1 {
            for i in 0..n - 1 {
                let (a, b) = (index(i, j), index(i + 1, j));
                let (c, d) = (index(i + 1, j + 1), index(i, j + 1));
                for [p, q, r] in [[a, b, c], [a, c, d]] {
                    if let Err(e) = mesh.add_triangle(p, q, r) {
                        warn!(cell_x = i, cell_y = j, error = %e, "skipping terrain triangle");
                    }
                }
            }
        }
        debug!(
            rows = n,
            triangles = mesh.num_triangles(),
            "built topography mesh"
        );
        mesh
    }
}

impl PartialEq for Topography {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.cell_size == other.cell_size
            && self.elevations == other.elevations
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TopographyRecord {
    origin: Point3,
    cell_size: f64,
    elevations: Vec<f64>,
}

impl From<Topography> for TopographyRecord {
    fn from(t: Topography) -> Self {
        Self {
            origin: t.origin,
            cell_size: t.cell_size,
            elevations: t.elevations,
        }
    }
}

impl TryFrom<TopographyRecord> for Topography {
    type Error = ElementError;

    fn try_from(r: TopographyRecord) -> Result<Self, Self::Error> {
        Topography::new(r.origin, r.cell_size, r.elevations)
    }
}
