#![warn(missing_docs)]

//! Building elements on top of the elements geometry kernel.
//!
//! Provides [`StandardWall`] with its [`Opening`]s, [`Topography`] terrain
//! meshes and [`Material`]s. The kernel crates are re-exported for
//! convenience.
//!
//! # Example
//!
//! ```
//! use elements::StandardWall;
//! use elements::elements_kernel_geom::Line;
//! use elements::elements_kernel_math::Point3;
//!
//! let line = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)).unwrap();
//! let mut wall = StandardWall::new(line, 0.2, 3.0).unwrap();
//! wall.add_opening(1.0, 2.0, 5.0, 1.0, 1.0, 1.0).unwrap();
//! assert_eq!(wall.representation().mesh().num_triangles(), 12);
//! assert_eq!(wall.voids().unwrap().len(), 1);
//! ```

pub use elements_kernel_geom;
pub use elements_kernel_math;
pub use elements_kernel_mesh;
pub use elements_kernel_raytrace;
pub use elements_kernel_solids;

mod material;
mod opening;
mod topography;
mod wall;

pub use material::{Color, Material};
pub use opening::Opening;
pub use topography::Topography;
pub use wall::{wall_profile, wall_solid, StandardWall};

use elements_kernel_geom::CurveError;
use elements_kernel_math::MathError;
use elements_kernel_solids::SolidError;
use thiserror::Error;

/// Errors from element construction and updates.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ElementError {
    /// Wall height is not strictly positive.
    #[error("the height of the wall provided, {0}, must be greater than 0.0")]
    InvalidHeight(f64),

    /// Wall thickness is not strictly positive.
    #[error("the provided thickness ({0}) was less than or equal to zero")]
    InvalidThickness(f64),

    /// The wall center line is not horizontal.
    #[error("center line is not horizontal: start Z {start_z}, end Z {end_z}")]
    NonPlanarCenterLine {
        /// Z of the start point.
        start_z: f64,
        /// Z of the end point.
        end_z: f64,
    },

    /// Opening depths are negative or both zero.
    #[error("invalid opening depths: front {front}, back {back}")]
    InvalidOpeningDepth {
        /// Depth along the opening's +Z.
        front: f64,
        /// Depth along the opening's -Z.
        back: f64,
    },

    /// Topography cell size is not strictly positive.
    #[error("invalid cell size {0}: must be greater than zero")]
    InvalidCellSize(f64),

    /// Elevation count is not a square of at least 2×2.
    #[error("{0} elevations do not form a square grid of at least 2×2")]
    InvalidElevationCount(usize),

    /// An elevation is NaN or infinite.
    #[error("elevation {0} is not finite")]
    NonFiniteElevation(usize),

    /// A curve could not be built.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// A solid could not be built.
    #[error(transparent)]
    Solid(#[from] SolidError),

    /// A frame could not be built.
    #[error(transparent)]
    Math(#[from] MathError),
}
