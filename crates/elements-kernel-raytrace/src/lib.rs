#![warn(missing_docs)]

//! Ray intersection for the elements geometry kernel.
//!
//! - [`Ray`] - origin plus unit direction, with a slab test against [`Aabb3`]
//! - [`RayHit`] - parameter, point and triangle of an intersection
//! - [`intersect`] - ray–plane, ray–triangle, ray–mesh and ray–solid queries
//!
//! A miss is never an error: queries return `Option` or an empty `Vec`.
//!
//! # Example
//!
//! ```
//! use elements_kernel_geom::Polygon;
//! use elements_kernel_math::{Point3, Vec3};
//! use elements_kernel_raytrace::{intersect::intersect_solid, Ray};
//! use elements_kernel_solids::{Extrude, Solid};
//!
//! let profile = Polygon::rectangle(2.0, 2.0).unwrap();
//! let solid = Solid::from_operation(Extrude::new(profile, 2.0, Vec3::z(), false).unwrap());
//! let ray = Ray::new(Point3::new(-5.0, 0.0, 1.0), Vec3::x()).unwrap();
//! let hits = intersect_solid(&ray, &solid);
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! [`Aabb3`]: elements_kernel_mesh::Aabb3

pub mod intersect;
mod ray;

pub use ray::{Ray, RayHit};

use thiserror::Error;

/// Errors from ray construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RayError {
    /// The ray direction has zero length.
    #[error("ray direction is zero")]
    ZeroDirection,
}
