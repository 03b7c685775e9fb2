//! Core data structures and traits for gridweld
//!
//! This crate provides the fundamental types shared by the decimator and the
//! persistence layer: vectors, meshes, geometry parts, model groups, colors and
//! axis-aligned bounds.

pub mod point;
pub mod mesh;
pub mod model;
pub mod color;
pub mod bounds;
pub mod traits;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use model::*;
pub use color::*;
pub use bounds::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
