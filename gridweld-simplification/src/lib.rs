//! Mesh simplification by grid-bucket vertex welding
//!
//! Vertices that fall into the same cubic grid cell are welded into one
//! representative vertex and triangles that collapse are removed. A single unit
//! size can be shared by every part of a model group so neighbouring parts are
//! simplified consistently.

pub mod grid;

pub use grid::*;

use gridweld_core::{Mesh, Result};

/// Simplify a mesh by reducing the number of vertices/triangles
pub trait MeshSimplifier {
    /// Simplify `mesh`; an error means no usable simplified mesh exists and the
    /// caller should keep the original.
    fn simplify(&self, mesh: &Mesh) -> Result<Mesh>;
}
