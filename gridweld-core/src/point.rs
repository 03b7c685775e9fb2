//! Point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D position with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components.
///
/// Normals use this type as well; they are carried as-is and never renormalized.
pub type Vector3d = Vector3<f64>;
