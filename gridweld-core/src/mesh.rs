//! Mesh data structures and functionality

use crate::bounds::BoundingBox;
use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh stored as three parallel sequences.
///
/// `normals[i]` belongs to `positions[i]`, and `triangle_indices` is a flat list
/// where every consecutive triple forms one triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<Point3d>,
    pub normals: Vec<Vector3d>,
    pub triangle_indices: Vec<usize>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from its three parallel sequences
    pub fn from_parts(
        positions: Vec<Point3d>,
        normals: Vec<Vector3d>,
        triangle_indices: Vec<usize>,
    ) -> Self {
        Self {
            positions,
            normals,
            triangle_indices,
        }
    }

    /// Create a mesh from triangle triples
    pub fn from_triangles(
        positions: Vec<Point3d>,
        normals: Vec<Vector3d>,
        triangles: &[[usize; 3]],
    ) -> Self {
        let triangle_indices = triangles.iter().flat_map(|t| t.iter().copied()).collect();
        Self::from_parts(positions, normals, triangle_indices)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Iterate over complete triangles; a trailing partial triple is ignored
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.triangle_indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Check if the mesh has no vertices or no triangles
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.triangle_indices.is_empty()
    }

    /// A mesh can be handed to a renderer only when all three sequences are populated
    pub fn is_renderable(&self) -> bool {
        !self.positions.is_empty() && !self.normals.is_empty() && !self.triangle_indices.is_empty()
    }

    /// Axis-aligned bounds of the positions, `None` when there are none
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.positions)
    }

    /// Check the structural invariants of the mesh
    pub fn validate(&self) -> Result<()> {
        if self.normals.len() != self.positions.len() {
            return Err(Error::InvalidData(format!(
                "Mesh has {} positions but {} normals",
                self.positions.len(),
                self.normals.len()
            )));
        }
        if self.triangle_indices.len() % 3 != 0 {
            return Err(Error::InvalidData(format!(
                "Triangle index count {} is not divisible by 3",
                self.triangle_indices.len()
            )));
        }
        if let Some(&bad) = self
            .triangle_indices
            .iter()
            .find(|&&i| i >= self.positions.len())
        {
            return Err(Error::InvalidData(format!(
                "Triangle index {} out of range for {} positions",
                bad,
                self.positions.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_quad() -> Mesh {
        let n = Vector3d::new(0.0, 0.0, 1.0);
        Mesh::from_triangles(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(1.0, 1.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
            ],
            vec![n; 4],
            &[[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = make_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangle_indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
        assert!(!mesh.is_empty());
        assert!(mesh.is_renderable());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert!(!mesh.is_renderable());
        assert!(mesh.bounds().is_none());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_mismatched_normals() {
        let mut mesh = make_quad();
        mesh.normals.pop();
        assert!(mesh.validate().is_err());
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = make_quad();
        mesh.triangle_indices[5] = 4;
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = make_quad();
        mesh.triangle_indices.push(1);
        assert!(mesh.validate().is_err());
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn test_not_renderable_without_normals() {
        let mut mesh = make_quad();
        mesh.normals.clear();
        assert!(!mesh.is_renderable());
    }
}
