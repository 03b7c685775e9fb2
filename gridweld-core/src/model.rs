//! Geometry parts and model groups

use crate::bounds::BoundingBox;
use crate::color::Color;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One mesh with its front-face and back-face colors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryPart {
    pub mesh: Mesh,
    pub front_color: Color,
    pub back_color: Color,
}

impl GeometryPart {
    pub fn new(mesh: Mesh, front_color: Color, back_color: Color) -> Self {
        Self {
            mesh,
            front_color,
            back_color,
        }
    }

    /// Bounds of the part's mesh, `None` when it has no positions
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.mesh.bounds()
    }

    /// When both colors match, the back material can reuse the front one
    pub fn is_single_sided_hint(&self) -> bool {
        self.front_color == self.back_color
    }

    /// Same colors, different mesh
    pub fn with_mesh(&self, mesh: Mesh) -> Self {
        Self::new(mesh, self.front_color, self.back_color)
    }
}

/// An ordered collection of independent geometry parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelGroup {
    pub parts: Vec<GeometryPart>,
}

impl ModelGroup {
    /// Create a new empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group from a vector of parts
    pub fn from_parts(parts: Vec<GeometryPart>) -> Self {
        Self { parts }
    }

    /// Get the number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the group has no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append a part, keeping insertion order
    pub fn push(&mut self, part: GeometryPart) {
        self.parts.push(part);
    }

    /// Get an iterator over the parts
    pub fn iter(&self) -> std::slice::Iter<'_, GeometryPart> {
        self.parts.iter()
    }

    /// Union of all part bounds; parts without positions do not contribute
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::union_all(self.parts.iter().map(GeometryPart::bounds))
    }

    pub fn total_vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.vertex_count()).sum()
    }

    pub fn total_triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }

    /// Parts whose meshes can be handed to a renderer
    pub fn renderable_parts(&self) -> impl Iterator<Item = &GeometryPart> + '_ {
        self.parts.iter().filter(|p| p.mesh.is_renderable())
    }
}

impl Index<usize> for ModelGroup {
    type Output = GeometryPart;

    fn index(&self, index: usize) -> &Self::Output {
        &self.parts[index]
    }
}

impl IntoIterator for ModelGroup {
    type Item = GeometryPart;
    type IntoIter = std::vec::IntoIter<GeometryPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModelGroup {
    type Item = &'a GeometryPart;
    type IntoIter = std::slice::Iter<'a, GeometryPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl Extend<GeometryPart> for ModelGroup {
    fn extend<I: IntoIterator<Item = GeometryPart>>(&mut self, iter: I) {
        self.parts.extend(iter);
    }
}

impl FromIterator<GeometryPart> for ModelGroup {
    fn from_iter<I: IntoIterator<Item = GeometryPart>>(iter: I) -> Self {
        Self {
            parts: Vec::from_iter(iter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Point3d, Vector3d};

    fn make_part(offset: f64) -> GeometryPart {
        let n = Vector3d::new(0.0, 0.0, 1.0);
        let mesh = Mesh::from_triangles(
            vec![
                Point3d::new(offset, 0.0, 0.0),
                Point3d::new(offset + 1.0, 0.0, 0.0),
                Point3d::new(offset, 1.0, 0.0),
            ],
            vec![n; 3],
            &[[0, 1, 2]],
        );
        GeometryPart::new(mesh, Color::from_rgb(255, 0, 0), Color::from_rgb(255, 0, 0))
    }

    #[test]
    fn test_group_bounds_is_union() {
        let group: ModelGroup = vec![make_part(0.0), make_part(5.0)].into_iter().collect();
        let b = group.bounds().unwrap();
        assert_eq!(b.min, Point3d::new(0.0, 0.0, 0.0));
        assert_eq!(b.max(), Point3d::new(6.0, 1.0, 0.0));
    }

    #[test]
    fn test_group_bounds_ignores_empty_parts() {
        let mut group = ModelGroup::new();
        group.push(GeometryPart::default());
        assert!(group.bounds().is_none());

        group.push(make_part(2.0));
        let b = group.bounds().unwrap();
        assert_eq!(b.min, Point3d::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_counts_and_order() {
        let group = ModelGroup::from_parts(vec![make_part(0.0), GeometryPart::default(), make_part(3.0)]);
        assert_eq!(group.len(), 3);
        assert_eq!(group.total_vertex_count(), 6);
        assert_eq!(group.total_triangle_count(), 2);
        assert_eq!(group.renderable_parts().count(), 2);
        assert_eq!(group[2].mesh.positions[0].x, 3.0);
    }

    #[test]
    fn test_single_sided_hint() {
        let mut part = make_part(0.0);
        assert!(part.is_single_sided_hint());
        part.back_color = Color::TRANSPARENT;
        assert!(!part.is_single_sided_hint());
    }
}
