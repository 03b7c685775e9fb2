//! Grid-bucket vertex welding
//!
//! Vertices are bucketed into cubic cells of edge `unit_size`. Every cell keeps a
//! single representative vertex, triangle indices are redirected to it, and
//! triangles that become degenerate are dropped.
//!
//! Two details are load-bearing for compatibility with previously cached models:
//! cell keys truncate toward zero (so the cells touching an axis plane are twice as
//! wide), and the representative is the member referenced by the fewest triangle
//! slots, ties going to the earliest vertex.

use crate::MeshSimplifier;
use gridweld_core::{
    BoundingBox, Error, GeometryPart, Mesh, ModelGroup, Point3d, ProgressObserver, Result,
};
use std::collections::HashMap;

/// Integer coordinates of a grid cell
pub type CellKey = (i64, i64, i64);

/// Resolution used when the caller does not pick one
pub const DEFAULT_RESOLUTION: u32 = 200;

/// Counts describing one decimation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimationStats {
    pub input_vertices: usize,
    pub input_triangles: usize,
    pub cells: usize,
    pub output_vertices: usize,
    pub output_triangles: usize,
}

/// Cell containing `p`; each coordinate is divided by `unit_size` and truncated toward zero.
pub fn cell_key(p: &Point3d, unit_size: f64) -> CellKey {
    (
        (p.x / unit_size) as i64,
        (p.y / unit_size) as i64,
        (p.z / unit_size) as i64,
    )
}

/// Cell edge length giving `resolution` cells across the longest axis of `bounds`
pub fn unit_size_for_resolution(bounds: &BoundingBox, resolution: u32) -> f64 {
    bounds.max_extent() / resolution as f64
}

fn checked_bounds(bounds: Option<BoundingBox>) -> Result<BoundingBox> {
    let bounds = bounds.ok_or_else(|| Error::InvalidData("Bounding box is empty".to_string()))?;
    if bounds.has_nan() {
        return Err(Error::InvalidData(
            "Bounding box has a NaN dimension".to_string(),
        ));
    }
    Ok(bounds)
}

fn check_unit_size(unit_size: f64) -> Result<()> {
    if !(unit_size.is_finite() && unit_size > 0.0) {
        return Err(Error::InvalidData(format!(
            "Unit size must be finite and positive, got {}",
            unit_size
        )));
    }
    Ok(())
}

/// Group vertex indices by cell, keeping cells in first-appearance order and
/// members in vertex order.
fn bucket_vertices(positions: &[Point3d], unit_size: f64) -> Vec<Vec<usize>> {
    let mut cell_of_key: HashMap<CellKey, usize> = HashMap::new();
    let mut cells: Vec<Vec<usize>> = Vec::new();

    for (vi, p) in positions.iter().enumerate() {
        let ci = *cell_of_key.entry(cell_key(p, unit_size)).or_insert_with(|| {
            cells.push(Vec::new());
            cells.len() - 1
        });
        cells[ci].push(vi);
    }

    cells
}

fn reference_counts(mesh: &Mesh) -> Vec<usize> {
    let mut counts = vec![0usize; mesh.positions.len()];
    for &vi in &mesh.triangle_indices {
        counts[vi] += 1;
    }
    counts
}

/// Weld `mesh` on a grid of edge `unit_size` and report what happened.
pub fn simplify_with_stats(mesh: &Mesh, unit_size: f64) -> Result<(Mesh, DecimationStats)> {
    if mesh.triangle_indices.is_empty() {
        return Err(Error::InvalidData("Mesh has no triangles".to_string()));
    }
    mesh.validate()?;
    checked_bounds(mesh.bounds())?;
    check_unit_size(unit_size)?;

    let cells = bucket_vertices(&mesh.positions, unit_size);
    let counts = reference_counts(mesh);

    // Old vertex index -> index of its cell's representative (still an old index).
    let mut representative_of = vec![0usize; mesh.positions.len()];
    // Old representative index -> compact index in the output.
    let mut compact_index = vec![0usize; mesh.positions.len()];

    let mut positions = Vec::with_capacity(cells.len());
    let mut normals = Vec::with_capacity(cells.len());

    for (new_index, cell) in cells.iter().enumerate() {
        let representative = cell
            .iter()
            .copied()
            .min_by_key(|&vi| counts[vi])
            .unwrap_or(cell[0]);

        for &vi in cell {
            representative_of[vi] = representative;
        }
        compact_index[representative] = new_index;
        positions.push(mesh.positions[representative]);
        normals.push(mesh.normals[representative]);
    }

    let mut triangle_indices = Vec::with_capacity(mesh.triangle_indices.len());
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (
            representative_of[a],
            representative_of[b],
            representative_of[c],
        );
        if a == b || a == c || b == c {
            continue;
        }
        triangle_indices.extend([compact_index[a], compact_index[b], compact_index[c]]);
    }

    let stats = DecimationStats {
        input_vertices: mesh.vertex_count(),
        input_triangles: mesh.triangle_count(),
        cells: cells.len(),
        output_vertices: positions.len(),
        output_triangles: triangle_indices.len() / 3,
    };
    log::debug!(
        "Grid decimation at unit size {}: {} -> {} vertices, {} -> {} triangles",
        unit_size,
        stats.input_vertices,
        stats.output_vertices,
        stats.input_triangles,
        stats.output_triangles
    );

    if triangle_indices.is_empty() {
        return Err(Error::Algorithm(
            "Every triangle became degenerate after welding".to_string(),
        ));
    }

    Ok((Mesh::from_parts(positions, normals, triangle_indices), stats))
}

/// Weld `mesh` on a grid of edge `unit_size`.
///
/// Fails when the mesh has no triangles, its bounds are empty or NaN, or nothing
/// but degenerate triangles would remain; callers fall back to the original mesh.
pub fn simplify(mesh: &Mesh, unit_size: f64) -> Result<Mesh> {
    simplify_with_stats(mesh, unit_size).map(|(mesh, _)| mesh)
}

/// Weld `mesh` with `resolution` cells across the longest axis of its own bounds.
pub fn simplify_with_resolution(mesh: &Mesh, resolution: u32) -> Result<Mesh> {
    let bounds = checked_bounds(mesh.bounds())?;
    simplify(mesh, unit_size_for_resolution(&bounds, resolution))
}

/// Weld every part of `group` with one unit size derived from the group bounds.
///
/// Parts whose decimation fails are left out of the result; the order of the
/// remaining parts is preserved.
pub fn simplify_group(
    group: &ModelGroup,
    resolution: u32,
    progress: &dyn ProgressObserver,
) -> Result<ModelGroup> {
    let bounds = checked_bounds(group.bounds())?;
    let unit_size = unit_size_for_resolution(&bounds, resolution);
    check_unit_size(unit_size)?;

    let total = group.len() as u64;
    let mut result = ModelGroup::new();

    for (i, part) in group.iter().enumerate() {
        match simplify(&part.mesh, unit_size) {
            Ok(mesh) => result.push(part.with_mesh(mesh)),
            Err(e) => log::debug!("Dropping part {} from simplified group: {}", i, e),
        }
        progress.on_progress(i as u64 + 1, total);
    }

    log::info!(
        "Simplified {} parts to {} at resolution {} (unit size {})",
        group.len(),
        result.len(),
        resolution,
        unit_size
    );
    Ok(result)
}

/// Grid welding simplifier with a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDecimator {
    /// Number of cells across the longest bounding-box axis
    pub resolution: u32,
}

impl Default for GridDecimator {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl GridDecimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(resolution: u32) -> Self {
        Self { resolution }
    }

    /// Weld every part of a group with this decimator's resolution
    pub fn simplify_group(
        &self,
        group: &ModelGroup,
        progress: &dyn ProgressObserver,
    ) -> Result<ModelGroup> {
        simplify_group(group, self.resolution, progress)
    }

    /// Weld a single part, keeping its colors
    pub fn simplify_part(&self, part: &GeometryPart) -> Result<GeometryPart> {
        simplify_with_resolution(&part.mesh, self.resolution).map(|mesh| part.with_mesh(mesh))
    }
}

impl MeshSimplifier for GridDecimator {
    fn simplify(&self, mesh: &Mesh) -> Result<Mesh> {
        simplify_with_resolution(mesh, self.resolution)
    }
}
