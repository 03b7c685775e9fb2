//! Model group document writer

use crate::error::IoError;
use crate::text::{format_indices, format_points, format_vectors};
use crate::xaml::*;
use gridweld_core::{Color, GeometryPart, ModelGroup, NoProgress, ProgressObserver, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const INDENT_SIZE: usize = 2;

/// Serializes a [`ModelGroup`] as an indented `Model3DGroup` document
pub struct ModelGroupWriter;

impl ModelGroupWriter {
    /// Write `group` to any byte sink
    pub fn write<W: Write>(group: &ModelGroup, writer: W) -> Result<()> {
        Self::write_with_progress(group, writer, &NoProgress)
    }

    /// Write `group`, reporting `(parts written, part count)` after each part
    pub fn write_with_progress<W: Write>(
        group: &ModelGroup,
        writer: W,
        progress: &dyn ProgressObserver,
    ) -> Result<()> {
        let mut xml = Writer::new_with_indent(writer, b' ', INDENT_SIZE);

        let root = BytesStart::new(ROOT).with_attributes([("xmlns", NAMESPACE)]);
        emit(&mut xml, Event::Start(root))?;

        let total = group.len() as u64;
        for (i, part) in group.iter().enumerate() {
            write_part(&mut xml, part)?;
            progress.on_progress(i as u64 + 1, total);
        }

        emit(&mut xml, Event::End(BytesEnd::new(ROOT)))?;

        let mut inner = xml.into_inner();
        inner.flush()?;
        Ok(())
    }

    /// Create (or truncate) the file at `path` and write `group` into it
    pub fn write_to_file<P: AsRef<Path>>(
        group: &ModelGroup,
        path: P,
        progress: &dyn ProgressObserver,
    ) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::write_with_progress(group, BufWriter::new(file), progress)?;
        log::debug!("Wrote {} parts to {}", group.len(), path.display());
        Ok(())
    }
}

fn emit<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    xml.write_event(event).map_err(IoError::write)?;
    Ok(())
}

fn open<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    emit(xml, Event::Start(BytesStart::new(name)))
}

fn close<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    emit(xml, Event::End(BytesEnd::new(name)))
}

fn write_part<W: Write>(xml: &mut Writer<W>, part: &GeometryPart) -> Result<()> {
    open(xml, PART)?;

    open(xml, GEOMETRY)?;
    let positions = format_points(&part.mesh.positions);
    let normals = format_vectors(&part.mesh.normals);
    let indices = format_indices(&part.mesh.triangle_indices);
    let mesh = BytesStart::new(MESH).with_attributes([
        (POSITIONS, positions.as_str()),
        (NORMALS, normals.as_str()),
        (TRIANGLE_INDICES, indices.as_str()),
    ]);
    emit(xml, Event::Empty(mesh))?;
    close(xml, GEOMETRY)?;

    write_material(xml, MATERIAL, part.front_color)?;
    write_material(xml, BACK_MATERIAL, part.back_color)?;

    close(xml, PART)
}

fn write_material<W: Write>(xml: &mut Writer<W>, element: &str, color: Color) -> Result<()> {
    open(xml, element)?;
    open(xml, DIFFUSE)?;
    open(xml, DIFFUSE_BRUSH)?;
    let color = color.to_string();
    let brush = BytesStart::new(SOLID_BRUSH).with_attributes([(COLOR, color.as_str())]);
    emit(xml, Event::Empty(brush))?;
    close(xml, DIFFUSE_BRUSH)?;
    close(xml, DIFFUSE)?;
    close(xml, element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridweld_core::{Mesh, Point3d, Vector3d};

    fn make_part() -> GeometryPart {
        let n = Vector3d::new(0.0, 0.0, 1.0);
        let mesh = Mesh::from_triangles(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.0, 1.5, 0.0),
                Point3d::new(1.0, 1.5, 0.0),
            ],
            vec![n; 4],
            &[[0, 1, 2], [1, 3, 2]],
        );
        GeometryPart::new(mesh, Color::from_rgb(0xFF, 0, 0), Color::from_argb(0x80, 0, 0, 0xFF))
    }

    fn write_string(group: &ModelGroup) -> String {
        let mut buffer = Vec::new();
        ModelGroupWriter::write(group, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_group() {
        let xml = write_string(&ModelGroup::new());
        assert!(xml.starts_with("<Model3DGroup xmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\">"));
        assert!(xml.trim_end().ends_with("</Model3DGroup>"));
        assert!(!xml.contains("<?xml"));
    }

    #[test]
    fn test_mesh_attributes() {
        let xml = write_string(&ModelGroup::from_parts(vec![make_part()]));
        assert!(xml.contains("Positions=\"0 0 0  1 0 0  0 1.5 0  1 1.5 0\""));
        assert!(xml.contains("Normals=\"0 0 1  0 0 1  0 0 1  0 0 1\""));
        assert!(xml.contains("TriangleIndices=\"0 1 2  1 3 2\""));
    }

    #[test]
    fn test_material_path_and_colors() {
        let xml = write_string(&ModelGroup::from_parts(vec![make_part()]));
        let front = xml.find("<GeometryModel3D.Material>").unwrap();
        let back = xml.find("<GeometryModel3D.BackMaterial>").unwrap();
        assert!(front < back);
        assert_eq!(xml.matches("<DiffuseMaterial>").count(), 2);
        assert_eq!(xml.matches("<DiffuseMaterial.Brush>").count(), 2);

        let red = xml.find("<SolidColorBrush Color=\"#FFFF0000\"/>").unwrap();
        let blue = xml.find("<SolidColorBrush Color=\"#800000FF\"/>").unwrap();
        assert!(front < red && red < back && back < blue);
    }

    #[test]
    fn test_indented_and_ascii() {
        let xml = write_string(&ModelGroup::from_parts(vec![make_part(), GeometryPart::default()]));
        assert!(xml.is_ascii());
        assert!(xml.contains("\n  <GeometryModel3D>"));
        assert!(xml.contains("\n    <GeometryModel3D.Geometry>"));
        assert_eq!(xml.matches("<GeometryModel3D>").count(), 2);
    }

    #[test]
    fn test_progress_per_part() {
        let group = ModelGroup::from_parts(vec![make_part(), make_part(), make_part()]);
        let seen = std::cell::RefCell::new(Vec::new());
        let observer = |current: u64, total: u64| seen.borrow_mut().push((current, total));
        ModelGroupWriter::write_with_progress(&group, Vec::new(), &observer).unwrap();
        assert_eq!(*seen.borrow(), vec![(1, 3), (2, 3), (3, 3)]);
    }
}
