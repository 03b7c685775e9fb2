//! Element and attribute names of the model group document
//!
//! ```text
//! <Model3DGroup xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation">
//!   <GeometryModel3D>
//!     <GeometryModel3D.Geometry>
//!       <MeshGeometry3D Positions="..." Normals="..." TriangleIndices="..." />
//!     </GeometryModel3D.Geometry>
//!     <GeometryModel3D.Material>
//!       <DiffuseMaterial>
//!         <DiffuseMaterial.Brush>
//!           <SolidColorBrush Color="#AARRGGBB" />
//!         </DiffuseMaterial.Brush>
//!       </DiffuseMaterial>
//!     </GeometryModel3D.Material>
//!     <GeometryModel3D.BackMaterial>...</GeometryModel3D.BackMaterial>
//!   </GeometryModel3D>
//! </Model3DGroup>
//! ```

use crate::reader::EventSource;
use quick_xml::events::Event;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";

pub const ROOT: &str = "Model3DGroup";
/// Suffix of collection properties such as `Model3DGroup.Children`
pub const CHILDREN_SUFFIX: &str = ".Children";
pub const PART: &str = "GeometryModel3D";
pub const GEOMETRY: &str = "GeometryModel3D.Geometry";
pub const MESH: &str = "MeshGeometry3D";
pub const MATERIAL: &str = "GeometryModel3D.Material";
pub const BACK_MATERIAL: &str = "GeometryModel3D.BackMaterial";
pub const DIFFUSE: &str = "DiffuseMaterial";
pub const DIFFUSE_BRUSH: &str = "DiffuseMaterial.Brush";
pub const SOLID_BRUSH: &str = "SolidColorBrush";

pub const POSITIONS: &str = "Positions";
pub const NORMALS: &str = "Normals";
pub const TRIANGLE_INDICES: &str = "TriangleIndices";
pub const COLOR: &str = "Color";
pub const BRUSH: &str = "Brush";

/// Extension of documents produced by the CAD conversion service
pub const CONVERTED_EXTENSION: &str = "xamlsolid";

/// True when the first element of the document at `path` is a `Model3DGroup`.
///
/// Unreadable files and malformed prologs count as a mismatch.
pub fn verify_file_format<P: AsRef<Path>>(path: P) -> bool {
    let Ok(file) = File::open(path.as_ref()) else {
        return false;
    };
    let mut source = EventSource::new(BufReader::new(file));
    loop {
        match source.next_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return e.local_name().as_ref().eq_ignore_ascii_case(ROOT.as_bytes());
            }
            Ok(Event::Eof) | Err(_) => return false,
            Ok(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn check(content: &str) -> bool {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.xaml");
        fs::write(&path, content).unwrap();
        verify_file_format(&path)
    }

    #[test]
    fn test_verify_accepts_model_group() {
        assert!(check("<Model3DGroup xmlns=\"x\"><GeometryModel3D/></Model3DGroup>"));
        assert!(check("<?xml version=\"1.0\"?>\n<!-- converted -->\n<Model3DGroup />"));
        assert!(check("<model3dgroup></model3dgroup>"));
    }

    #[test]
    fn test_verify_rejects_other_roots() {
        assert!(!check("<Viewport3D><Model3DGroup/></Viewport3D>"));
        assert!(!check(""));
        assert!(!check("not xml at all"));
    }

    #[test]
    fn test_verify_missing_file() {
        let dir = tempdir().unwrap();
        assert!(!verify_file_format(dir.path().join("absent.xamlsolid")));
    }
}
