//! I/O operations for model groups
//!
//! This crate reads and writes the `Model3DGroup` document that stores a
//! [`ModelGroup`], names the per-resolution cache files derived from it and
//! drives the external CAD conversion service that produces such documents.

pub mod cache;
pub mod conversion;
pub mod error;
pub mod reader;
pub mod text;
pub mod writer;
pub mod xaml;

pub use cache::cache_path;
pub use conversion::{converted_path, import_cad, CadConverter, ConversionStatus};
pub use error::*;
pub use reader::ModelGroupReader;
pub use writer::ModelGroupWriter;
pub use xaml::verify_file_format;

use gridweld_core::{ModelGroup, NoProgress, Result};
use std::path::Path;

/// Read the model group document at `path`
pub fn read_model_group<P: AsRef<Path>>(path: P) -> Result<ModelGroup> {
    ModelGroupReader::read_from_file(path, &NoProgress)
}

/// Write `group` as a model group document at `path`
pub fn write_model_group<P: AsRef<Path>>(group: &ModelGroup, path: P) -> Result<()> {
    ModelGroupWriter::write_to_file(group, path, &NoProgress)
}
