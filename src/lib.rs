//! # gridweld
//!
//! Grid-bucket mesh decimation for multi-part 3D models, with a
//! resolution-tagged document cache.
//!
//! This is the umbrella crate. It re-exports the core data model, the decimator
//! and the document I/O, and adds [`ModelGroupLoader`], which ties them together.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gridweld::prelude::*;
//!
//! let loader = ModelGroupLoader::new(LoaderConfig::default().with_resolution(100));
//! let group = loader.load("models/engine.xamlsolid")?;
//! println!("{} parts, {} triangles", group.len(), group.total_triangle_count());
//! # Ok::<(), gridweld::Error>(())
//! ```

pub mod loader;

// Re-export core functionality
pub use gridweld_core::*;

// Re-export sub-crates
pub use gridweld_io as io;
pub use gridweld_simplification as simplification;

pub use loader::{LoaderConfig, ModelGroupLoader, DEFAULT_MAX_PARTS_WITHOUT_SIMPLIFICATION};

/// Convenient imports for common use cases
pub mod prelude {
    pub use gridweld_core::*;

    pub use gridweld_io::{
        cache_path, import_cad, read_model_group, verify_file_format, write_model_group,
        CadConverter, ConversionStatus, ModelGroupReader, ModelGroupWriter,
    };

    pub use gridweld_simplification::{GridDecimator, MeshSimplifier, DEFAULT_RESOLUTION};

    pub use crate::loader::{LoaderConfig, ModelGroupLoader};
}
