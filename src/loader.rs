//! Cache-aware model group loading
//!
//! [`ModelGroupLoader::load`] returns a resolution-tagged cache file when one sits
//! next to the source. Otherwise it reads the source, decimates groups with more
//! than a handful of parts and stores the result as the cache for the next call.

use gridweld_core::{ModelGroup, NoProgress, ProgressObserver, Result};
use gridweld_io::{cache_path, import_cad, CadConverter, ModelGroupReader, ModelGroupWriter};
use gridweld_simplification::{GridDecimator, DEFAULT_RESOLUTION};
use std::fs;
use std::path::Path;

/// Groups with at most this many parts are returned without decimation
pub const DEFAULT_MAX_PARTS_WITHOUT_SIMPLIFICATION: usize = 5;

/// Settings for [`ModelGroupLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Grid cells along the longest axis of the group bounds
    pub resolution: u32,
    pub max_parts_without_simplification: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            max_parts_without_simplification: DEFAULT_MAX_PARTS_WITHOUT_SIMPLIFICATION,
        }
    }
}

impl LoaderConfig {
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_max_parts_without_simplification(mut self, max_parts: usize) -> Self {
        self.max_parts_without_simplification = max_parts;
        self
    }
}

/// Loads model groups through the per-resolution cache
pub struct ModelGroupLoader<'a> {
    config: LoaderConfig,
    progress: &'a dyn ProgressObserver,
}

impl ModelGroupLoader<'static> {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            progress: &NoProgress,
        }
    }
}

impl Default for ModelGroupLoader<'static> {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl<'a> ModelGroupLoader<'a> {
    /// Report reading, decimation and cache writing progress to `progress`
    pub fn with_progress<'b>(self, progress: &'b dyn ProgressObserver) -> ModelGroupLoader<'b> {
        ModelGroupLoader {
            config: self.config,
            progress,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the model group for `source` at the configured resolution.
    ///
    /// An unreadable cache is ignored and rebuilt. Decimation failure is an error;
    /// a failed cache write is not.
    pub fn load<P: AsRef<Path>>(&self, source: P) -> Result<ModelGroup> {
        let source = source.as_ref();
        let cached = cache_path(source, self.config.resolution);

        if cached.is_file() {
            match ModelGroupReader::read_from_file(&cached, self.progress) {
                Ok(group) => {
                    log::info!("Loaded cached model {}", cached.display());
                    return Ok(group);
                }
                Err(e) => log::warn!("Ignoring unreadable cache {}: {}", cached.display(), e),
            }
        }

        let group = ModelGroupReader::read_from_file(source, self.progress)?;
        if group.len() <= self.config.max_parts_without_simplification {
            log::debug!(
                "{} has {} parts, skipping simplification",
                source.display(),
                group.len()
            );
            return Ok(group);
        }

        let simplified = GridDecimator::with_resolution(self.config.resolution)
            .simplify_group(&group, self.progress)?;
        self.store_cache(&simplified, &cached);
        Ok(simplified)
    }

    /// Like [`load`](Self::load), logging the failure instead of returning it
    pub fn load_or_none<P: AsRef<Path>>(&self, source: P) -> Option<ModelGroup> {
        let source = source.as_ref();
        match self.load(source) {
            Ok(group) => Some(group),
            Err(e) => {
                log::warn!("Failed to load {}: {}", source.display(), e);
                None
            }
        }
    }

    /// Convert a CAD file into `work_dir` and load the resulting document
    pub fn open_cad<P, Q>(&self, converter: &dyn CadConverter, cad_path: P, work_dir: Q) -> Result<ModelGroup>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let converted = import_cad(converter, cad_path.as_ref(), work_dir.as_ref())?;
        self.load(converted)
    }

    fn store_cache(&self, group: &ModelGroup, path: &Path) {
        match ModelGroupWriter::write_to_file(group, path, self.progress) {
            Ok(()) => log::info!("Cached simplified model at {}", path.display()),
            Err(e) => {
                log::warn!("Failed to write cache {}: {}", path.display(), e);
                if path.is_file() {
                    if let Err(e) = fs::remove_file(path) {
                        log::warn!("Failed to remove partial cache {}: {}", path.display(), e);
                    }
                }
            }
        }
    }
}
