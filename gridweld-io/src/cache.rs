//! Naming of simplified-model cache files

use std::path::{Path, PathBuf};

/// Cache file for `source` decimated at `resolution`: `<dir>/<stem>_R<resolution><.ext>`
pub fn cache_path(source: &Path, resolution: u32) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    let name = match source.extension() {
        Some(ext) => format!("{}_R{}.{}", stem, resolution, ext.to_string_lossy()),
        None => format!("{}_R{}", stem, resolution),
    };
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path() {
        assert_eq!(
            cache_path(Path::new("/models/engine.xamlsolid"), 200),
            Path::new("/models/engine_R200.xamlsolid")
        );
        assert_eq!(
            cache_path(Path::new("models/a.b.xaml"), 50),
            Path::new("models/a.b_R50.xaml")
        );
    }

    #[test]
    fn test_cache_path_without_extension_or_dir() {
        assert_eq!(cache_path(Path::new("/models/engine"), 8), Path::new("/models/engine_R8"));
        assert_eq!(cache_path(Path::new("engine.xaml"), 200), Path::new("engine_R200.xaml"));
    }
}
