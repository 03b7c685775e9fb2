//! External CAD conversion service
//!
//! A converter turns a CAD file into a `Model3DGroup` document and reports an integer
//! status code. Codes 1 to 4 are failures; every other code means success.

use crate::xaml::{verify_file_format, CONVERTED_EXTENSION};
use gridweld_core::{Error, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Decoded converter status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    InvalidArguments,
    ConversionFailed,
    CommandLineError,
    UnsupportedFormat,
}

impl ConversionStatus {
    pub fn is_success(self) -> bool {
        self == ConversionStatus::Success
    }
}

impl From<i32> for ConversionStatus {
    fn from(code: i32) -> Self {
        match code {
            1 => ConversionStatus::InvalidArguments,
            2 => ConversionStatus::ConversionFailed,
            3 => ConversionStatus::CommandLineError,
            4 => ConversionStatus::UnsupportedFormat,
            _ => ConversionStatus::Success,
        }
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConversionStatus::Success => "success",
            ConversionStatus::InvalidArguments => "invalid arguments",
            ConversionStatus::ConversionFailed => "conversion failed",
            ConversionStatus::CommandLineError => "command line error",
            ConversionStatus::UnsupportedFormat => "unsupported format",
        };
        f.write_str(text)
    }
}

/// Converts a CAD file at `source` into a model group document at `output`
pub trait CadConverter {
    /// Run the conversion and return the raw status code
    fn convert(&self, source: &Path, output: &Path) -> i32;
}

impl<F> CadConverter for F
where
    F: Fn(&Path, &Path) -> i32,
{
    fn convert(&self, source: &Path, output: &Path) -> i32 {
        self(source, output)
    }
}

/// Where [`import_cad`] places the converted document for `source`
pub fn converted_path(source: &Path, work_dir: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    work_dir.join(format!("{}.{}", stem, CONVERTED_EXTENSION))
}

/// Convert `source` into `<work_dir>/<stem>.xamlsolid` and return that path.
///
/// A failure status or an output that is not a model group document is an error, and
/// whatever the converter left behind is removed.
pub fn import_cad(converter: &dyn CadConverter, source: &Path, work_dir: &Path) -> Result<PathBuf> {
    if source.file_stem().is_none() {
        return Err(Error::InvalidData(format!(
            "CAD path has no file name: {}",
            source.display()
        )));
    }

    let output = converted_path(source, work_dir);
    let status = ConversionStatus::from(converter.convert(source, &output));
    log::debug!("Converter returned {} for {}", status, source.display());

    let failure = if !status.is_success() {
        Some(format!("converter reported {} for {}", status, source.display()))
    } else if !verify_file_format(&output) {
        Some(format!("{} is not a model group document", output.display()))
    } else {
        None
    };

    match failure {
        Some(message) => {
            if output.exists() {
                if let Err(e) = fs::remove_file(&output) {
                    log::warn!("Failed to remove {}: {}", output.display(), e);
                }
            }
            Err(Error::Conversion(message))
        }
        None => {
            log::info!("Converted {} to {}", source.display(), output.display());
            Ok(output)
        }
    }
}
