//! Error types for detector model construction and loading.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors from detector model construction or resource loading.
#[derive(Debug)]
pub enum DetectorError {
    /// A resource file named by the path configuration does not exist
    /// or could not be read.
    ResourceUnavailable {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
    /// A sector references a material index not present in the registry.
    MaterialIndexOutOfRange {
        /// Name of the offending sector.
        sector: String,
        /// The out-of-range index.
        index: usize,
        /// Number of registered materials.
        registered: usize,
    },
    /// The model has no sectors.
    EmptyModel,
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceUnavailable { path, source } => {
                write!(f, "resource '{}' unavailable: {source}", path.display())
            }
            Self::MaterialIndexOutOfRange {
                sector,
                index,
                registered,
            } => write!(
                f,
                "sector '{sector}' references material {index} but only {registered} are registered"
            ),
            Self::EmptyModel => write!(f, "detector model has no sectors"),
        }
    }
}

impl Error for DetectorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ResourceUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}
