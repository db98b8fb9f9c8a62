//! Error type for container encoding and decoding.

use std::error::Error;
use std::fmt;

/// Errors from reading or writing a container file.
#[derive(Debug)]
pub enum ContainerError {
    /// Underlying I/O failure.
    Io(std::io::Error),
    /// The file does not start with the container magic.
    BadMagic {
        /// The bytes actually found.
        found: [u8; 4],
    },
    /// The file's format version is not supported.
    UnsupportedVersion {
        /// The version actually found.
        found: u16,
    },
    /// A length prefix or tag is inconsistent with the format.
    Malformed {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::BadMagic { found } => {
                write!(f, "bad magic {found:?}, not a wisp container")
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported container version {found}")
            }
            Self::Malformed { reason } => write!(f, "malformed container: {reason}"),
        }
    }
}

impl Error for ContainerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ContainerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
