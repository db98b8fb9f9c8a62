//! Error types for controller configuration and operation.

use std::error::Error;
use std::fmt;

use wisp_core::ParticleType;
use wisp_detector::DetectorError;
use wisp_engine::EngineError;
use wisp_output::ContainerError;

/// Errors from the controller lifecycle.
///
/// Configuration failures are returned, not fatal: the caller decides
/// whether to abort, and partial configuration state stays available
/// for diagnostics.
#[derive(Debug)]
pub enum ConfigError {
    /// No cross-section collection matched a secondary process.
    ///
    /// Generation cannot proceed; assignments made before the failure
    /// are retained.
    UnresolvedSecondaryCrossSection {
        /// The secondary particle type with zero matching candidates.
        particle_type: ParticleType,
    },
    /// A step that needs configured processes ran before
    /// [`set_processes`](crate::Controller::set_processes).
    ProcessesNotConfigured,
    /// Initialization ran before every process had a resolved
    /// cross-section collection.
    CrossSectionsNotResolved {
        /// The first process found without a collection.
        particle_type: ParticleType,
    },
    /// Generation or serialization ran before
    /// [`initialize`](crate::Controller::initialize).
    NotInitialized,
    /// Detector model loading or construction failed.
    Detector(DetectorError),
    /// The injection engine failed.
    Engine(EngineError),
    /// Writing the output container failed.
    Output(ContainerError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedSecondaryCrossSection { particle_type } => write!(
                f,
                "no cross-section collection matches secondary particle {particle_type}"
            ),
            Self::ProcessesNotConfigured => {
                write!(f, "processes have not been configured")
            }
            Self::CrossSectionsNotResolved { particle_type } => write!(
                f,
                "process for {particle_type} has no resolved cross-section collection"
            ),
            Self::NotInitialized => write!(f, "engines have not been initialized"),
            Self::Detector(e) => write!(f, "{e}"),
            Self::Engine(e) => write!(f, "{e}"),
            Self::Output(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Detector(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DetectorError> for ConfigError {
    fn from(e: DetectorError) -> Self {
        Self::Detector(e)
    }
}

impl From<EngineError> for ConfigError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<ContainerError> for ConfigError {
    fn from(e: ContainerError) -> Self {
        Self::Output(e)
    }
}
