//! Error types for the generation engines.

use std::error::Error;
use std::fmt;

use wisp_core::ParticleType;
use wisp_process::DistributionError;

/// Errors from event injection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The configured target has already been reached.
    TargetReached {
        /// The configured target event count.
        target: usize,
    },
    /// A process was wired in without a resolved cross-section collection.
    ProcessNotResolved {
        /// The primary type of the unresolved process.
        particle_type: ParticleType,
    },
    /// A process's cross-section collection offers no channel signatures.
    NoChannels {
        /// The primary type of the empty process.
        particle_type: ParticleType,
    },
    /// A distribution failed to sample.
    Distribution(DistributionError),
    /// The stopping condition rejected every candidate event.
    NoViableEvent {
        /// Number of candidates tried before giving up.
        attempts: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetReached { target } => {
                write!(f, "target of {target} events already reached")
            }
            Self::ProcessNotResolved { particle_type } => {
                write!(f, "process for {particle_type} has no cross-section collection")
            }
            Self::NoChannels { particle_type } => {
                write!(f, "cross-section collection for {particle_type} offers no channels")
            }
            Self::Distribution(e) => write!(f, "{e}"),
            Self::NoViableEvent { attempts } => {
                write!(f, "stopping condition rejected all {attempts} candidate events")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Distribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DistributionError> for EngineError {
    fn from(e: DistributionError) -> Self {
        Self::Distribution(e)
    }
}
