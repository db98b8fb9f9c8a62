//! Distribution traits: sampling at injection time, weighting afterwards.

use std::error::Error;
use std::fmt;

use wisp_core::{InteractionRecord, RandomStream};
use wisp_detector::DetectorModel;

/// Errors from distribution sampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DistributionError {
    /// The sampler could not produce a value.
    SamplingFailed {
        /// Name of the failing distribution.
        name: String,
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SamplingFailed { name, reason } => {
                write!(f, "distribution '{name}' failed to sample: {reason}")
            }
        }
    }
}

impl Error for DistributionError {}

/// A sampling rule applied while generating an event's kinematics.
///
/// Distributions run in process order, each filling or refining part of
/// the [`InteractionRecord`] under construction. The random stream is
/// the single shared sequence; implementations must draw from it in a
/// deterministic order.
pub trait InjectionDistribution {
    /// Distribution name, used in diagnostics.
    fn name(&self) -> &str;

    /// Sample this distribution's quantity into `record`.
    fn sample(
        &self,
        random: &mut RandomStream,
        model: &DetectorModel,
        record: &mut InteractionRecord,
    ) -> Result<(), DistributionError>;
}

/// A weighting rule evaluated after generation.
///
/// Returns this distribution's probability-density contribution for an
/// already-sampled record. Must not mutate anything.
pub trait PhysicalDistribution {
    /// Distribution name, used in diagnostics.
    fn name(&self) -> &str;

    /// Probability density of `record` under this distribution.
    fn density(&self, model: &DetectorModel, record: &InteractionRecord) -> f64;
}
