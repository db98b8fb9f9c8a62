//! Stock distributions.
//!
//! [`TargetAtRest`] and [`PrimaryNeutrinoHelicity`] are the defaults the
//! controller injects under the `target` and `helicity` keys when a
//! caller omits them. [`SecondaryPosition`] is appended to every
//! secondary process, optionally constrained to a fiducial volume. The
//! energy and position distributions are the stock choices callers
//! register explicitly for primary processes.

use wisp_core::{FourMomentum, InteractionRecord, RandomStream, Vector3};
use wisp_detector::{DetectorModel, Geometry};

use crate::distribution::{DistributionError, InjectionDistribution, PhysicalDistribution};

/// Rejection-sampling attempt cap for volume-constrained placement.
const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

// ── TargetAtRest ────────────────────────────────────────────────

/// Models the struck target as stationary in the detector frame.
///
/// Sampling draws nothing; the density is uniform. Serves as the
/// default `target` entry so every process carries an explicit target
/// kinematics rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetAtRest;

impl InjectionDistribution for TargetAtRest {
    fn name(&self) -> &str {
        "target_at_rest"
    }

    fn sample(
        &self,
        _random: &mut RandomStream,
        _model: &DetectorModel,
        _record: &mut InteractionRecord,
    ) -> Result<(), DistributionError> {
        Ok(())
    }
}

impl PhysicalDistribution for TargetAtRest {
    fn name(&self) -> &str {
        "target_at_rest"
    }

    fn density(&self, _model: &DetectorModel, _record: &InteractionRecord) -> f64 {
        1.0
    }
}

// ── PrimaryNeutrinoHelicity ─────────────────────────────────────

/// Assigns the primary its physical helicity: -1 for neutrinos and
/// negatively charged leptons, +1 for their antiparticles.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimaryNeutrinoHelicity;

impl PrimaryNeutrinoHelicity {
    fn helicity_for(record: &InteractionRecord) -> f64 {
        if record.signature.primary_type.is_antiparticle() {
            1.0
        } else {
            -1.0
        }
    }
}

impl InjectionDistribution for PrimaryNeutrinoHelicity {
    fn name(&self) -> &str {
        "primary_neutrino_helicity"
    }

    fn sample(
        &self,
        _random: &mut RandomStream,
        _model: &DetectorModel,
        record: &mut InteractionRecord,
    ) -> Result<(), DistributionError> {
        record.primary_helicity = Self::helicity_for(record);
        Ok(())
    }
}

impl PhysicalDistribution for PrimaryNeutrinoHelicity {
    fn name(&self) -> &str {
        "primary_neutrino_helicity"
    }

    fn density(&self, _model: &DetectorModel, record: &InteractionRecord) -> f64 {
        // Deterministic assignment: density 1 when the recorded helicity
        // is the physical one, 0 otherwise.
        if record.primary_helicity == Self::helicity_for(record) {
            1.0
        } else {
            0.0
        }
    }
}

// ── SecondaryPosition ───────────────────────────────────────────

/// Places a secondary interaction vertex.
///
/// With a fiducial volume, the vertex is rejection-sampled uniformly
/// within the volume. Without one, the vertex is drawn from a sphere of
/// `range` meters around the parent vertex the engine seeded into the
/// record.
#[derive(Clone, Debug, Default)]
pub struct SecondaryPosition {
    fiducial: Option<Geometry>,
    range: f64,
}

impl SecondaryPosition {
    /// Unconstrained placement with the default 100 m range.
    pub fn new() -> Self {
        Self {
            fiducial: None,
            range: 100.0,
        }
    }

    /// Placement constrained to `fiducial`.
    pub fn within(fiducial: Geometry) -> Self {
        Self {
            fiducial: Some(fiducial),
            range: 100.0,
        }
    }

    /// The fiducial constraint, if any.
    pub fn fiducial(&self) -> Option<&Geometry> {
        self.fiducial.as_ref()
    }

    fn sample_in_volume(
        &self,
        volume: &Geometry,
        random: &mut RandomStream,
    ) -> Result<Vector3, DistributionError> {
        let (min, max) = volume.bounding_box();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = Vector3::new(
                random.uniform(min.0[0], max.0[0]),
                random.uniform(min.0[1], max.0[1]),
                random.uniform(min.0[2], max.0[2]),
            );
            if volume.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(DistributionError::SamplingFailed {
            name: InjectionDistribution::name(self).to_string(),
            reason: format!(
                "no point accepted after {MAX_PLACEMENT_ATTEMPTS} attempts"
            ),
        })
    }
}

impl InjectionDistribution for SecondaryPosition {
    fn name(&self) -> &str {
        "secondary_position"
    }

    fn sample(
        &self,
        random: &mut RandomStream,
        _model: &DetectorModel,
        record: &mut InteractionRecord,
    ) -> Result<(), DistributionError> {
        match &self.fiducial {
            Some(volume) => {
                record.vertex = self.sample_in_volume(volume, random)?;
            }
            None => {
                let parent = record.vertex;
                record.vertex = Vector3::new(
                    parent.0[0] + random.uniform(-self.range, self.range),
                    parent.0[1] + random.uniform(-self.range, self.range),
                    parent.0[2] + random.uniform(-self.range, self.range),
                );
            }
        }
        Ok(())
    }
}

impl PhysicalDistribution for SecondaryPosition {
    fn name(&self) -> &str {
        "secondary_position"
    }

    fn density(&self, _model: &DetectorModel, record: &InteractionRecord) -> f64 {
        match &self.fiducial {
            // Uniform over the bounding box, zero outside the volume.
            Some(volume) => {
                if volume.contains(&record.vertex) {
                    let (min, max) = volume.bounding_box();
                    let extent: f64 = (0..3).map(|i| max.0[i] - min.0[i]).product();
                    if extent > 0.0 {
                        1.0 / extent
                    } else {
                        0.0
                    }
                } else {
                    0.0
                }
            }
            None => {
                let extent = 2.0 * self.range;
                1.0 / (extent * extent * extent)
            }
        }
    }
}

// ── Energy distributions ────────────────────────────────────────

/// Fixed-energy beam along a fixed direction.
#[derive(Clone, Copy, Debug)]
pub struct Monoenergetic {
    /// Beam energy (GeV).
    pub energy: f64,
    /// Unit direction of the beam.
    pub direction: [f64; 3],
}

impl Monoenergetic {
    /// A beam of `energy` GeV along +z.
    pub fn along_z(energy: f64) -> Self {
        Self {
            energy,
            direction: [0.0, 0.0, 1.0],
        }
    }

    fn momentum(&self) -> FourMomentum {
        FourMomentum::new(
            self.energy,
            self.energy * self.direction[0],
            self.energy * self.direction[1],
            self.energy * self.direction[2],
        )
    }
}

impl InjectionDistribution for Monoenergetic {
    fn name(&self) -> &str {
        "monoenergetic"
    }

    fn sample(
        &self,
        _random: &mut RandomStream,
        _model: &DetectorModel,
        record: &mut InteractionRecord,
    ) -> Result<(), DistributionError> {
        record.primary_momentum = self.momentum();
        Ok(())
    }
}

impl PhysicalDistribution for Monoenergetic {
    fn name(&self) -> &str {
        "monoenergetic"
    }

    fn density(&self, _model: &DetectorModel, record: &InteractionRecord) -> f64 {
        if record.primary_momentum == self.momentum() {
            1.0
        } else {
            0.0
        }
    }
}

/// Power-law energy spectrum `E^index` on `[min_energy, max_energy]`,
/// beam along +z.
#[derive(Clone, Copy, Debug)]
pub struct PowerLawSpectrum {
    /// Lower energy bound (GeV).
    pub min_energy: f64,
    /// Upper energy bound (GeV).
    pub max_energy: f64,
    /// Spectral index (e.g. -2.0).
    pub index: f64,
}

impl InjectionDistribution for PowerLawSpectrum {
    fn name(&self) -> &str {
        "power_law_spectrum"
    }

    fn sample(
        &self,
        random: &mut RandomStream,
        _model: &DetectorModel,
        record: &mut InteractionRecord,
    ) -> Result<(), DistributionError> {
        let energy = random.power_law(self.min_energy, self.max_energy, self.index);
        record.primary_momentum = FourMomentum::new(energy, 0.0, 0.0, energy);
        Ok(())
    }
}

impl PhysicalDistribution for PowerLawSpectrum {
    fn name(&self) -> &str {
        "power_law_spectrum"
    }

    fn density(&self, _model: &DetectorModel, record: &InteractionRecord) -> f64 {
        let e = record.primary_momentum.energy();
        if e < self.min_energy || e > self.max_energy {
            return 0.0;
        }
        let n = self.index;
        if (n + 1.0).abs() < 1e-12 {
            // Logarithmic normalization at index -1.
            return 1.0 / (e * (self.max_energy / self.min_energy).ln());
        }
        let norm = (self.max_energy.powf(n + 1.0) - self.min_energy.powf(n + 1.0)) / (n + 1.0);
        e.powf(n) / norm
    }
}

// ── UniformVolumePosition ───────────────────────────────────────

/// Places the primary vertex uniformly within a volume.
#[derive(Clone, Debug)]
pub struct UniformVolumePosition {
    volume: Geometry,
}

impl UniformVolumePosition {
    /// Uniform placement within `volume`.
    pub fn new(volume: Geometry) -> Self {
        Self { volume }
    }
}

impl InjectionDistribution for UniformVolumePosition {
    fn name(&self) -> &str {
        "uniform_volume_position"
    }

    fn sample(
        &self,
        random: &mut RandomStream,
        _model: &DetectorModel,
        record: &mut InteractionRecord,
    ) -> Result<(), DistributionError> {
        let (min, max) = self.volume.bounding_box();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = Vector3::new(
                random.uniform(min.0[0], max.0[0]),
                random.uniform(min.0[1], max.0[1]),
                random.uniform(min.0[2], max.0[2]),
            );
            if self.volume.contains(&candidate) {
                record.vertex = candidate;
                return Ok(());
            }
        }
        Err(DistributionError::SamplingFailed {
            name: InjectionDistribution::name(self).to_string(),
            reason: format!("no point accepted after {MAX_PLACEMENT_ATTEMPTS} attempts"),
        })
    }
}

impl PhysicalDistribution for UniformVolumePosition {
    fn name(&self) -> &str {
        "uniform_volume_position"
    }

    fn density(&self, _model: &DetectorModel, record: &InteractionRecord) -> f64 {
        if self.volume.contains(&record.vertex) {
            let (min, max) = self.volume.bounding_box();
            let extent: f64 = (0..3).map(|i| max.0[i] - min.0[i]).product();
            if extent > 0.0 {
                1.0 / extent
            } else {
                0.0
            }
        } else {
            0.0
        }
    }
}
