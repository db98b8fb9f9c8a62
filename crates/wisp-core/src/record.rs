//! Interaction records and event trees.
//!
//! An [`Event`] is an ordered tree of [`InteractionRecord`]s: one primary
//! interaction followed by zero or more chained secondary interactions.
//! Records are plain data; sampling fills them in and weighting reads
//! them without mutation.

use smallvec::SmallVec;

use crate::particle::ParticleType;

/// A 3-component position vector (meters, detector coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector3(pub [f64; 3]);

impl Vector3 {
    /// Construct from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_squared(&self, other: &Vector3) -> f64 {
        let d = [
            self.0[0] - other.0[0],
            self.0[1] - other.0[1],
            self.0[2] - other.0[2],
        ];
        d[0] * d[0] + d[1] * d[1] + d[2] * d[2]
    }
}

/// A 4-momentum `[E, px, py, pz]` in GeV.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FourMomentum(pub [f64; 4]);

impl FourMomentum {
    /// Construct from energy and 3-momentum components.
    pub const fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self([e, px, py, pz])
    }

    /// The energy component.
    pub fn energy(&self) -> f64 {
        self.0[0]
    }

    /// Scale every component by `factor`.
    pub fn scaled(&self, factor: f64) -> FourMomentum {
        FourMomentum([
            self.0[0] * factor,
            self.0[1] * factor,
            self.0[2] * factor,
            self.0[3] * factor,
        ])
    }
}

/// Identifies an interaction channel: who hit what, producing whom.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionSignature {
    /// The incoming primary species.
    pub primary_type: ParticleType,
    /// The struck target species.
    pub target_type: ParticleType,
    /// Outgoing species, in channel order.
    pub secondary_types: SmallVec<[ParticleType; 4]>,
}

impl InteractionSignature {
    /// A probe signature carrying only a primary type.
    ///
    /// Used by cross-section resolution to test whether a collection
    /// applies to a process; target and secondaries are unset.
    pub fn probe(primary_type: ParticleType) -> Self {
        Self {
            primary_type,
            target_type: ParticleType::Unknown,
            secondary_types: SmallVec::new(),
        }
    }
}

/// One sampled interaction: a signature plus kinematics.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionRecord {
    /// The interaction channel.
    pub signature: InteractionSignature,
    /// Interaction vertex in detector coordinates.
    pub vertex: Vector3,
    /// 4-momentum of the incoming primary.
    pub primary_momentum: FourMomentum,
    /// Helicity of the incoming primary (-1.0 or +1.0).
    pub primary_helicity: f64,
    /// 4-momenta of the outgoing secondaries, parallel to
    /// `signature.secondary_types`.
    pub secondary_momenta: Vec<FourMomentum>,
}

impl InteractionRecord {
    /// A blank record for the given primary type, awaiting sampling.
    pub fn new(primary_type: ParticleType) -> Self {
        Self {
            signature: InteractionSignature::probe(primary_type),
            vertex: Vector3::default(),
            primary_momentum: FourMomentum::default(),
            primary_helicity: 0.0,
            secondary_momenta: Vec::new(),
        }
    }
}

/// An ordered tree of interactions: the primary first, chained
/// secondaries after, in generation order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Event {
    /// The interaction tree.
    pub tree: Vec<InteractionRecord>,
}

impl Event {
    /// Number of interactions in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the tree is empty (no interactions sampled yet).
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The primary interaction, if the tree is non-empty.
    pub fn primary(&self) -> Option<&InteractionRecord> {
        self.tree.first()
    }
}
