//! Particle species identifiers.
//!
//! [`ParticleType`] is a structured identifier: leptons are plain enum
//! variants and nuclear targets carry a [`Nuclide`] with explicit element
//! and mass-number accessors, so callers never have to parse display
//! strings to learn what a target is.

use std::fmt;

/// A nuclear species: element symbol plus mass number.
///
/// Equality is structural, so two `Nuclide` values describing the same
/// isotope compare equal regardless of how they were constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nuclide {
    /// Element symbol, e.g. `"O"` or `"Ar"`.
    pub symbol: &'static str,
    /// Mass number (total nucleon count).
    pub mass_number: u32,
}

impl Nuclide {
    /// Construct a nuclide from an element symbol and mass number.
    pub const fn new(symbol: &'static str, mass_number: u32) -> Self {
        Self {
            symbol,
            mass_number,
        }
    }

    /// The bare proton, displayed as `HNucleus` and short-named `H1`.
    pub const HYDROGEN: Nuclide = Nuclide::new("H", 1);

    /// Short nuclide name, e.g. `O16` or `Ar40`.
    ///
    /// The bare proton is always reported as `H1`, never `H`, so
    /// downstream cross-section table lookups see a uniform
    /// symbol-plus-mass-number form.
    pub fn short_name(&self) -> String {
        format!("{}{}", self.symbol, self.mass_number)
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Historical identifier format: the bare proton omits its mass
        // number, every other isotope carries it.
        if *self == Nuclide::HYDROGEN {
            write!(f, "HNucleus")
        } else {
            write!(f, "{}{}Nucleus", self.symbol, self.mass_number)
        }
    }
}

/// Identifies a particle species appearing in an interaction.
///
/// Covers the lepton sector relevant to neutrino event generation plus
/// nuclear targets. The `Display` form is the textual identifier written
/// to output containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleType {
    /// Electron neutrino.
    NuE,
    /// Electron antineutrino.
    NuEBar,
    /// Muon neutrino.
    NuMu,
    /// Muon antineutrino.
    NuMuBar,
    /// Tau neutrino.
    NuTau,
    /// Tau antineutrino.
    NuTauBar,
    /// Electron.
    EMinus,
    /// Positron.
    EPlus,
    /// Muon.
    MuMinus,
    /// Antimuon.
    MuPlus,
    /// Tau lepton.
    TauMinus,
    /// Antitau.
    TauPlus,
    /// Unresolved hadronic final state.
    Hadrons,
    /// A nuclear target.
    Nucleus(Nuclide),
    /// Placeholder for records whose species is not yet assigned.
    Unknown,
}

impl ParticleType {
    /// Whether this species is a nucleus.
    pub fn is_nucleus(&self) -> bool {
        matches!(self, ParticleType::Nucleus(_))
    }

    /// The nuclide data, if this species is a nucleus.
    pub fn nuclide(&self) -> Option<Nuclide> {
        match self {
            ParticleType::Nucleus(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this species is a neutrino (of either chirality).
    pub fn is_neutrino(&self) -> bool {
        matches!(
            self,
            ParticleType::NuE
                | ParticleType::NuEBar
                | ParticleType::NuMu
                | ParticleType::NuMuBar
                | ParticleType::NuTau
                | ParticleType::NuTauBar
        )
    }

    /// Whether this species is an antiparticle.
    pub fn is_antiparticle(&self) -> bool {
        matches!(
            self,
            ParticleType::NuEBar
                | ParticleType::NuMuBar
                | ParticleType::NuTauBar
                | ParticleType::EPlus
                | ParticleType::MuPlus
                | ParticleType::TauPlus
        )
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleType::NuE => write!(f, "NuE"),
            ParticleType::NuEBar => write!(f, "NuEBar"),
            ParticleType::NuMu => write!(f, "NuMu"),
            ParticleType::NuMuBar => write!(f, "NuMuBar"),
            ParticleType::NuTau => write!(f, "NuTau"),
            ParticleType::NuTauBar => write!(f, "NuTauBar"),
            ParticleType::EMinus => write!(f, "EMinus"),
            ParticleType::EPlus => write!(f, "EPlus"),
            ParticleType::MuMinus => write!(f, "MuMinus"),
            ParticleType::MuPlus => write!(f, "MuPlus"),
            ParticleType::TauMinus => write!(f, "TauMinus"),
            ParticleType::TauPlus => write!(f, "TauPlus"),
            ParticleType::Hadrons => write!(f, "Hadrons"),
            ParticleType::Nucleus(n) => write!(f, "{n}"),
            ParticleType::Unknown => write!(f, "unknown"),
        }
    }
}
