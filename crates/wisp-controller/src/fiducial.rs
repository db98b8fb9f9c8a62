//! Fiducial volume lookup for known experiments.

use wisp_detector::{DetectorModel, Geometry};

/// Experiments with a known fiducial sector, and that sector's name.
const FIDUCIAL_SECTORS: [(&str, &str); 3] = [
    ("MiniBooNE", "fid_vol"),
    ("CCM", "ccm_inner_argon"),
    ("MINERvA", "fid_vol"),
];

/// The fiducial sector name for `experiment`, if the experiment is in
/// the table.
pub fn fiducial_sector(experiment: &str) -> Option<&'static str> {
    FIDUCIAL_SECTORS
        .iter()
        .find(|(name, _)| *name == experiment)
        .map(|(_, sector)| *sector)
}

/// The fiducial volume of `experiment` within `model`.
///
/// Scans sectors in model order and returns the geometry of the first
/// sector whose name matches the table entry. `None` when the
/// experiment is not in the table or no sector matches. This result
/// only gates the default secondary position distribution.
pub fn fiducial_volume(model: &DetectorModel, experiment: &str) -> Option<Geometry> {
    let target = fiducial_sector(experiment)?;
    model
        .sectors()
        .iter()
        .find(|sector| sector.name == target)
        .map(|sector| sector.geometry.clone())
}
