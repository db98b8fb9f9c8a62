//! Resource path resolution and the model-loading seam.
//!
//! Paths are resolved explicitly up front and carried in a
//! [`ResourcePaths`] value; nothing in the pipeline consults the
//! environment. Actual file parsing lives behind the
//! [`DetectorModelLoader`] trait so tests can substitute in-memory
//! models.

use std::path::{Path, PathBuf};

use crate::error::DetectorError;
use crate::model::DetectorModel;

/// Experiments whose density model follows the PREM naming variant.
const PREM_NAMED_EXPERIMENTS: [&str; 2] = ["ATLAS", "dune"];

/// Resolved resource file paths for one experiment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
    /// The density-model file.
    pub density_model: PathBuf,
    /// The materials file.
    pub materials: PathBuf,
}

impl ResourcePaths {
    /// Resolve paths under `root` for `experiment`.
    ///
    /// Density models live under `densities/` and follow one of two
    /// conventions: `PREM_<experiment>.dat` for the experiments that
    /// embed the detector in a full earth density profile, plain
    /// `<experiment>.dat` otherwise. Materials always resolve to
    /// `materials/<experiment>.dat`.
    pub fn discover(root: &Path, experiment: &str) -> Self {
        let density_name = if PREM_NAMED_EXPERIMENTS.contains(&experiment) {
            format!("PREM_{experiment}.dat")
        } else {
            format!("{experiment}.dat")
        };
        Self {
            density_model: root.join("densities").join(density_name),
            materials: root.join("materials").join(format!("{experiment}.dat")),
        }
    }

    /// Check that both resource files exist.
    ///
    /// Loaders read the files themselves and may still fail later;
    /// this front-loads the common missing-file case with an error
    /// naming the offending path.
    pub fn verify(&self) -> Result<(), DetectorError> {
        for path in [&self.density_model, &self.materials] {
            if let Err(source) = std::fs::metadata(path) {
                return Err(DetectorError::ResourceUnavailable {
                    path: path.clone(),
                    source,
                });
            }
        }
        Ok(())
    }
}

/// Loads a [`DetectorModel`] from resolved resource paths.
///
/// File parsing is a delegated concern; the controller accepts any
/// loader. Load failures propagate unwrapped.
pub trait DetectorModelLoader {
    /// Load the model described by `paths`.
    fn load(&self, paths: &ResourcePaths) -> Result<DetectorModel, DetectorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_convention() {
        let paths = ResourcePaths::discover(Path::new("/res"), "MiniBooNE");
        assert_eq!(
            paths.density_model,
            PathBuf::from("/res/densities/MiniBooNE.dat")
        );
        assert_eq!(paths.materials, PathBuf::from("/res/materials/MiniBooNE.dat"));
    }

    #[test]
    fn prem_variant_for_embedded_experiments() {
        for experiment in ["ATLAS", "dune"] {
            let paths = ResourcePaths::discover(Path::new("/res"), experiment);
            assert_eq!(
                paths.density_model,
                PathBuf::from(format!("/res/densities/PREM_{experiment}.dat"))
            );
            assert_eq!(
                paths.materials,
                PathBuf::from(format!("/res/materials/{experiment}.dat"))
            );
        }
    }

    #[test]
    fn variant_selection_is_case_sensitive() {
        let paths = ResourcePaths::discover(Path::new("/res"), "DUNE");
        assert_eq!(paths.density_model, PathBuf::from("/res/densities/DUNE.dat"));
    }

    #[test]
    fn verify_names_the_missing_resource() {
        let root = std::env::temp_dir().join(format!("wisp_res_missing_{}", std::process::id()));
        let paths = ResourcePaths::discover(&root, "CCM");
        match paths.verify().unwrap_err() {
            DetectorError::ResourceUnavailable { path, .. } => {
                assert_eq!(path, paths.density_model);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn verify_accepts_existing_resources() {
        let root = std::env::temp_dir().join(format!("wisp_res_ok_{}", std::process::id()));
        std::fs::create_dir_all(root.join("densities")).unwrap();
        std::fs::create_dir_all(root.join("materials")).unwrap();
        std::fs::write(root.join("densities").join("CCM.dat"), b"").unwrap();
        std::fs::write(root.join("materials").join("CCM.dat"), b"").unwrap();

        let paths = ResourcePaths::discover(&root, "CCM");
        let result = paths.verify();
        std::fs::remove_dir_all(&root).ok();
        assert!(result.is_ok());
    }
}
