//! The detector model: ordered sectors plus a material registry.

use indexmap::IndexMap;
use wisp_core::ParticleType;

use crate::error::DetectorError;
use crate::geometry::Geometry;

/// A material and the target species it presents to the beam.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name, e.g. `"argon"`.
    pub name: String,
    /// Target species declared by this material, in declaration order.
    pub target_types: Vec<ParticleType>,
}

/// Materials addressable by sequential index.
///
/// Indices are assigned in registration order, matching the material
/// numbering of the on-disk model files.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material, returning its index.
    pub fn register(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Whether a material is registered at `index`.
    pub fn has_material(&self, index: usize) -> bool {
        index < self.materials.len()
    }

    /// The material at `index`, if present.
    pub fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// The target species declared by the material at `index`.
    ///
    /// Empty for an out-of-range index.
    pub fn material_targets(&self, index: usize) -> &[ParticleType] {
        self.materials
            .get(index)
            .map(|m| m.target_types.as_slice())
            .unwrap_or(&[])
    }

    /// Number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// A named region of the detector: a placement volume plus its material.
#[derive(Clone, Debug)]
pub struct Sector {
    /// Sector name, e.g. `"fid_vol"` or `"ccm_inner_argon"`.
    pub name: String,
    /// The sector's placement volume.
    pub geometry: Geometry,
    /// Index into the material registry.
    pub material_index: usize,
}

/// The loaded geometry/material model.
///
/// Sectors are ordered; lookups by name return the first match, so
/// sector order is meaningful and preserved from construction.
#[derive(Clone, Debug, Default)]
pub struct DetectorModel {
    sectors: Vec<Sector>,
    materials: MaterialRegistry,
    name_index: IndexMap<String, usize>,
}

impl DetectorModel {
    /// Build a model from sectors and a registry.
    ///
    /// Every sector must reference a registered material.
    pub fn new(
        sectors: Vec<Sector>,
        materials: MaterialRegistry,
    ) -> Result<Self, DetectorError> {
        if sectors.is_empty() {
            return Err(DetectorError::EmptyModel);
        }
        for sector in &sectors {
            if !materials.has_material(sector.material_index) {
                return Err(DetectorError::MaterialIndexOutOfRange {
                    sector: sector.name.clone(),
                    index: sector.material_index,
                    registered: materials.len(),
                });
            }
        }
        let mut name_index = IndexMap::new();
        for (i, sector) in sectors.iter().enumerate() {
            // First occurrence wins; later duplicates stay reachable by order.
            name_index.entry(sector.name.clone()).or_insert(i);
        }
        Ok(Self {
            sectors,
            materials,
            name_index,
        })
    }

    /// The sectors, in model order.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// The material registry.
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Geometry of the first sector with the given name.
    pub fn sector_geometry(&self, name: &str) -> Option<&Geometry> {
        self.name_index
            .get(name)
            .map(|&i| &self.sectors[i].geometry)
    }
}
