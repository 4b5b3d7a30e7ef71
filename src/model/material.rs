//! Material types and the deduplicating material table

use std::collections::HashMap;

use super::Color;

/// Diffuse map sub-block (`MAP_DIFFUSE`) properties
///
/// In the idTech 4 convention the bitmap path doubles as the engine
/// material/shader name, so this is the field the engine actually reads.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDiffuse {
    /// Bitmap/texture reference path (`*BITMAP`)
    pub bitmap: String,
    /// UV offset along U (`*UVW_U_OFFSET`)
    pub u_offset: f64,
    /// UV offset along V (`*UVW_V_OFFSET`)
    pub v_offset: f64,
    /// UV tiling along U (`*UVW_U_TILING`)
    pub u_tiling: f64,
    /// UV tiling along V (`*UVW_V_TILING`)
    pub v_tiling: f64,
    /// UV rotation angle (`*UVW_ANGLE`)
    pub angle: f64,
}

impl MapDiffuse {
    /// Create a diffuse map with neutral placement (no offset, 1x tiling)
    pub fn new(bitmap: impl Into<String>) -> Self {
        Self {
            bitmap: bitmap.into(),
            u_offset: 0.0,
            v_offset: 0.0,
            u_tiling: 1.0,
            v_tiling: 1.0,
            angle: 0.0,
        }
    }
}

impl Default for MapDiffuse {
    fn default() -> Self {
        Self::new("None")
    }
}

/// A material with flattened scalar/color/texture-path properties
///
/// Identity is by name: the material table deduplicates on it, and the
/// resulting index is the cross-reference key (`MATERIAL_REF`,
/// `MESH_MTLID`) used throughout the wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name (unique key within a table)
    pub name: String,
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// Shininess (`MATERIAL_SHINE`)
    pub shine: f64,
    /// Shininess strength (`MATERIAL_SHINESTRENGTH`)
    pub shine_strength: f64,
    /// Transparency, 0 = opaque
    pub transparency: f64,
    /// Self-illumination amount
    pub self_illum: f64,
    /// Diffuse map sub-block
    pub map_diffuse: MapDiffuse,
}

impl Material {
    /// Create a material with the historical exporter's fallback properties
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let map_diffuse = MapDiffuse::new(name.clone());
        Self {
            name,
            diffuse: Color::new(0.8, 0.8, 0.8),
            specular: Color::white(),
            shine: 0.1,
            shine_strength: 1.0,
            transparency: 0.0,
            self_illum: 0.0,
            map_diffuse,
        }
    }
}

/// Ordered, name-deduplicated list of materials
///
/// Built once per export job from the materials referenced by the selected
/// objects, read-only thereafter. Index order is order of first insertion,
/// which keeps serialization deterministic.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
    by_name: HashMap<String, usize>,
}

impl MaterialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a material, deduplicating by name
    ///
    /// Returns the stable 0-based index of the material. If a material with
    /// the same name is already present, the existing entry wins and its
    /// index is returned.
    pub fn add(&mut self, material: Material) -> usize {
        if let Some(&idx) = self.by_name.get(&material.name) {
            return idx;
        }
        let idx = self.materials.len();
        self.by_name.insert(material.name.clone(), idx);
        self.materials.push(material);
        idx
    }

    /// Look up a material's index by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Get a material by index
    pub fn get(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Number of materials in the table
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate materials in index order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

impl FromIterator<Material> for MaterialTable {
    fn from_iter<T: IntoIterator<Item = Material>>(iter: T) -> Self {
        let mut table = MaterialTable::new();
        for material in iter {
            table.add(material);
        }
        table
    }
}
