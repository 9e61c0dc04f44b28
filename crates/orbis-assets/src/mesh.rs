use orbis_core::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Shading parameters a model asset attaches to a primitive.
///
/// Every field is optional; an absent field leaves the corresponding
/// render attribute at its default. Values are stored as authored and are
/// not range-checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub name: Option<String>,
    /// Linear RGBA base color factor
    pub base_color: Option<[f32; 4]>,
    /// Linear RGB emissive factor
    pub emissive: Option<[f32; 3]>,
}

/// Raw indexed geometry decoded from a model asset. Immutable once built.
///
/// `normals`, when present, are aligned 1:1 with `positions`. Indices are
/// not range-checked on construction; geometry assembly reports any index
/// outside `positions`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMesh {
    name: String,
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    indices: Vec<u32>,
    material: Option<MaterialDescriptor>,
}

impl SourceMesh {
    /// Build a mesh from decoded vertex slots and an index list.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Option<Vec<Vec3>>,
        indices: Vec<u32>,
    ) -> Result<Self, AssetError> {
        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                return Err(AssetError::NormalCountMismatch {
                    positions: positions.len(),
                    normals: normals.len(),
                });
            }
        }

        Ok(Self {
            name: String::from("unnamed"),
            positions,
            normals,
            indices,
            material: None,
        })
    }

    /// Set the display name (usually `<mesh>#<primitive>`).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach the material the asset assigns to this primitive.
    pub fn with_material(mut self, material: MaterialDescriptor) -> Self {
        self.material = Some(material);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn material(&self) -> Option<&MaterialDescriptor> {
        self.material.as_ref()
    }
}
