//! Shading attributes and their derivation from asset materials

use std::sync::Arc;

use orbis_assets::MaterialDescriptor;
use orbis_core::types::unit;
use orbis_core::Color;
use serde::{Deserialize, Serialize};

/// Shading parameters handed to the rasterizer with every draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeAttributes {
    pub draw_interior: bool,
    pub draw_outline: bool,
    pub enable_lighting: bool,
    /// Fill color of the triangle faces
    pub interior_color: Color,
    pub interior_opacity: f32,
    pub outline_color: Color,
    pub outline_opacity: f32,
    pub outline_width: f32,
    /// Light emitted by the surface, added after lighting
    pub emissive_color: Color,
}

impl Default for ShapeAttributes {
    fn default() -> Self {
        Self {
            draw_interior: true,
            draw_outline: false,
            enable_lighting: true,
            interior_color: Color::WHITE,
            interior_opacity: 1.0,
            outline_color: Color::BLACK,
            outline_opacity: 1.0,
            outline_width: 1.0,
            emissive_color: Color::BLACK,
        }
    }
}

impl ShapeAttributes {
    /// Overwrite the fields a material specifies. Out-of-range components
    /// are clamped into [0, 1]; absent material fields leave ours untouched.
    pub fn apply_material(&mut self, material: &MaterialDescriptor) {
        if let Some([r, g, b, a]) = material.base_color {
            self.interior_color = Color::rgb(r, g, b).clamped();
            self.interior_opacity = unit(a);
        }
        if let Some([r, g, b]) = material.emissive {
            self.emissive_color = Color::rgb(r, g, b).clamped();
        }
    }
}

/// Scene-level inputs every renderable mesh is seeded from.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub default_attributes: Arc<ShapeAttributes>,
    /// Applied to meshes whose asset carries no material of its own
    pub material: Option<MaterialDescriptor>,
}

impl RenderContext {
    pub fn new(default_attributes: ShapeAttributes) -> Self {
        Self {
            default_attributes: Arc::new(default_attributes),
            material: None,
        }
    }

    pub fn with_material(mut self, material: MaterialDescriptor) -> Self {
        self.material = Some(material);
        self
    }
}

/// Derive the effective attributes for a mesh.
///
/// Without a material the defaults are shared as-is (same allocation).
/// With one, the defaults are copied and the material's overrides applied
/// to the copy.
pub fn resolve_attributes(
    defaults: &Arc<ShapeAttributes>,
    material: Option<&MaterialDescriptor>,
) -> Arc<ShapeAttributes> {
    let Some(material) = material else {
        return Arc::clone(defaults);
    };

    let mut attributes = ShapeAttributes::clone(defaults);
    attributes.apply_material(material);
    Arc::new(attributes)
}
