//! Core types used throughout the Orbis renderer

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// How a model's altitude is interpreted when it is placed on the globe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeMode {
    /// Altitude is measured from the ellipsoid surface
    Absolute,
    /// Altitude is measured from the terrain beneath the model
    #[default]
    RelativeToGround,
    /// Altitude is ignored and the model sits on the terrain
    ClampToGround,
}

/// Local placement of a model node: translation, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Rotate by the given quaternion
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = rotation * self.rotation;
    }
}

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const LIGHT_GRAY: Color = Color::rgb(0.75, 0.75, 0.75);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to an array [r, g, b, a]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Copy of this color with every component forced into [0, 1].
    ///
    /// NaN components become 0.0.
    pub fn clamped(&self) -> Color {
        Color {
            r: unit(self.r),
            g: unit(self.g),
            b: unit(self.b),
            a: unit(self.a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Clamp a scalar into [0, 1], mapping NaN to 0.
pub fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix() {
        let transform = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let matrix = transform.matrix();
        let translation = matrix.col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotate_composes() {
        let mut transform = Transform::default();
        transform.rotate(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let p = transform.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_color_clamped() {
        let color = Color::rgba(1.5, -0.25, f32::NAN, 0.5).clamped();
        assert_eq!(color, Color::rgba(1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_default_altitude_mode() {
        assert_eq!(AltitudeMode::default(), AltitudeMode::RelativeToGround);
    }
}
