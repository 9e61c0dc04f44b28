//! Viewer settings with persistence
//!
//! Settings are read from an explicit path or `~/.config/orbis/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use orbis_core::AltitudeMode;
use orbis_render::ShapeAttributes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All viewer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Shading applied to meshes whose material does not say otherwise
    pub shape: ShapeAttributes,
    pub run: RunSettings,
}

impl ViewerSettings {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("orbis"))
    }

    /// Default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path` (or the default location), falling back
    /// to defaults when the file is missing or unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::settings_path) else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// What the viewer renders and for how long
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Number of frames to drive before exiting
    pub frames: u32,
    /// Model to load; a built-in triangle is used when unset
    pub model: Option<PathBuf>,
    /// Degrees the model turns about its up axis each frame
    pub spin_degrees: f32,
    /// How the model's altitude is measured when placed on the globe
    pub altitude_mode: AltitudeMode,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            frames: 3,
            model: None,
            spin_degrees: 15.0,
            altitude_mode: AltitudeMode::RelativeToGround,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_core::Color;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: ViewerSettings = toml::from_str(
            r#"
            [shape]
            interior_color = { r = 0.5, g = 0.25, b = 0.0, a = 1.0 }

            [run]
            frames = 10
            altitude_mode = "clamp_to_ground"
            "#,
        )
        .unwrap();

        assert_eq!(settings.shape.interior_color, Color::rgb(0.5, 0.25, 0.0));
        assert!(settings.shape.draw_interior);
        assert_eq!(settings.run.frames, 10);
        assert_eq!(settings.run.altitude_mode, AltitudeMode::ClampToGround);
        assert_eq!(settings.run.spin_degrees, 15.0);
        assert!(settings.run.model.is_none());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = ViewerSettings::load(Some(Path::new("/nonexistent/orbis/settings.toml")));
        assert_eq!(settings.run.frames, RunSettings::default().frames);
        assert_eq!(settings.shape, ShapeAttributes::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let path = std::env::temp_dir()
            .join(format!("orbis-settings-{}", std::process::id()))
            .join("settings.toml");
        let mut settings = ViewerSettings::default();
        settings.run.frames = 42;
        settings.run.model = Some(PathBuf::from("models/tower.glb"));
        settings.shape.outline_width = 3.0;
        settings.run.altitude_mode = AltitudeMode::Absolute;

        settings.save(&path).unwrap();
        let loaded = ViewerSettings::load(Some(path.as_path()));
        assert_eq!(loaded.run.frames, 42);
        assert_eq!(loaded.run.model, Some(PathBuf::from("models/tower.glb")));
        assert_eq!(loaded.shape.outline_width, 3.0);
        assert_eq!(loaded.run.altitude_mode, AltitudeMode::Absolute);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
