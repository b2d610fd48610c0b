//! Viewer configuration
//!
//! Loaded from a TOML file (`morphbot.toml` by default). Every section and
//! field is optional; anything left out keeps its default. A missing file is
//! not an error.

use morphbot_core::{Color, MorphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "morphbot.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Morphbot".to_string(),
            width: 1000,
            height: 1000,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Wait between frames in milliseconds
    pub frame_delay_ms: u64,
    /// Run one morph step every this many frames while auto-stepping
    pub morph_every: u32,
    /// Start with auto-stepping enabled
    pub auto_step: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 10,
            morph_every: 10,
            auto_step: false,
        }
    }
}

impl AnimationConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub view_x: f32,
    pub view_y: f32,
    pub view_z: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Degrees of rotation per pixel dragged
    pub drag_sensitivity: f32,
    /// Distance moved per frame while an arrow key is held
    pub pan_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view_x: 0.0,
            view_y: 0.0,
            view_z: -15.0,
            fov: 45.0,
            near: 0.1,
            far: 50.0,
            drag_sensitivity: 0.5,
            pan_speed: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: [f32; 3],
    /// Start in outline-only mode
    pub wireframe: bool,
    /// Start with joint pivot markers shown
    pub joint_markers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0],
            wireframe: false,
            joint_markers: false,
        }
    }
}

impl RenderConfig {
    pub fn clear_color(&self) -> Color {
        let [r, g, b] = self.clear_color;
        Color::rgb(r, g, b)
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl ViewerConfig {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from a file that must exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            MorphError::TomlParseError(msg) => {
                MorphError::TomlParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ViewerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(MorphError::ConfigError(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(MorphError::ConfigError(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.animation.frame_delay(), Duration::from_millis(10));
        assert_eq!(config.animation.morph_every, 10);
        assert!(!config.animation.auto_step);
        assert_eq!(config.camera.view_z, -15.0);
        assert_eq!(config.camera.drag_sensitivity, 0.5);
        assert_eq!(config.render.clear_color(), Color::BLACK);
    }

    #[test]
    fn test_partial_override() {
        let file = temp_config(
            r#"
[animation]
morph_every = 4
auto_step = true

[camera]
view_z = -20.0

[render]
wireframe = true
"#,
        );
        let config = ViewerConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.animation.morph_every, 4);
        assert!(config.animation.auto_step);
        assert_eq!(config.animation.frame_delay_ms, 10);
        assert_eq!(config.camera.view_z, -20.0);
        assert_eq!(config.camera.fov, 45.0);
        assert!(config.render.wireframe);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_parse_error_names_file() {
        let file = temp_config("[window\nwidth = 3");
        let err = ViewerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, MorphError::TomlParseError(_)));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = ViewerConfig::from_toml_str("[window]\nwidth = 0").unwrap_err();
        assert!(matches!(err, MorphError::ConfigError(_)));

        let err = ViewerConfig::from_toml_str("[camera]\nnear = 10.0\nfar = 5.0").unwrap_err();
        assert!(matches!(err, MorphError::ConfigError(_)));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = ViewerConfig::default();
        config.window.title = "Robot".into();
        config.render.clear_color = [0.1, 0.2, 0.3];
        let text = toml::to_string(&config).unwrap();
        assert_eq!(ViewerConfig::from_toml_str(&text).unwrap(), config);
    }
}
