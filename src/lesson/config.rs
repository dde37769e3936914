//! Lesson configuration, loadable from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{vec3, vec4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::machine::DEFAULT_MAX_CHAINED_TRANSITIONS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lesson configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid lesson configuration: {0}")]
    Invalid(String),
}

/// Color and normalized `(x, y, width, height)` rectangle of a HUD widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetStyle {
    pub color: Vec4,
    pub rect: Vec4,
}

impl WidgetStyle {
    pub const fn new(color: Vec4, rect: Vec4) -> Self {
        Self { color, rect }
    }
}

/// The four widgets shown while loading, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressBarConfig {
    pub background: WidgetStyle,
    pub panel: WidgetStyle,
    pub track: WidgetStyle,
    /// Its width is driven by load progress.
    pub fill: WidgetStyle,
}

impl ProgressBarConfig {
    /// Width of the fill at 100% progress.
    pub fn track_width(&self) -> f32 {
        self.track.rect.z
    }

    pub fn styles(&self) -> [WidgetStyle; 4] {
        [self.background, self.panel, self.track, self.fill]
    }
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            background: WidgetStyle::new(vec4(0.0, 0.2, 0.0, 1.0), vec4(0.0, 0.0, 1.0, 1.0)),
            panel: WidgetStyle::new(vec4(0.1, 0.2, 0.1, 0.9), vec4(0.0, 0.0, 1.0, 0.7)),
            track: WidgetStyle::new(vec4(1.0, 1.0, 1.0, 0.02), vec4(0.0, 0.0, 0.7, 0.05)),
            fill: WidgetStyle::new(vec4(1.0, 1.0, 1.0, 0.3), vec4(0.0, 0.0, 0.0, 0.05)),
        }
    }
}

/// Camera placement applied while the model loads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: vec3(0.0, 7.0, 0.0),
            look_at: vec3(
                4.232_63 * 4.0,
                2.643_226_6 * 4.0,
                0.248_642_68 * 4.0,
            ),
            up: vec3(-0.093_412_27, 0.980_528_5, 0.172_737_58),
        }
    }
}

/// Everything a lesson needs to know that is not a collaborator.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    pub machine_name: String,
    pub asset_dir: String,
    pub asset_file: String,
    pub auto_merge_by_material: bool,
    /// Name of the container node the model is loaded into.
    pub group_name: String,
    /// Uniform scale of the container node.
    pub group_scale: f32,
    /// Completed notifications needed before leaving Load.
    pub completion_threshold: u32,
    pub max_chained_transitions: usize,
    pub progress_bar: ProgressBarConfig,
    pub camera: CameraPose,
    /// Light rig installed when loading ends.
    pub lights: Vec<Vec3>,
}

impl Default for LessonConfig {
    fn default() -> Self {
        let h = 15.877;
        Self {
            machine_name: "Pen".to_string(),
            asset_dir: "assets/3d/apartment/a1/".to_string(),
            asset_file: "sheldon.obj".to_string(),
            auto_merge_by_material: true,
            group_name: "officeGroup".to_string(),
            group_scale: 4.0,
            completion_threshold: 1,
            max_chained_transitions: DEFAULT_MAX_CHAINED_TRANSITIONS,
            progress_bar: ProgressBarConfig::default(),
            camera: CameraPose::default(),
            lights: vec![
                vec3(0.0, h, 0.0),
                vec3(-10.0, h, -7.9),
                vec3(-20.4, h, -6.4),
                vec3(9.9, h, -21.6),
                vec3(20.2, h, -6.0),
                vec3(3.0, 12.0, -28.0),
            ],
        }
    }
}

impl LessonConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.completion_threshold == 0 {
            return Err(ConfigError::Invalid(
                "completion_threshold must be at least 1".to_string(),
            ));
        }
        if self.max_chained_transitions == 0 {
            return Err(ConfigError::Invalid(
                "max_chained_transitions must be at least 1".to_string(),
            ));
        }
        if !self.group_scale.is_finite() || self.group_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "group_scale must be positive, got {}",
                self.group_scale
            )));
        }

        let camera = &self.camera;
        if !(camera.eye.is_finite() && camera.look_at.is_finite() && camera.up.is_finite()) {
            return Err(ConfigError::Invalid("camera pose is not finite".to_string()));
        }
        if let Some(light) = self.lights.iter().find(|l| !l.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "light position {light} is not finite"
            )));
        }
        let styles = self.progress_bar.styles();
        if styles
            .iter()
            .any(|s| !(s.color.is_finite() && s.rect.is_finite()))
        {
            return Err(ConfigError::Invalid(
                "progress bar style is not finite".to_string(),
            ));
        }

        Ok(())
    }
}
