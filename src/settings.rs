use crate::CONFY_APP_NAME;
use crate::error::GlbError;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Radians of rotation per pixel of pan translation
    pub pan_sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub default_radius: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pan_sensitivity: 0.005,
            min_radius: 2.0,
            max_radius: 10.0,
            default_radius: 5.0,
        }
    }
}

impl CameraSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "camera").unwrap_or_else(|err| {
            log::warn!("failed to load camera settings: {err}");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), GlbError> {
        confy::store(CONFY_APP_NAME, "camera", self)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    pub show_playback: bool,
    pub show_camera: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_playback: true,
            show_camera: false,
        }
    }
}

impl UiSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "ui").unwrap_or_else(|err| {
            log::warn!("failed to load ui settings: {err}");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), GlbError> {
        confy::store(CONFY_APP_NAME, "ui", self)?;
        Ok(())
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub camera: CameraSettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            camera: CameraSettings::load(),
            ui: UiSettings::load(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            ui: UiSettings::default(),
        }
    }
}
