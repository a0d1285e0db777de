// Data handed over by the asset loader

use serde::{Deserialize, Serialize};

use crate::camera::Projection;
use crate::error::GlbError;

/// One named animation clip of a loaded model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub name: String,
    /// Length in seconds
    pub duration: f32,
}

impl Clip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Perspective projection of a camera authored into the model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedCamera {
    pub name: String,
    /// Vertical field of view in radians
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl EmbeddedCamera {
    /// Track the viewport so the authored projection renders undistorted
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn projection(&self) -> Projection {
        Projection {
            fovy: self.fovy,
            aspect: self.aspect,
            znear: self.znear,
            zfar: self.zfar,
        }
    }

    fn is_valid(&self) -> bool {
        self.fovy.is_finite()
            && self.fovy > 0.0
            && self.fovy < std::f32::consts::PI
            && self.aspect.is_finite()
            && self.aspect > 0.0
            && self.znear.is_finite()
            && self.znear > 0.0
            && self.zfar.is_finite()
            && self.zfar > self.znear
    }
}

/// Everything the viewer consumes from a decoded model file: the clip list
/// in authored order and any cameras authored into the scene.
///
/// Scene graph, meshes and materials stay with the renderer; they never pass
/// through here.
#[derive(Debug, Clone, Default)]
pub struct LoadedAsset {
    pub clips: Vec<Clip>,
    pub cameras: Vec<EmbeddedCamera>,
}

impl LoadedAsset {
    /// Validate loader output. Duplicate clip names are allowed (playback
    /// resolves to the first); broken durations and projections are not.
    pub fn new(clips: Vec<Clip>, cameras: Vec<EmbeddedCamera>) -> Result<Self, GlbError> {
        for clip in &clips {
            if !clip.duration.is_finite() || clip.duration <= 0.0 {
                return Err(GlbError::BadClipDuration {
                    name: clip.name.clone(),
                    duration: clip.duration,
                });
            }
        }
        for camera in &cameras {
            if !camera.is_valid() {
                return Err(GlbError::BadCameraProjection {
                    name: camera.name.clone(),
                });
            }
        }
        Ok(Self { clips, cameras })
    }

    /// Clip names in authored order
    pub fn names(&self) -> Vec<String> {
        self.clips.iter().map(|clip| clip.name.clone()).collect()
    }

    /// Camera the viewer adopts, when the model brings one
    pub fn primary_camera(&self) -> Option<&EmbeddedCamera> {
        self.cameras.first()
    }
}
