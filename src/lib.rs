//! Orbit-camera and animation-playback core for a GLB character viewer.
//!
//! The crate owns the interactive state: spherical orbit coordinates driven
//! by pan/pinch gestures, and the selection/loop/freeze machine that decides
//! which named animation plays. Rendering, model decoding and gesture
//! recognition stay with the host; they talk to this core through
//! [`viewer::Viewer`], [`asset::LoadedAsset`] and the
//! [`animation::PlaybackEngine`] seam.

pub mod animation;
pub mod asset;
pub mod camera;
pub mod error;
pub mod settings;
pub mod ui;
pub mod viewer;

/// Application name confy stores settings under
pub const CONFY_APP_NAME: &str = "glbvis-rs";

pub use animation::{
    ActionId, AnimationController, ClipEngine, LoopMode, NullEngine, PlaybackEngine,
    PlaybackState,
};
pub use asset::{Clip, EmbeddedCamera, LoadedAsset};
pub use camera::{CameraPose, OrbitController, OrbitState, Projection};
pub use error::GlbError;
pub use settings::Settings;
pub use viewer::{EventResponse, Viewer};
