// Seam between selection logic and whatever mixes the skeleton

use super::types::{ActionId, LoopMode};

/// Playback backend driven by the controller.
///
/// The host decides what actually animates - the built-in clip engine or its
/// own GPU-skinned mixer. The controller only needs these four operations.
pub trait PlaybackEngine {
    /// Start the named clip and return the id of the new action, or `None`
    /// if no clip goes by that name.
    ///
    /// With `clamp_when_finished` a `Once` action holds its final pose after
    /// completing instead of snapping back to rest.
    fn play(&mut self, name: &str, mode: LoopMode, clamp_when_finished: bool) -> Option<ActionId>;

    /// Stop every running action. Stopped actions never report completion.
    fn stop_all(&mut self);

    /// Advance playback by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Drain the actions that ran to completion since the last call.
    fn take_finished(&mut self) -> Vec<ActionId>;

    /// Seconds into the active action, for UI readouts. Engines without a
    /// meaningful playhead keep the default.
    fn playhead(&self) -> Option<f32> {
        None
    }
}

/// Engine that plays nothing. Stands in until a model arrives.
#[derive(Debug, Default)]
pub struct NullEngine;

impl PlaybackEngine for NullEngine {
    fn play(&mut self, _name: &str, _mode: LoopMode, _clamp: bool) -> Option<ActionId> {
        None
    }

    fn stop_all(&mut self) {}

    fn update(&mut self, _dt: f32) {}

    fn take_finished(&mut self) -> Vec<ActionId> {
        Vec::new()
    }
}
