use thiserror::Error;

/// Errors surfaced by the viewer core.
///
/// Per-frame playback and gesture handling never fail; everything here comes
/// from validating loaded collaborator data or persisting settings.
#[derive(Debug, Error)]
pub enum GlbError {
    /// A clip arrived with a duration playback cannot run with
    #[error("clip {name:?} has unusable duration {duration}")]
    BadClipDuration { name: String, duration: f32 },

    /// An embedded camera arrived with a projection the renderer cannot use
    #[error("embedded camera {name:?} has an unusable projection")]
    BadCameraProjection { name: String },

    /// Settings could not be loaded or stored
    #[error("settings persistence failed")]
    Settings(#[from] confy::ConfyError),
}
