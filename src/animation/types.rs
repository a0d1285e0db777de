// Playback vocabulary shared by the controller and engines

/// How an engine should cycle a started action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap at the clip end and keep going
    Repeat,
    /// Play through once, then finish
    Once,
}

/// Identity of one started playback action.
///
/// Every successful start mints a fresh id, so a completion notification can
/// be matched against the action the controller is still watching. Ids from
/// stopped actions compare unequal and get ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u64);

/// Where playback currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing runs, the model holds its rest pose
    Resting,
    /// The selected animation is driving the model
    Playing,
    /// Playback forced off by the user; the selection is kept
    Frozen,
}
