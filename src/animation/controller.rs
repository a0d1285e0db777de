// Animation selection and playback state

use super::engine::PlaybackEngine;
use super::types::{ActionId, LoopMode, PlaybackState};

/// Decides which animation plays and how.
///
/// Holds the ordered clip-name list plus the selection, loop and freeze
/// flags. Every mutation funnels through one re-apply step that stops all
/// running actions and starts at most one, so the engine never runs two
/// actions at once and flag changes take effect immediately.
pub struct AnimationController {
    names: Vec<String>,
    index: Option<usize>,
    looped: bool,
    frozen: bool,
    is_playing: bool,
    watched: Option<ActionId>,
}

impl AnimationController {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            index: None,
            looped: true,
            frozen: false,
            is_playing: false,
            watched: None,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Selected slot; `None` is the rest pose
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    /// Name under the current selection, if the list has one there
    pub fn current_name(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn state(&self) -> PlaybackState {
        if self.frozen {
            PlaybackState::Frozen
        } else if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Resting
        }
    }

    /// Advance the selection, clamped at the last animation. Selecting always
    /// un-freezes. From the rest pose this picks slot 0, even before any
    /// names have arrived.
    pub fn select_next(&mut self, engine: &mut dyn PlaybackEngine) {
        self.index = Some(match self.index {
            None => 0,
            Some(i) if self.names.is_empty() => i,
            Some(i) => (i + 1).min(self.names.len() - 1),
        });
        self.frozen = false;
        self.apply(engine);
    }

    /// Retreat the selection, clamped at slot 0. The rest pose stays the
    /// rest pose. Selecting always un-freezes.
    pub fn select_previous(&mut self, engine: &mut dyn PlaybackEngine) {
        self.index = self.index.map(|i| i.saturating_sub(1));
        self.frozen = false;
        self.apply(engine);
    }

    /// Jump straight to a slot from the list. Out-of-range slots are ignored.
    pub fn select(&mut self, slot: usize, engine: &mut dyn PlaybackEngine) {
        if slot >= self.names.len() {
            log::warn!("animation slot {slot} out of range, have {}", self.names.len());
            return;
        }
        self.index = Some(slot);
        self.frozen = false;
        self.apply(engine);
    }

    /// Toggle-friendly loop setter; a running action restarts in the new
    /// mode right away.
    pub fn set_loop(&mut self, looped: bool, engine: &mut dyn PlaybackEngine) {
        self.looped = looped;
        self.apply(engine);
    }

    /// Freeze forces everything to stop without touching the selection;
    /// un-freezing resumes it.
    pub fn set_freeze(&mut self, frozen: bool, engine: &mut dyn PlaybackEngine) {
        self.frozen = frozen;
        self.apply(engine);
    }

    /// Swap in the clip names of a newly loaded model. The selection is kept
    /// and re-evaluated, so a selection made while loading starts to play as
    /// soon as its name exists.
    pub fn set_names(&mut self, names: Vec<String>, engine: &mut dyn PlaybackEngine) {
        self.names = names;
        self.apply(engine);
    }

    /// Back to the rest pose with nothing selected. The loop preference
    /// survives.
    pub fn reset(&mut self, engine: &mut dyn PlaybackEngine) {
        self.index = None;
        self.frozen = false;
        self.apply(engine);
    }

    /// Completion signal from the engine. Only the action started last is
    /// honored; finished events from actions stopped earlier are stale and
    /// get dropped.
    pub fn on_action_finished(&mut self, id: ActionId) {
        if self.watched == Some(id) {
            self.watched = None;
            self.is_playing = false;
        }
    }

    /// Stop everything, then start the current selection if it names a clip.
    /// A selection past the end of the list degrades to the rest pose.
    fn apply(&mut self, engine: &mut dyn PlaybackEngine) {
        engine.stop_all();
        self.watched = None;
        self.is_playing = false;
        if self.frozen {
            return;
        }
        let name = match self.index.and_then(|i| self.names.get(i)) {
            Some(name) => name,
            None => return,
        };
        let mode = if self.looped {
            LoopMode::Repeat
        } else {
            LoopMode::Once
        };
        // Non-looping actions hold their final pose instead of resetting
        match engine.play(name, mode, !self.looped) {
            Some(id) => {
                log::debug!("playing {name:?} as {id:?}");
                self.watched = Some(id);
                self.is_playing = true;
            }
            None => {
                log::warn!("engine has no clip named {name:?}");
            }
        }
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted engine that records every call the controller makes
    struct RecordingEngine {
        clips: Vec<String>,
        next_id: u64,
        started: Vec<(String, LoopMode, bool)>,
        stop_count: usize,
    }

    impl RecordingEngine {
        fn with_clips(clips: &[&str]) -> Self {
            Self {
                clips: clips.iter().map(|s| s.to_string()).collect(),
                next_id: 0,
                started: Vec::new(),
                stop_count: 0,
            }
        }

        fn last_started(&self) -> &(String, LoopMode, bool) {
            self.started.last().unwrap()
        }
    }

    impl PlaybackEngine for RecordingEngine {
        fn play(&mut self, name: &str, mode: LoopMode, clamp: bool) -> Option<ActionId> {
            if !self.clips.iter().any(|c| c == name) {
                return None;
            }
            let id = ActionId(self.next_id);
            self.next_id += 1;
            self.started.push((name.to_string(), mode, clamp));
            Some(id)
        }

        fn stop_all(&mut self) {
            self.stop_count += 1;
        }

        fn update(&mut self, _dt: f32) {}

        fn take_finished(&mut self) -> Vec<ActionId> {
            Vec::new()
        }
    }

    fn loaded() -> (AnimationController, RecordingEngine) {
        let mut engine = RecordingEngine::with_clips(&["Idle", "Walk", "Run"]);
        let mut controller = AnimationController::new();
        controller.set_names(
            vec!["Idle".into(), "Walk".into(), "Run".into()],
            &mut engine,
        );
        (controller, engine)
    }

    #[test]
    fn stepping_through_idle_walk_run() {
        let (mut c, mut e) = loaded();
        assert_eq!(c.state(), PlaybackState::Resting);

        c.select_next(&mut e);
        assert_eq!(c.current_name(), Some("Idle"));
        assert_eq!(c.state(), PlaybackState::Playing);

        c.select_next(&mut e);
        c.select_next(&mut e);
        assert_eq!(c.current_name(), Some("Run"));

        c.select_next(&mut e);
        assert_eq!(c.current_index(), Some(2));

        c.set_freeze(true, &mut e);
        assert_eq!(c.state(), PlaybackState::Frozen);
        assert!(!c.is_playing());
    }

    #[test]
    fn previous_clamps_at_the_first_animation() {
        let (mut c, mut e) = loaded();
        c.select_next(&mut e);
        assert_eq!(c.current_index(), Some(0));
        c.select_previous(&mut e);
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn previous_from_rest_stays_at_rest() {
        let (mut c, mut e) = loaded();
        c.select_previous(&mut e);
        assert_eq!(c.current_index(), None);
        assert_eq!(c.state(), PlaybackState::Resting);
        assert!(e.started.is_empty());
    }

    #[test]
    fn every_start_stops_everything_first() {
        let (mut c, mut e) = loaded();
        let before = e.stop_count;
        c.select_next(&mut e);
        assert_eq!(e.stop_count, before + 1);
        assert_eq!(e.started.len(), 1);
    }

    #[test]
    fn navigation_clears_freeze() {
        let (mut c, mut e) = loaded();
        c.select_next(&mut e);
        c.set_freeze(true, &mut e);
        c.select_next(&mut e);
        assert!(!c.is_frozen());
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn unfreezing_resumes_the_selection() {
        let (mut c, mut e) = loaded();
        c.select_next(&mut e);
        c.set_freeze(true, &mut e);
        assert!(!c.is_playing());
        c.set_freeze(false, &mut e);
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(e.last_started().0, "Idle");
    }

    #[test]
    fn loop_mode_follows_the_flag() {
        let (mut c, mut e) = loaded();
        c.select_next(&mut e);
        assert_eq!(e.last_started().1, LoopMode::Repeat);
        assert!(!e.last_started().2);

        c.set_loop(false, &mut e);
        assert_eq!(e.last_started().1, LoopMode::Once);
        assert!(e.last_started().2); // holds the final pose
    }

    #[test]
    fn loop_toggle_restarts_the_running_action() {
        let (mut c, mut e) = loaded();
        c.select_next(&mut e);
        let starts = e.started.len();
        c.set_loop(false, &mut e);
        assert_eq!(e.started.len(), starts + 1);
        assert!(c.is_playing());
    }

    #[test]
    fn selection_made_before_names_arrive_plays_later() {
        let mut e = RecordingEngine::with_clips(&["Idle"]);
        let mut c = AnimationController::new();

        c.select_next(&mut e);
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.state(), PlaybackState::Resting);
        assert!(e.started.is_empty());

        c.set_names(vec!["Idle".into()], &mut e);
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(e.last_started().0, "Idle");
    }

    #[test]
    fn selection_past_a_shrunken_list_degrades_to_rest() {
        let (mut c, mut e) = loaded();
        c.select_next(&mut e);
        c.select_next(&mut e);
        c.set_names(vec!["Idle".into()], &mut e);
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(c.current_name(), None);
        assert_eq!(c.state(), PlaybackState::Resting);
    }

    #[test]
    fn unknown_clip_leaves_the_controller_resting() {
        let mut e = RecordingEngine::with_clips(&[]);
        let mut c = AnimationController::new();
        c.set_names(vec!["Ghost".into()], &mut e);
        c.select_next(&mut e);
        assert_eq!(c.current_name(), Some("Ghost"));
        assert!(!c.is_playing());
        assert_eq!(c.state(), PlaybackState::Resting);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let (mut c, mut e) = loaded();
        c.select_next(&mut e); // Idle, id 0
        c.select_next(&mut e); // Walk, id 1

        c.on_action_finished(ActionId(0));
        assert!(c.is_playing());

        c.on_action_finished(ActionId(1));
        assert!(!c.is_playing());
        assert_eq!(c.state(), PlaybackState::Resting);
    }

    #[test]
    fn direct_selection_plays_that_slot() {
        let (mut c, mut e) = loaded();
        c.set_freeze(true, &mut e);
        c.select(2, &mut e);
        assert_eq!(c.current_name(), Some("Run"));
        assert!(!c.is_frozen());
        assert_eq!(e.last_started().0, "Run");

        c.select(9, &mut e);
        assert_eq!(c.current_name(), Some("Run"));
    }

    #[test]
    fn reset_returns_to_rest_but_keeps_the_loop_preference() {
        let (mut c, mut e) = loaded();
        c.set_loop(false, &mut e);
        c.select_next(&mut e);
        c.reset(&mut e);
        assert_eq!(c.current_index(), None);
        assert_eq!(c.state(), PlaybackState::Resting);
        assert!(!c.is_looped());
    }
}
