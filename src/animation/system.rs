// Built-in clock-driven playback engine

use super::engine::PlaybackEngine;
use super::types::{ActionId, LoopMode};
use crate::asset::Clip;

/// One started action and its playhead
struct ActiveAction {
    id: ActionId,
    clip_index: usize,
    clip: Clip,
    mode: LoopMode,
    clamp_when_finished: bool,
    time: f32,
    done: bool,
}

/// Plays the clips of a loaded model against a wall-clock delta.
///
/// The engine tracks playheads and completion only; sampling the skeleton at
/// the playhead is the renderer's business. A finished `Once` action with
/// clamp-on-finish stays resident holding its final frame, without it the
/// action is dropped and the model returns to rest.
pub struct ClipEngine {
    clips: Vec<Clip>,
    actions: Vec<ActiveAction>,
    finished: Vec<ActionId>,
    next_id: u64,
}

impl ClipEngine {
    pub fn new() -> Self {
        Self {
            clips: Vec::new(),
            actions: Vec::new(),
            finished: Vec::new(),
            next_id: 0,
        }
    }

    pub fn with_clips(clips: Vec<Clip>) -> Self {
        let mut engine = Self::new();
        engine.set_clips(clips);
        engine
    }

    /// Swap in the clips of a newly loaded model. Running actions are
    /// dropped; action ids stay unique across swaps.
    pub fn set_clips(&mut self, clips: Vec<Clip>) {
        self.clips = clips;
        self.actions.clear();
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Clip index and seconds of the active action, for the host renderer to
    /// sample the skeleton from
    pub fn active(&self) -> Option<(usize, f32)> {
        self.actions
            .first()
            .map(|action| (action.clip_index, action.time))
    }

    pub fn active_count(&self) -> usize {
        self.actions.len()
    }
}

impl PlaybackEngine for ClipEngine {
    fn play(&mut self, name: &str, mode: LoopMode, clamp_when_finished: bool) -> Option<ActionId> {
        // First clip wins when a model carries duplicate names
        let (clip_index, clip) = self
            .clips
            .iter()
            .enumerate()
            .find(|(_, clip)| clip.name == name)?;
        let clip = clip.clone();
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.actions.push(ActiveAction {
            id,
            clip_index,
            clip,
            mode,
            clamp_when_finished,
            time: 0.0,
            done: false,
        });
        Some(id)
    }

    fn stop_all(&mut self) {
        self.actions.clear();
    }

    fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        for action in &mut self.actions {
            if action.done {
                continue;
            }
            action.time += dt;
            match action.mode {
                LoopMode::Repeat => {
                    if action.clip.duration > 0.0 && action.time >= action.clip.duration {
                        action.time %= action.clip.duration;
                    }
                }
                LoopMode::Once => {
                    if action.time >= action.clip.duration {
                        action.time = action.clip.duration;
                        action.done = true;
                        self.finished.push(action.id);
                    }
                }
            }
        }
        self.actions
            .retain(|action| !action.done || action.clamp_when_finished);
    }

    fn take_finished(&mut self) -> Vec<ActionId> {
        std::mem::take(&mut self.finished)
    }

    fn playhead(&self) -> Option<f32> {
        self.actions.first().map(|action| action.time)
    }
}

impl Default for ClipEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ClipEngine {
        ClipEngine::with_clips(vec![
            Clip {
                name: "Idle".into(),
                duration: 1.0,
            },
            Clip {
                name: "Wave".into(),
                duration: 0.5,
            },
        ])
    }

    #[test]
    fn repeating_action_wraps_its_playhead() {
        let mut e = engine();
        e.play("Idle", LoopMode::Repeat, false).unwrap();
        for _ in 0..5 {
            e.update(0.25);
        }
        let playhead = e.playhead().unwrap();
        assert!((playhead - 0.25).abs() < 1e-5);
        assert!(e.take_finished().is_empty());
    }

    #[test]
    fn once_action_finishes_and_holds_its_final_frame() {
        let mut e = engine();
        let id = e.play("Wave", LoopMode::Once, true).unwrap();
        e.update(0.3);
        assert!(e.take_finished().is_empty());
        e.update(0.3);
        assert_eq!(e.take_finished(), vec![id]);
        assert_eq!(e.playhead(), Some(0.5));

        // Holds the final frame, no second completion
        e.update(1.0);
        assert!(e.take_finished().is_empty());
        assert_eq!(e.playhead(), Some(0.5));
    }

    #[test]
    fn once_action_without_clamp_is_dropped() {
        let mut e = engine();
        e.play("Wave", LoopMode::Once, false).unwrap();
        e.update(1.0);
        assert_eq!(e.active_count(), 0);
        assert_eq!(e.playhead(), None);
        assert_eq!(e.take_finished().len(), 1);
    }

    #[test]
    fn stopped_actions_never_report_completion() {
        let mut e = engine();
        e.play("Wave", LoopMode::Once, true).unwrap();
        e.update(0.2);
        e.stop_all();
        e.update(2.0);
        assert!(e.take_finished().is_empty());
        assert_eq!(e.active_count(), 0);
    }

    #[test]
    fn unknown_clip_refuses_to_start() {
        let mut e = engine();
        assert_eq!(e.play("Sprint", LoopMode::Repeat, false), None);
    }

    #[test]
    fn duplicate_clip_names_resolve_to_the_first() {
        let mut e = ClipEngine::with_clips(vec![
            Clip {
                name: "Wave".into(),
                duration: 0.5,
            },
            Clip {
                name: "Wave".into(),
                duration: 9.0,
            },
        ]);
        e.play("Wave", LoopMode::Once, true).unwrap();
        e.update(0.6);
        assert_eq!(e.take_finished().len(), 1);
        assert_eq!(e.playhead(), Some(0.5));
        assert_eq!(e.active(), Some((0, 0.5)));
    }

    #[test]
    fn action_ids_stay_unique_across_restarts_and_swaps() {
        let mut e = engine();
        let first = e.play("Idle", LoopMode::Repeat, false).unwrap();
        e.stop_all();
        let second = e.play("Idle", LoopMode::Repeat, false).unwrap();
        assert_ne!(first, second);

        e.set_clips(vec![Clip {
            name: "Idle".into(),
            duration: 2.0,
        }]);
        let third = e.play("Idle", LoopMode::Repeat, false).unwrap();
        assert_ne!(second, third);
    }

    #[test]
    fn nonpositive_dt_is_ignored() {
        let mut e = engine();
        e.play("Idle", LoopMode::Repeat, false).unwrap();
        e.update(0.0);
        e.update(-1.0);
        e.update(f32::NAN);
        assert_eq!(e.playhead(), Some(0.0));
    }
}
