use crate::animation::{AnimationController, ClipEngine, NullEngine, PlaybackEngine};
use crate::asset::{EmbeddedCamera, LoadedAsset};
use crate::camera::{CameraPose, OrbitController, OrbitState, Projection};
use crate::settings::Settings;
use crate::ui::Ui;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

/// The viewer core: orbit camera, animation selection and playback glue.
///
/// The host owns the window, the render surface and the egui integration; it
/// forwards `WindowEvent`s here, ticks `frame` once per redraw and reads back
/// the camera pose and projection. Model decoding happens host-side too; the
/// result arrives as a [`LoadedAsset`].
pub struct Viewer {
    orbit: OrbitController,
    playback: AnimationController,
    engine: Box<dyn PlaybackEngine>,
    asset: Option<LoadedAsset>,
    embedded_camera: Option<EmbeddedCamera>,
    ui: Ui,
    settings: Settings,
    ui_wants_pointer: bool,
    viewport_aspect: f32,
}

impl Viewer {
    pub fn new(settings: Settings) -> Self {
        let state = OrbitState::new(0.0, 0.0, settings.camera.default_radius);
        let orbit = OrbitController::with_settings(state, &settings.camera);
        Self {
            orbit,
            playback: AnimationController::new(),
            engine: Box::new(NullEngine),
            asset: None,
            embedded_camera: None,
            ui: Ui::new(),
            settings,
            ui_wants_pointer: false,
            viewport_aspect: 1.0,
        }
    }

    /// Construct with whatever settings the last run persisted
    pub fn with_saved_settings() -> Self {
        Self::new(Settings::load())
    }

    pub fn playback(&self) -> &AnimationController {
        &self.playback
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitController {
        &mut self.orbit
    }

    pub fn asset(&self) -> Option<&LoadedAsset> {
        self.asset.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Seconds into the active action, if the engine tracks one
    pub fn playhead(&self) -> Option<f32> {
        self.engine.playhead()
    }

    /// Install a decoded model, driving playback with the built-in clip
    /// engine.
    pub fn load_asset(&mut self, asset: LoadedAsset) {
        let engine = Box::new(ClipEngine::with_clips(asset.clips.clone()));
        self.load_asset_with_engine(asset, engine);
    }

    /// Install a decoded model together with the host's own playback engine.
    ///
    /// Replacing an already loaded model resets the camera and the selection.
    /// The first model keeps both, so a selection made while loading starts
    /// playing the moment its name exists.
    pub fn load_asset_with_engine(
        &mut self,
        asset: LoadedAsset,
        engine: Box<dyn PlaybackEngine>,
    ) {
        if self.asset.is_some() {
            self.orbit.reset();
            self.playback.reset(self.engine.as_mut());
        }
        self.engine = engine;

        self.embedded_camera = asset.primary_camera().cloned();
        if let Some(camera) = &mut self.embedded_camera {
            camera.set_aspect(self.viewport_aspect);
            log::info!("adopting embedded camera {:?}", camera.name);
        }

        let names = asset.names();
        log::info!("model loaded with {} animation(s)", names.len());
        self.asset = Some(asset);
        self.playback.set_names(names, self.engine.as_mut());
    }

    pub fn select_next(&mut self) {
        self.playback.select_next(self.engine.as_mut());
    }

    pub fn select_previous(&mut self) {
        self.playback.select_previous(self.engine.as_mut());
    }

    pub fn select(&mut self, slot: usize) {
        self.playback.select(slot, self.engine.as_mut());
    }

    pub fn set_loop(&mut self, looped: bool) {
        self.playback.set_loop(looped, self.engine.as_mut());
    }

    pub fn toggle_loop(&mut self) {
        let looped = !self.playback.is_looped();
        self.set_loop(looped);
    }

    pub fn set_freeze(&mut self, frozen: bool) {
        self.playback.set_freeze(frozen, self.engine.as_mut());
    }

    pub fn toggle_freeze(&mut self) {
        let frozen = !self.playback.is_frozen();
        self.set_freeze(frozen);
    }

    pub fn reset_camera(&mut self) {
        self.orbit.reset();
    }

    /// Track the render-surface size; keeps projections undistorted
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport_aspect = width as f32 / height as f32;
        if let Some(camera) = &mut self.embedded_camera {
            camera.set_aspect(self.viewport_aspect);
        }
    }

    /// Projection for the current frame: the adopted model camera when one
    /// exists, the default wide-angle otherwise
    pub fn projection(&self) -> Projection {
        match &self.embedded_camera {
            Some(camera) => camera.projection(),
            None => Projection {
                aspect: self.viewport_aspect,
                ..Projection::default()
            },
        }
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key
                    == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.set_viewport(size.width, size.height);
                return EventResponse {
                    repaint: true,
                    exit: false,
                };
            }
            winit::event::WindowEvent::MouseInput { state, button, .. } => {
                // Don't handle mouse input if egui wants the pointer
                if self.ui_wants_pointer {
                    return EventResponse {
                        repaint: false,
                        exit: false,
                    };
                }
                let is_pressed = *state == winit::event::ElementState::Pressed;
                self.orbit.on_mouse_button(*button, is_pressed);
            }
            winit::event::WindowEvent::CursorMoved { position, .. } => {
                if self.ui_wants_pointer {
                    return EventResponse {
                        repaint: false,
                        exit: false,
                    };
                }
                let moved = self.orbit.on_mouse_move((position.x, position.y));
                return EventResponse {
                    repaint: moved,
                    exit: false,
                };
            }
            winit::event::WindowEvent::MouseWheel { delta, .. } => {
                if self.ui_wants_pointer {
                    return EventResponse {
                        repaint: false,
                        exit: false,
                    };
                }
                match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => {
                        // Real mouse wheel - one zoom step per line
                        self.orbit.zoom(*y);
                    }
                    winit::event::MouseScrollDelta::PixelDelta(pos) => {
                        // Trackpad scroll (two fingers) - rotate
                        self.orbit
                            .rotate_by(pos.x as f32 * 0.05, -pos.y as f32 * 0.05);
                    }
                }
                return EventResponse {
                    repaint: true,
                    exit: false,
                };
            }
            winit::event::WindowEvent::PanGesture { delta, phase, .. } => {
                if self.ui_wants_pointer {
                    return EventResponse {
                        repaint: false,
                        exit: false,
                    };
                }
                self.orbit.on_pan_gesture(*phase, delta.x, delta.y);
                return EventResponse {
                    repaint: matches!(phase, winit::event::TouchPhase::Moved),
                    exit: false,
                };
            }
            winit::event::WindowEvent::PinchGesture { delta, phase, .. } => {
                if self.ui_wants_pointer {
                    return EventResponse {
                        repaint: false,
                        exit: false,
                    };
                }
                self.orbit.on_pinch_gesture(*phase, *delta);
                return EventResponse {
                    repaint: matches!(phase, winit::event::TouchPhase::Moved),
                    exit: false,
                };
            }
            _ => {}
        }

        EventResponse {
            repaint: false,
            exit: false,
        }
    }

    /// Advance playback and hand back the camera pose for this frame
    pub fn frame(&mut self, dt: f32) -> CameraPose {
        self.engine.update(dt);
        for id in self.engine.take_finished() {
            self.playback.on_action_finished(id);
        }
        self.orbit.state().pose()
    }

    /// Build the UI for this frame and apply whatever the user clicked.
    /// Call inside the host's egui pass.
    pub fn show_ui(&mut self, ctx: &egui::Context) {
        let playhead = self.engine.playhead();
        let response = self.ui.show(
            ctx,
            &self.playback,
            playhead,
            self.orbit.state(),
            self.embedded_camera.is_some(),
            &mut self.settings,
        );

        if response.previous {
            self.select_previous();
        }
        if response.next {
            self.select_next();
        }
        if response.toggle_freeze {
            self.toggle_freeze();
        }
        if response.toggle_loop {
            self.toggle_loop();
        }
        if response.reset_camera {
            self.reset_camera();
        }
        if let Some(slot) = response.select {
            self.select(slot);
        }

        self.ui_wants_pointer = ctx.wants_pointer_input();
    }
}
