use crate::animation::{AnimationController, PlaybackState};
use crate::camera::OrbitState;
use crate::settings::{Settings, UiSettings};

/// User intents collected during one frame of UI.
///
/// The viewer applies these after the frame; the windows themselves never
/// touch controller state.
#[derive(Debug, Default)]
pub struct UiResponse {
    pub previous: bool,
    pub next: bool,
    pub toggle_loop: bool,
    pub toggle_freeze: bool,
    pub reset_camera: bool,
    pub select: Option<usize>,
}

pub struct Ui;

impl Ui {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        playback: &AnimationController,
        playhead: Option<f32>,
        orbit: &OrbitState,
        has_embedded_camera: bool,
        settings: &mut Settings,
    ) -> UiResponse {
        let mut response = UiResponse::default();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label("📋 Windows:");

                if ui
                    .button(if settings.ui.show_playback {
                        "✅ Playback"
                    } else {
                        "⬜ Playback"
                    })
                    .clicked()
                {
                    settings.ui.show_playback = !settings.ui.show_playback;
                    persist(&settings.ui);
                }

                if ui
                    .button(if settings.ui.show_camera {
                        "✅ Camera"
                    } else {
                        "⬜ Camera"
                    })
                    .clicked()
                {
                    settings.ui.show_camera = !settings.ui.show_camera;
                    persist(&settings.ui);
                }
            });
        });

        self.show_playback_window(ctx, playback, playhead, settings, &mut response);
        self.show_camera_window(ctx, orbit, has_embedded_camera, settings, &mut response);

        response
    }

    fn show_playback_window(
        &mut self,
        ctx: &egui::Context,
        playback: &AnimationController,
        playhead: Option<f32>,
        settings: &mut Settings,
        response: &mut UiResponse,
    ) {
        let was_open = settings.ui.show_playback;
        egui::Window::new("🎬 Playback")
            .default_width(300.0)
            .resizable(true)
            .open(&mut settings.ui.show_playback)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("⏮ Previous").clicked() {
                        response.previous = true;
                    }
                    if ui.button("⏭ Next").clicked() {
                        response.next = true;
                    }

                    ui.separator();

                    let freeze_button = if playback.is_frozen() {
                        "❄ Frozen"
                    } else {
                        "❄ Freeze"
                    };
                    if ui.button(freeze_button).clicked() {
                        response.toggle_freeze = true;
                    }

                    let loop_button = if playback.is_looped() {
                        "🔁 Loop"
                    } else {
                        "➡ Once"
                    };
                    if ui.button(loop_button).clicked() {
                        response.toggle_loop = true;
                    }
                });

                ui.separator();

                if playback.names().is_empty() {
                    ui.label("No animations loaded");
                } else {
                    ui.label("Animations:");
                    egui::ScrollArea::vertical()
                        .max_height(200.0)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            ui.set_min_width(ui.available_width());
                            for (i, name) in playback.names().iter().enumerate() {
                                let is_selected = playback.current_index() == Some(i);
                                if ui.selectable_label(is_selected, name).clicked() {
                                    response.select = Some(i);
                                }
                            }
                        });
                }

                ui.separator();

                let state_text = match playback.state() {
                    PlaybackState::Playing => {
                        format!(
                            "▶ Playing {}",
                            playback.current_name().unwrap_or("?")
                        )
                    }
                    PlaybackState::Frozen => "❄ Frozen".to_string(),
                    PlaybackState::Resting => "⏹ T-pose".to_string(),
                };
                ui.label(egui::RichText::new(state_text).strong());

                if let Some(playhead) = playhead {
                    ui.label(format!("Playhead: {playhead:.2}s"));
                }
            });
        if settings.ui.show_playback != was_open {
            persist(&settings.ui);
        }
    }

    fn show_camera_window(
        &mut self,
        ctx: &egui::Context,
        orbit: &OrbitState,
        has_embedded_camera: bool,
        settings: &mut Settings,
        response: &mut UiResponse,
    ) {
        let was_open = settings.ui.show_camera;
        egui::Window::new("🎥 Camera")
            .default_width(220.0)
            .resizable(false)
            .open(&mut settings.ui.show_camera)
            .show(ctx, |ui| {
                let (theta, phi) = orbit.get_orientation();
                ui.label(format!("Theta: {theta:.2} rad"));
                ui.label(format!("Phi: {phi:.2} rad"));
                ui.label(format!("Radius: {:.2}", orbit.radius));

                ui.separator();

                if ui.button("🔄 Reset Camera").clicked() {
                    response.reset_camera = true;
                }

                if has_embedded_camera {
                    ui.label("Model camera: adopted");
                } else {
                    ui.label("Model camera: none");
                }
            });
        if settings.ui.show_camera != was_open {
            persist(&settings.ui);
        }
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

fn persist(settings: &UiSettings) {
    if let Err(err) = settings.save() {
        log::warn!("failed to save ui settings: {err}");
    }
}
