use std::f32::consts::FRAC_PI_2;

use winit::event::{MouseButton, TouchPhase};

use super::OrbitState;
use crate::settings::CameraSettings;

/// Elevation keeps this many radians of margin from the poles
const PHI_MARGIN: f32 = 0.1;

/// Snapshot taken at pan-begin; cumulative deltas apply against it
struct PanSession {
    start_theta: f32,
    start_phi: f32,
    gesture_dx: f32,
    gesture_dy: f32,
}

/// Snapshot taken at pinch-begin
struct PinchSession {
    start_radius: f32,
    gesture_scale: f32,
}

/// Turns pan/pinch gestures and mouse input into orbit-coordinate updates.
///
/// Pan and pinch run as independent sessions, so both gestures can be active
/// in the same frame. Every update clamps; nothing is rejected.
pub struct OrbitController {
    state: OrbitState,
    pan_sensitivity: f32,
    min_radius: f32,
    max_radius: f32,
    pan_session: Option<PanSession>,
    pinch_session: Option<PinchSession>,
    left_mouse_pressed: bool,
    mouse_drag_origin: Option<(f64, f64)>,
}

impl OrbitController {
    pub fn new(state: OrbitState) -> Self {
        Self::with_settings(state, &CameraSettings::default())
    }

    pub fn with_settings(state: OrbitState, settings: &CameraSettings) -> Self {
        let mut controller = Self {
            state,
            pan_sensitivity: settings.pan_sensitivity,
            min_radius: settings.min_radius,
            max_radius: settings.max_radius,
            pan_session: None,
            pinch_session: None,
            left_mouse_pressed: false,
            mouse_drag_origin: None,
        };
        let defaults = CameraSettings::default();
        if !(controller.pan_sensitivity.is_finite() && controller.pan_sensitivity > 0.0) {
            log::warn!(
                "invalid pan sensitivity {}, using {}",
                controller.pan_sensitivity,
                defaults.pan_sensitivity
            );
            controller.pan_sensitivity = defaults.pan_sensitivity;
        }
        if !(controller.min_radius.is_finite()
            && controller.max_radius.is_finite()
            && controller.min_radius > 0.0
            && controller.min_radius <= controller.max_radius)
        {
            log::warn!(
                "invalid radius limits [{}, {}], using [{}, {}]",
                controller.min_radius,
                controller.max_radius,
                defaults.min_radius,
                defaults.max_radius
            );
            controller.min_radius = defaults.min_radius;
            controller.max_radius = defaults.max_radius;
        }
        controller
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    /// Snapshot the current rotation as the base for a pan gesture
    pub fn begin_pan(&mut self) {
        self.pan_session = Some(PanSession {
            start_theta: self.state.theta,
            start_phi: self.state.phi,
            gesture_dx: 0.0,
            gesture_dy: 0.0,
        });
    }

    /// Apply the cumulative translation since pan-begin. No-op without an
    /// active session.
    pub fn update_pan(&mut self, dx: f32, dy: f32) {
        let Some(session) = &self.pan_session else {
            return;
        };
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        // Horizontal swipe rotates around Y, vertical swipe tilts
        self.state.theta = session.start_theta + dx * self.pan_sensitivity;
        self.state.phi = (session.start_phi + dy * self.pan_sensitivity)
            .clamp(-FRAC_PI_2 + PHI_MARGIN, FRAC_PI_2 - PHI_MARGIN);
    }

    pub fn end_pan(&mut self) {
        self.pan_session = None;
    }

    /// Snapshot the current radius as the base for a pinch gesture
    pub fn begin_pinch(&mut self) {
        self.pinch_session = Some(PinchSession {
            start_radius: self.state.radius,
            gesture_scale: 1.0,
        });
    }

    /// Apply the cumulative scale factor since pinch-begin. Inverse mapping:
    /// pinch-out (`scale > 1`) zooms in. No-op without an active session.
    pub fn update_pinch(&mut self, scale: f32) {
        let Some(session) = &self.pinch_session else {
            return;
        };
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.state.radius =
            (session.start_radius / scale).clamp(self.min_radius, self.max_radius);
    }

    pub fn end_pinch(&mut self) {
        self.pinch_session = None;
    }

    /// Direct rotation nudge (trackpad scroll path); same clamps as panning
    pub fn rotate_by(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.state.theta += dx * self.pan_sensitivity;
        self.state.phi = (self.state.phi + dy * self.pan_sensitivity)
            .clamp(-FRAC_PI_2 + PHI_MARGIN, FRAC_PI_2 - PHI_MARGIN);
    }

    /// Wheel zoom - one multiplicative step per scroll line
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let zoom_factor = 1.0 - delta * 0.1;
        self.state.radius =
            (self.state.radius * zoom_factor).clamp(self.min_radius, self.max_radius);
    }

    /// Platform pan gesture with incremental deltas; accumulates them into
    /// the cumulative translation the session expects
    pub fn on_pan_gesture(&mut self, phase: TouchPhase, dx: f32, dy: f32) {
        match phase {
            TouchPhase::Started => self.begin_pan(),
            TouchPhase::Moved => {
                let Some(session) = self.pan_session.as_mut() else {
                    return;
                };
                if dx.is_finite() && dy.is_finite() {
                    session.gesture_dx += dx;
                    session.gesture_dy += dy;
                }
                let (cx, cy) = (session.gesture_dx, session.gesture_dy);
                self.update_pan(cx, cy);
            }
            TouchPhase::Ended | TouchPhase::Cancelled => self.end_pan(),
        }
    }

    /// Platform pinch gesture with incremental magnification deltas
    pub fn on_pinch_gesture(&mut self, phase: TouchPhase, delta: f64) {
        match phase {
            TouchPhase::Started => self.begin_pinch(),
            TouchPhase::Moved => {
                let Some(session) = self.pinch_session.as_mut() else {
                    return;
                };
                let step = 1.0 + delta as f32;
                if step.is_finite() && step > 0.0 {
                    session.gesture_scale *= step;
                }
                let scale = session.gesture_scale;
                self.update_pinch(scale);
            }
            TouchPhase::Ended | TouchPhase::Cancelled => self.end_pinch(),
        }
    }

    /// Handle mouse button press/release; left-drag maps to the pan gesture
    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if button == MouseButton::Left {
            self.left_mouse_pressed = pressed;
            if !pressed {
                self.mouse_drag_origin = None;
                self.end_pan();
            }
        }
    }

    /// Handle mouse movement; the first position after a press anchors the
    /// drag, later positions feed the cumulative translation
    pub fn on_mouse_move(&mut self, position: (f64, f64)) -> bool {
        if !self.left_mouse_pressed {
            self.mouse_drag_origin = None;
            return false;
        }
        match self.mouse_drag_origin {
            None => {
                self.mouse_drag_origin = Some(position);
                self.begin_pan();
                false
            }
            Some(origin) => {
                let dx = (position.0 - origin.0) as f32;
                let dy = (position.1 - origin.1) as f32;
                self.update_pan(dx, dy);
                true
            }
        }
    }

    /// Reset camera to defaults
    pub fn reset(&mut self) {
        self.state.reset();
        self.pan_session = None;
        self.pinch_session = None;
        self.mouse_drag_origin = None;
    }
}
