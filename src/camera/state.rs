use nalgebra_glm as glm;

/// Spherical orbit coordinates around the model origin
#[derive(Debug, Clone)]
pub struct OrbitState {
    pub theta: f32,
    pub phi: f32,
    pub radius: f32,
    pub default_theta: f32,
    pub default_phi: f32,
    pub default_radius: f32,
}

impl OrbitState {
    pub fn new(theta: f32, phi: f32, radius: f32) -> Self {
        Self {
            theta,
            phi,
            radius,
            default_theta: theta,
            default_phi: phi,
            default_radius: radius,
        }
    }

    pub fn reset(&mut self) {
        self.theta = self.default_theta;
        self.phi = self.default_phi;
        self.radius = self.default_radius;
    }

    pub fn get_orientation(&self) -> (f32, f32) {
        (self.theta, self.phi)
    }

    /// Cartesian camera pose for the current coordinates. Pure; safe to call
    /// before any gesture has happened.
    pub fn pose(&self) -> CameraPose {
        let eye = glm::vec3(
            self.radius * self.theta.sin() * self.phi.cos(),
            self.radius * self.phi.sin(),
            self.radius * self.theta.cos() * self.phi.cos(),
        );
        CameraPose {
            eye,
            target: glm::vec3(0.0, 0.0, 0.0),
        }
    }
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::new(0.0, 0.0, 5.0)
    }
}

/// Eye position plus look-at target, read by the host renderer once per frame
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub eye: glm::Vec3,
    pub target: glm::Vec3,
}

impl CameraPose {
    pub fn view_matrix(&self) -> glm::Mat4 {
        let up = glm::vec3(0.0, 1.0, 0.0); // Y-up coordinate system
        glm::look_at(&self.eye, &self.target, &up)
    }
}

/// Perspective projection parameters handed to the host renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn matrix(&self) -> glm::Mat4 {
        glm::perspective(self.aspect, self.fovy, self.znear, self.zfar)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 50.0_f32.to_radians(),
            aspect: 1.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn default_pose_sits_on_positive_z() {
        let pose = OrbitState::default().pose();
        assert_close(pose.eye.x, 0.0);
        assert_close(pose.eye.y, 0.0);
        assert_close(pose.eye.z, 5.0);
        assert_close(pose.target.x, 0.0);
        assert_close(pose.target.y, 0.0);
        assert_close(pose.target.z, 0.0);
    }

    #[test]
    fn pose_follows_spherical_coordinates() {
        let mut state = OrbitState::default();
        state.theta = 0.5;
        let pose = state.pose();
        assert_close(pose.eye.x, 5.0 * 0.5f32.sin());
        assert_close(pose.eye.y, 0.0);
        assert_close(pose.eye.z, 5.0 * 0.5f32.cos());
    }

    #[test]
    fn elevation_lifts_the_eye() {
        let mut state = OrbitState::default();
        state.phi = 0.3;
        let pose = state.pose();
        assert_close(pose.eye.y, 5.0 * 0.3f32.sin());
        // Horizontal distance shrinks by cos(phi)
        assert_close(pose.eye.z, 5.0 * 0.3f32.cos());
    }

    #[test]
    fn default_projection_is_a_mild_wide_angle() {
        let projection = Projection::default();
        assert_close(projection.fovy, 50.0_f32.to_radians());
        assert_eq!(projection.znear, 0.1);
        assert_eq!(projection.zfar, 1000.0);
    }

    #[test]
    fn reset_restores_construction_values() {
        let mut state = OrbitState::new(1.0, 0.2, 7.0);
        state.theta = -3.0;
        state.phi = 1.2;
        state.radius = 2.0;
        state.reset();
        assert_eq!(state.theta, 1.0);
        assert_eq!(state.phi, 0.2);
        assert_eq!(state.radius, 7.0);
    }
}
