//! Pointer-driven rotation state for the displayed mesh.

use glam::Mat4;

/// Rotation applied per pixel of pointer drag (radians).
pub const ROTATE_SENSITIVITY: f32 = 0.01;

/// Yaw advance per rendered frame while auto-rotation is active (radians).
pub const AUTO_ROTATE_STEP: f32 = 0.01;

/// Mesh rotation around the vertical (yaw) and horizontal (pitch) axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelSpin {
    pub yaw: f32,
    pub pitch: f32,
}

impl ModelSpin {
    /// Apply a pointer drag delta in pixels: horizontal movement turns the
    /// part, vertical movement tips it.
    pub fn rotate_by(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * ROTATE_SENSITIVITY;
        self.pitch += dy * ROTATE_SENSITIVITY;
    }

    /// Model matrix for the renderer: pitch around X applied after yaw around Y.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch) * Mat4::from_rotation_y(self.yaw)
    }
}

/// Live pointer drag, created on pointer-down and dropped on pointer-up.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    /// Last pointer position in screen pixels
    pub last: (f32, f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_by_scales_with_sensitivity() {
        let mut spin = ModelSpin::default();
        spin.rotate_by(30.0, -12.0);
        assert!((spin.yaw - 30.0 * ROTATE_SENSITIVITY).abs() < 1e-6);
        assert!((spin.pitch + 12.0 * ROTATE_SENSITIVITY).abs() < 1e-6);
    }

    #[test]
    fn test_zero_spin_is_identity_matrix() {
        let spin = ModelSpin::default();
        let m = spin.model_matrix();
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
