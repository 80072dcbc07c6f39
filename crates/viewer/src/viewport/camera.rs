use glam::{Mat4, Vec3};

/// Distance multiplier for one zoom step (wheel notch or toolbar click).
pub const ZOOM_STEP: f32 = 1.1;

const DEFAULT_DISTANCE: f32 = 5.0;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 200.0;

/// Camera on a fixed axis looking at the origin.
///
/// The mesh itself carries the rotation state, so the camera only moves
/// along its view axis. Zooming multiplies the distance by [`ZOOM_STEP`]
/// (out) or its inverse (in).
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    /// Distance from the origin
    pub distance: f32,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            fov: 45.0_f32.to_radians(),
        }
    }

    /// One step toward the mesh.
    pub fn zoom_in(&mut self) {
        self.distance = (self.distance / ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// One step away from the mesh.
    pub fn zoom_out(&mut self) {
        self.distance = (self.distance * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Displayed zoom ratio: 1.0 at the initial distance, above 1 when closer.
    pub fn zoom_ratio(&self) -> f32 {
        DEFAULT_DISTANCE / self.distance
    }

    pub fn reset(&mut self) {
        self.distance = DEFAULT_DISTANCE;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), Vec3::ZERO, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 400.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_out_compounds_by_step() {
        let mut camera = OrbitCamera::new();
        let start = camera.distance;
        for _ in 0..6 {
            camera.zoom_out();
        }
        let expected = start * ZOOM_STEP.powi(6);
        assert!((camera.distance - expected).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_in_inverts_zoom_out() {
        let mut camera = OrbitCamera::new();
        let start = camera.distance;
        for _ in 0..4 {
            camera.zoom_out();
        }
        for _ in 0..4 {
            camera.zoom_in();
        }
        assert!((camera.distance - start).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_ratio_tracks_distance() {
        let mut camera = OrbitCamera::new();
        assert!((camera.zoom_ratio() - 1.0).abs() < 1e-6);
        camera.zoom_in();
        assert!(camera.zoom_ratio() > 1.0);
        camera.reset();
        assert!((camera.zoom_ratio() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_stays_clamped() {
        let mut camera = OrbitCamera::new();
        for _ in 0..500 {
            camera.zoom_in();
        }
        assert!(camera.distance >= 0.5);
        for _ in 0..500 {
            camera.zoom_out();
        }
        assert!(camera.distance <= 200.0);
    }
}
