//! Headless harness for exercising the viewer without a window or GL context.
//!
//! Wraps [`ViewerSession`] with direct byte loading and simulated input
//! gestures so integration tests can assert on the state machine, rotation,
//! and zoom without a display.

use crate::fetch::PartSource;
use crate::session::ViewerSession;
use crate::state::LoadStatus;

/// Headless driver around a [`ViewerSession`].
pub struct ViewerHarness {
    pub session: ViewerSession,
}

impl ViewerHarness {
    pub fn new() -> Self {
        Self {
            session: ViewerSession::new(true),
        }
    }

    /// Load a part directly from bytes, skipping the fetch layer.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) {
        self.session.begin_load(PartSource::File(name.into()));
        self.session.finish_load(bytes);
    }

    /// Simulate a full drag gesture: down at `from`, one move to `to`, up.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.session.pointer_down(from.0, from.1);
        self.session.pointer_move(to.0, to.1);
        self.session.pointer_up();
    }

    /// Run `n` render-loop ticks.
    pub fn tick(&mut self, n: usize) {
        for _ in 0..n {
            self.session.advance_frame();
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.session.status
    }

    pub fn triangle_count(&self) -> usize {
        self.session
            .mesh()
            .map(|mesh| mesh.triangle_count())
            .unwrap_or(0)
    }

    pub fn yaw(&self) -> f32 {
        self.session.spin.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.session.spin.pitch
    }

    pub fn camera_distance(&self) -> f32 {
        self.session.camera.distance
    }
}

impl Default for ViewerHarness {
    fn default() -> Self {
        Self::new()
    }
}
