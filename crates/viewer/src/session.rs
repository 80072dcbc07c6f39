//! Viewer-owned state for one mounted part viewport.
//!
//! All mutation flows through the methods here: load-lifecycle callbacks,
//! pointer/wheel handlers, and the per-frame tick. The egui layer is a thin
//! adapter over this struct, and the test harness drives it headlessly.

use std::sync::Arc;

use whiplab_stl::{decode, MeshGeometry, VIEW_TARGET_SIZE};

use crate::fetch::PartSource;
use crate::state::{LoadStatus, PartInfo};
use crate::viewport::camera::OrbitCamera;
use crate::viewport::controls::{DragSession, ModelSpin, AUTO_ROTATE_STEP};

pub struct ViewerSession {
    pub status: LoadStatus,
    pub source: Option<PartSource>,
    pub info: Option<PartInfo>,
    pub camera: OrbitCamera,
    pub spin: ModelSpin,
    pub auto_rotate: bool,
    mesh: Option<Arc<MeshGeometry>>,
    /// Bumped on every mesh change so the GL layer re-uploads (and first
    /// drops) its buffers.
    mesh_version: u64,
    drag: Option<DragSession>,
}

impl ViewerSession {
    pub fn new(auto_rotate: bool) -> Self {
        Self {
            status: LoadStatus::Idle,
            source: None,
            info: None,
            camera: OrbitCamera::new(),
            spin: ModelSpin::default(),
            auto_rotate,
            mesh: None,
            mesh_version: 0,
            drag: None,
        }
    }

    // ── Load lifecycle ────────────────────────────────────────

    /// Begin loading `source`. The current mesh leaves the scene before the
    /// new bytes are even requested, so two meshes are never resident.
    pub fn begin_load(&mut self, source: PartSource) {
        self.clear_mesh();
        self.info = None;
        self.source = Some(source);
        self.status = LoadStatus::Loading;
    }

    /// Decode fetched bytes. Runs synchronously in the frame they arrive.
    pub fn finish_load(&mut self, bytes: &[u8]) {
        match decode(bytes) {
            Ok(mut mesh) => {
                let triangles = mesh.triangle_count();
                let size = if mesh.is_empty() {
                    glam::Vec3::ZERO
                } else {
                    mesh.aabb().size()
                };
                self.info = Some(PartInfo {
                    triangles,
                    size: size.into(),
                });
                mesh.normalize(VIEW_TARGET_SIZE);
                self.mesh = Some(Arc::new(mesh));
                self.mesh_version += 1;
                self.status = LoadStatus::Ready;
                tracing::info!(
                    "part decoded: {triangles} triangles, {:.1}x{:.1}x{:.1}",
                    size.x,
                    size.y,
                    size.z
                );
            }
            Err(err) => {
                tracing::warn!("decode failed: {err}");
                self.clear_mesh();
                self.status = LoadStatus::Error(err.to_string());
            }
        }
    }

    /// Record a fetch-level failure (network, filesystem).
    pub fn fail_load(&mut self, message: String) {
        self.clear_mesh();
        self.status = LoadStatus::Error(message);
    }

    /// Re-enter `Loading` for the current source and return it so the caller
    /// can re-issue the fetch. This is the manual retry affordance; there is
    /// no automatic retry.
    pub fn retry(&mut self) -> Option<PartSource> {
        let source = self.source.clone()?;
        self.begin_load(source.clone());
        Some(source)
    }

    // ── Input handlers ────────────────────────────────────────

    /// Pointer pressed on the canvas: open a drag session. Auto-rotation is
    /// switched off and stays off until the user re-enables it.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag = Some(DragSession { last: (x, y) });
        self.auto_rotate = false;
    }

    /// Pointer moved while a drag session is active (tracked globally, so
    /// the drag survives the pointer leaving the canvas).
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(drag) = &mut self.drag {
            let dx = x - drag.last.0;
            let dy = y - drag.last.1;
            drag.last = (x, y);
            self.spin.rotate_by(dx, dy);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// One wheel notch: away from the screen zooms out, toward it zooms in.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.camera.zoom_out();
        } else if delta_y > 0.0 {
            self.camera.zoom_in();
        }
    }

    /// Zoom button: same camera-distance step as one wheel notch in.
    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    /// Zoom button: same camera-distance step as one wheel notch out.
    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn set_auto_rotate(&mut self, on: bool) {
        self.auto_rotate = on;
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Restore the initial camera distance and mesh orientation.
    pub fn reset_view(&mut self) {
        self.camera.reset();
        self.spin = ModelSpin::default();
    }

    // ── Frame tick ────────────────────────────────────────────

    /// One render-loop tick, run before painting the frame: advances the
    /// idle rotation when auto-rotate is on and no drag is in progress.
    pub fn advance_frame(&mut self) {
        if self.auto_rotate && self.drag.is_none() && self.mesh.is_some() {
            self.spin.yaw += AUTO_ROTATE_STEP;
        }
    }

    // ── Scene access ──────────────────────────────────────────

    pub fn mesh(&self) -> Option<&Arc<MeshGeometry>> {
        self.mesh.as_ref()
    }

    pub fn mesh_version(&self) -> u64 {
        self.mesh_version
    }

    /// Release the scene: drop the mesh and any drag session and return to
    /// `Idle`. Every exit path funnels through here (unmount, replacement
    /// via `begin_load`, decode failure).
    pub fn teardown(&mut self) {
        self.clear_mesh();
        self.drag = None;
        self.source = None;
        self.info = None;
        self.status = LoadStatus::Idle;
    }

    fn clear_mesh(&mut self) {
        if self.mesh.take().is_some() {
            self.mesh_version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = ViewerSession::new(true);
        assert_eq!(session.status, LoadStatus::Idle);
        assert!(session.mesh().is_none());
        assert!(session.auto_rotate);
    }

    #[test]
    fn test_begin_load_clears_scene_first() {
        let mut session = ViewerSession::new(true);
        session.begin_load(PartSource::parse("a.stl"));
        assert!(session.status.is_loading());
        assert!(session.mesh().is_none());
        assert_eq!(session.source, Some(PartSource::parse("a.stl")));
    }

    #[test]
    fn test_fail_load_surfaces_message() {
        let mut session = ViewerSession::new(true);
        session.begin_load(PartSource::parse("a.stl"));
        session.fail_load("request failed: 404".to_string());
        assert_eq!(session.status.error(), Some("request failed: 404"));
    }

    #[test]
    fn test_retry_reuses_source() {
        let mut session = ViewerSession::new(true);
        session.begin_load(PartSource::parse("a.stl"));
        session.fail_load("boom".to_string());

        let source = session.retry();
        assert_eq!(source, Some(PartSource::parse("a.stl")));
        assert!(session.status.is_loading());
    }

    #[test]
    fn test_retry_without_source_is_none() {
        let mut session = ViewerSession::new(true);
        assert!(session.retry().is_none());
        assert_eq!(session.status, LoadStatus::Idle);
    }
}
