//! Part viewport with OpenGL rendering

mod gl_renderer;
pub use whiplab_viewer_lib::viewport::{camera, controls};

use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::session::ViewerSession;
use crate::state::Theme;

use gl_renderer::GlRenderer;

/// egui adapter around the session: allocates the canvas, translates pointer
/// and wheel input into session calls, and paints through a GL callback.
pub struct ViewportPanel {
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self { gl_renderer: None }
    }

    /// Initialize the GL pipeline (must be called with a GL context).
    /// Without one the viewport paints only the background; there is no
    /// software fallback for mesh rendering.
    pub fn init_gl(&mut self, gl: &glow::Context) {
        let renderer = GlRenderer::new(gl);
        self.gl_renderer = Some(Arc::new(Mutex::new(renderer)));
    }

    /// Release all GL objects. Called on application exit.
    pub fn destroy(&self, gl: &glow::Context) {
        if let Some(renderer) = &self.gl_renderer {
            if let Ok(r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut ViewerSession, theme: Theme) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        self.handle_input(ui, &response, session);

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect, session, theme);
    }

    fn handle_input(&mut self, ui: &Ui, response: &egui::Response, session: &mut ViewerSession) {
        // Drag to rotate. egui keeps the drag alive while the button is held
        // even after the pointer leaves the canvas rect, so the session sees
        // every move of the gesture.
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                session.pointer_down(pos.x, pos.y);
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                session.pointer_move(pos.x, pos.y);
            }
        }
        if response.drag_stopped() {
            session.pointer_up();
        }

        // Cursor affordance
        if session.is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }

        // Wheel zoom: one fixed step per notch, only while the pointer is
        // over the canvas.
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                session.wheel(scroll);
            }
        }
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, session: &ViewerSession, theme: Theme) {
        let Some(gl_renderer) = &self.gl_renderer else {
            // No GL context: fatal for this viewer instance, background only
            let bg = theme.background();
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_rgb(bg[0], bg[1], bg[2]));
            return;
        };

        let renderer = gl_renderer.clone();
        let camera = session.camera;
        let spin = session.spin;
        let mesh = session.mesh().cloned();
        let version = session.mesh_version();
        let bg_color = theme.background();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer.lock() {
                    r.sync_mesh(gl, mesh.as_deref(), version);
                    r.paint(
                        gl,
                        &camera,
                        &spin,
                        &gl_renderer::RenderParams { viewport, bg_color },
                    );
                }
            })),
        };

        ui.painter().add(callback);
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}
