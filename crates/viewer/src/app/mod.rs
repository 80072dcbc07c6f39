//! Main application module

mod menus;
mod styles;

use eframe::egui;

use crate::fetch::{PartFetcher, PartSource};
use crate::session::ViewerSession;
use crate::state::{Theme, ViewerSettings};
use crate::ui::{status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct ViewerApp {
    pub settings: ViewerSettings,
    pub session: ViewerSession,
    fetcher: PartFetcher,
    viewport: ViewportPanel,
    /// "Open URL…" window state
    pub url_window_open: bool,
    pub url_input: String,
    /// Theme the egui visuals were last configured for (to detect changes)
    applied_theme: Theme,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_part: Option<PartSource>) -> Self {
        let settings = ViewerSettings::load();
        styles::configure_styles(&cc.egui_ctx, settings.theme, settings.font_size);

        let mut viewport = ViewportPanel::new();

        // Initialize GL renderer if a glow context is available; without one
        // the viewer instance cannot render meshes at all.
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        } else {
            tracing::error!("no GL context available; mesh rendering disabled");
        }

        let session = ViewerSession::new(settings.auto_rotate);
        let applied_theme = settings.theme;

        let mut app = Self {
            settings,
            session,
            fetcher: PartFetcher::new(),
            viewport,
            url_window_open: false,
            url_input: String::new(),
            applied_theme,
        };

        if let Some(source) = initial_part {
            app.open_part(source);
        }
        app
    }

    /// Kick off a load. The session clears its scene first, then the fetch
    /// is issued, so mesh removal happens-before the replacement arrives.
    pub fn open_part(&mut self, source: PartSource) {
        self.session.begin_load(source.clone());
        self.fetcher.request(source);
    }

    /// Re-request the current source after a failure.
    pub fn retry(&mut self) {
        if let Some(source) = self.session.retry() {
            self.fetcher.request(source);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.save();
    }

    pub fn set_auto_rotate(&mut self, on: bool) {
        self.session.set_auto_rotate(on);
        self.settings.auto_rotate = on;
        self.settings.save();
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme if changed
        if self.settings.theme != self.applied_theme {
            styles::configure_styles(ctx, self.settings.theme, self.settings.font_size);
            self.applied_theme = self.settings.theme;
        }

        // Completed downloads decode synchronously inside this frame
        if let Some(fetched) = self.fetcher.poll() {
            match fetched.result {
                Ok(bytes) => self.session.finish_load(&bytes),
                Err(message) => self.session.fail_load(message),
            }
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, self);
                menus::view_menu(ui, self);
            });
        });

        // ── Open-from-URL window ─────────────────────────────
        menus::url_window(ctx, self);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, self);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, self);
            });

        // Advance idle rotation, then paint the frame from the new state
        self.session.advance_frame();

        // ── Central panel: part viewport ─────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.session, self.settings.theme);
            });

        // Continuous render loop: one repaint per display frame while the
        // viewer is mounted. eframe drops the pending request on shutdown,
        // so at most one loop is ever active.
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.session.teardown();
        if let Some(gl) = gl {
            self.viewport.destroy(gl);
        }
        self.settings.save();
    }
}
