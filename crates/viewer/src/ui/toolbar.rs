//! Viewer toolbar: open, zoom, rotation, and theme controls.

use egui::Ui;

use crate::app::ViewerApp;
use crate::fetch::PartSource;
use crate::state::Theme;

// ── Public actions (callable from menus too) ─────────────────

pub fn action_open_file(app: &mut ViewerApp) {
    if let Some(path) = rfd::FileDialog::new()
        .set_title("Open printable part")
        .add_filter("STL mesh", &["stl", "STL"])
        .pick_file()
    {
        app.open_part(PartSource::File(path));
    }
}

// ── Toolbar UI ───────────────────────────────────────────────

pub fn show(ui: &mut Ui, app: &mut ViewerApp) {
    ui.horizontal(|ui| {
        if ui.button("📂 Open").on_hover_text("Open a local STL file").clicked() {
            action_open_file(app);
        }
        if ui.button("🌐 URL").on_hover_text("Load a part by URL").clicked() {
            app.url_window_open = true;
        }

        ui.separator();

        if ui.button("Zoom In").clicked() {
            app.session.zoom_in();
        }
        if ui.button("Zoom Out").clicked() {
            app.session.zoom_out();
        }
        if ui.button("Reset View").clicked() {
            app.session.reset_view();
        }

        ui.separator();

        let mut auto = app.session.auto_rotate;
        if ui
            .toggle_value(&mut auto, "⟳ Auto-rotate")
            .on_hover_text("Spin the part while idle; dragging pauses it")
            .changed()
        {
            app.set_auto_rotate(auto);
        }

        let theme_label = match app.settings.theme {
            Theme::Dark => "☀ Light",
            Theme::Light => "🌙 Dark",
        };
        if ui
            .button(theme_label)
            .on_hover_text("Switch the viewport background")
            .clicked()
        {
            app.toggle_theme();
        }
    });
}
