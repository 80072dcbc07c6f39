//! Application menu bar and the open-from-URL window

use eframe::egui;

use crate::app::ViewerApp;
use crate::fetch::PartSource;
use crate::state::Theme;
use crate::ui::toolbar;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, app: &mut ViewerApp) {
    ui.menu_button("File", |ui| {
        if ui.button("Open Part…").clicked() {
            ui.close_menu();
            toolbar::action_open_file(app);
        }
        if ui.button("Open URL…").clicked() {
            app.url_window_open = true;
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, app: &mut ViewerApp) {
    ui.menu_button("View", |ui| {
        if ui.button("Zoom In").clicked() {
            app.session.zoom_in();
            ui.close_menu();
        }
        if ui.button("Zoom Out").clicked() {
            app.session.zoom_out();
            ui.close_menu();
        }
        if ui.button("Reset View").clicked() {
            app.session.reset_view();
            ui.close_menu();
        }
        ui.separator();

        let mut auto = app.session.auto_rotate;
        if ui.checkbox(&mut auto, "Auto-rotate").changed() {
            app.set_auto_rotate(auto);
        }

        let mut light = app.settings.theme == Theme::Light;
        if ui.checkbox(&mut light, "Light background").changed() {
            app.toggle_theme();
        }
    });
}

/// Window for loading a part by direct URL.
pub fn url_window(ctx: &egui::Context, app: &mut ViewerApp) {
    if !app.url_window_open {
        return;
    }

    let mut open = app.url_window_open;
    let mut load_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("Open part from URL")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label("Direct link to an STL file:");
            let edit = ui.add(
                egui::TextEdit::singleline(&mut app.url_input)
                    .desired_width(360.0)
                    .hint_text("https://…/part.stl"),
            );
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.horizontal(|ui| {
                if ui.button("Load").clicked() || submitted {
                    load_clicked = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if load_clicked && !app.url_input.trim().is_empty() {
        let source = PartSource::parse(app.url_input.trim());
        app.open_part(source);
        open = false;
    }
    if cancel_clicked {
        open = false;
    }

    app.url_window_open = open;
}
