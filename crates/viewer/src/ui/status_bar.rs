//! Bottom status line: load state, part stats, zoom readout.

use egui::Ui;

use crate::app::ViewerApp;
use crate::state::LoadStatus;

pub fn show(ui: &mut Ui, app: &mut ViewerApp) {
    ui.horizontal(|ui| {
        match app.session.status.clone() {
            LoadStatus::Idle => {
                ui.weak("Open a part to preview it");
            }
            LoadStatus::Loading => {
                ui.spinner();
                match &app.session.source {
                    Some(source) => ui.weak(format!("Loading {source}…")),
                    None => ui.weak("Loading…"),
                };
            }
            LoadStatus::Ready => {
                if let Some(info) = app.session.info {
                    ui.label(format!("{} triangles", info.triangles));
                    ui.separator();
                    ui.weak(format!(
                        "{:.1} × {:.1} × {:.1} mm",
                        info.size[0], info.size[1], info.size[2]
                    ));
                }
            }
            LoadStatus::Error(message) => {
                ui.colored_label(
                    egui::Color32::from_rgb(240, 100, 100),
                    format!("Load failed: {message}"),
                );
                if ui.button("Retry").clicked() {
                    app.retry();
                }
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("Zoom: {:.0}%", app.session.camera.zoom_ratio() * 100.0));
        });
    });
}
