mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::fetch`, `crate::session`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use whiplab_viewer_lib::fetch;
pub use whiplab_viewer_lib::session;
pub use whiplab_viewer_lib::state;

use app::ViewerApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whiplab_viewer=info".into()),
        )
        .init();

    // Parse --part <url-or-path> argument
    let initial_part = parse_part_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("WhipLab — Part Viewer")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "whiplab-viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, initial_part)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_part_arg() -> Option<fetch::PartSource> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--part" && i + 1 < args.len() {
            return Some(fetch::PartSource::parse(&args[i + 1]));
        }
        i += 1;
    }
    None
}
