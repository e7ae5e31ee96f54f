#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use gpx_track_viewer::TrackViewerApp;

fn main() {
    // Logging first, so startup diagnostics are not lost.
    tracing_subscriber::fmt::init();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    // The event loop runs inside the runtime so UI code can tokio::spawn
    // file reads directly.
    rt.block_on(async {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("GPX Track Viewer")
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let _ = eframe::run_native(
            "GPX Track Viewer",
            native_options,
            Box::new(|cc| Ok(Box::new(TrackViewerApp::new(cc)))),
        );
    });
}
