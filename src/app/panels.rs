//! Side panel and drag-and-drop handling.

use egui::{Color32, RichText, Ui};

use crate::app::state::AppState;

/// Render the side panel with the load controls and track info.
pub fn side_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("track_panel")
        .default_width(260.0)
        .min_width(220.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("GPX Track Viewer");
            ui.separator();

            if ui.button("📂 Load GPX file...").clicked() {
                state.open_picker();
            }

            ui.add_space(4.0);
            ui.label(
                RichText::new("You can also drag and drop a .gpx file onto the map.")
                    .small()
                    .weak(),
            );

            ui.add_space(8.0);
            ui.separator();

            if state.loaded.is_some() {
                track_info(ui, state);
            } else {
                ui.label(RichText::new("No track loaded").weak());
            }
        });
}

fn track_info(ui: &mut Ui, state: &mut AppState) {
    let Some(loaded) = &state.loaded else {
        return;
    };

    ui.label(RichText::new("✓ Loaded Track").strong().color(Color32::GREEN));
    ui.add_space(4.0);

    egui::Grid::new("track_info_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("File:");
            ui.label(RichText::new(&loaded.name).strong());
            ui.end_row();

            ui.label("Points:");
            ui.label(RichText::new(format!("{}", loaded.track.len())).strong());
            ui.end_row();

            ui.label("Distance:");
            ui.label(RichText::new(format_distance(loaded.track.distance_meters())).strong());
            ui.end_row();
        });

    ui.add_space(8.0);
    let bounds = loaded.bounds;
    ui.horizontal(|ui| {
        if ui.button("🎯 Fit to track").clicked() {
            state.pending_fit = Some(bounds);
        }
        if ui.button("🗑 Clear").clicked() {
            state.clear();
        }
    });
}

/// Handle drag and drop of GPX files onto the window.
pub fn handle_drag_and_drop(ctx: &egui::Context, state: &mut AppState) {
    let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
    let dropped_files: Vec<_> = ctx.input(|i| i.raw.dropped_files.clone());

    if hovering {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_preview"),
        ));
        let screen_rect = ctx.content_rect();
        let bg_rect =
            egui::Rect::from_center_size(screen_rect.center(), egui::vec2(340.0, 80.0));
        painter.rect_filled(bg_rect, 16.0, egui::Color32::from_black_alpha(180));
        painter.text(
            screen_rect.center(),
            egui::Align2::CENTER_CENTER,
            "📂 Drop a GPX file here",
            egui::FontId::proportional(32.0),
            egui::Color32::WHITE,
        );
    }

    for dropped in dropped_files {
        let Some(path) = dropped.path else {
            continue;
        };
        if path.extension().is_some_and(|e| e == "gpx") {
            state.queue_path(path);
        }
    }
}

fn format_distance(meters: f64) -> String {
    let km = meters / 1000.0;
    if km < 1.0 {
        format!("{meters:.0} m")
    } else if km < 100.0 {
        format!("{km:.2} km")
    } else {
        format!("{km:.0} km")
    }
}
