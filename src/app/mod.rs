//! Application module
//!
//! The eframe application: a full-screen walkers map with the loaded track
//! painted on top, a side panel for loading files, and drag-and-drop
//! support for GPX files.

mod panels;
mod plugin;
pub(crate) mod settings;
mod state;

use eframe::egui;
use walkers::{HttpTiles, Map, MapMemory, sources::OpenStreetMap};

use crate::app::plugin::{PathStyle, TrackPlugin};
use crate::app::settings::Settings;
use crate::app::state::AppState;
use crate::track::mercator;

/// Pixel margin left around the track when fitting the viewport.
const FIT_PADDING_PX: f64 = 50.0;

const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Main application structure
pub struct TrackViewerApp {
    /// Application state (loaded track, in-flight reads)
    state: AppState,

    /// Map tiles provider (OpenStreetMap)
    tiles: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// Fallback map center before any track is fitted
    home: walkers::Position,

    /// Track paint style
    style: PathStyle,

    /// Map size of the last rendered frame, used when applying a fit
    map_view_size: egui::Vec2,
}

impl TrackViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::from_cli();

        let tiles = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());
        let mut map_memory = MapMemory::default();
        let _ = map_memory.set_zoom(settings.zoom);

        let state = AppState::new();
        for path in &settings.gpx_files {
            state.queue_path(path.clone());
        }

        Self {
            state,
            tiles,
            map_memory,
            home: walkers::lat_lon(settings.center_lat, settings.center_lon),
            style: PathStyle {
                width: settings.line_width,
                ..PathStyle::default()
            },
            map_view_size: egui::vec2(1280.0, 720.0),
        }
    }

    /// Frame the map to the pending bounds, if any.
    fn apply_pending_fit(&mut self) {
        let Some(bounds) = self.state.pending_fit.take() else {
            return;
        };

        let viewport = (self.map_view_size.x as f64, self.map_view_size.y as f64);
        let fit = mercator::fit_viewport(&bounds, viewport, FIT_PADDING_PX);

        self.map_memory
            .center_at(walkers::lat_lon(fit.center.lat, fit.center.lon));
        let _ = self.map_memory.set_zoom(fit.zoom);

        tracing::trace!(
            "fitted viewport to ({:.4}, {:.4}) - ({:.4}, {:.4}), zoom {:.1}",
            bounds.min_lat,
            bounds.min_lon,
            bounds.max_lat,
            bounds.max_lon,
            fit.zoom
        );
    }
}

impl eframe::App for TrackViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Completed reads arrive on the state's channel; repaint after
        // processing so a fresh track shows up without user input.
        if self.state.drain_completed_reads() {
            ctx.request_repaint();
        }

        panels::handle_drag_and_drop(ctx, &mut self.state);
        panels::side_panel(ctx, &mut self.state);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.map_view_size = ui.max_rect().size();
                self.apply_pending_fit();

                let mut map = Map::new(Some(&mut self.tiles), &mut self.map_memory, self.home);
                if let Some(loaded) = &self.state.loaded {
                    map = map.with_plugin(TrackPlugin::new(loaded.track.clone(), self.style));
                }
                ui.add(map);

                let screen_rect = ui.max_rect();
                ui.painter().text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    OSM_ATTRIBUTION,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });
    }
}
