//! Walkers plugin that paints the loaded track as a polyline.

use std::sync::Arc;

use egui::{Color32, Stroke};
use walkers::{Plugin, Projector};

use crate::track::Track;

/// Legs longer than this are subdivided along their great circle before
/// projection, so the drawn line follows the curvature of the Earth.
const GEODESIC_LEG_METERS: f64 = 100_000.0;

/// Visual style of the drawn path.
#[derive(Debug, Clone, Copy)]
pub struct PathStyle {
    pub color: Color32,
    pub opacity: f32,
    pub width: f32,
    pub geodesic: bool,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: Color32::RED,
            opacity: 1.0,
            width: 3.0,
            geodesic: true,
        }
    }
}

impl PathStyle {
    fn stroke(&self) -> Stroke {
        Stroke::new(self.width, self.color.gamma_multiply(self.opacity))
    }
}

/// Plugin that draws one track on the map.
pub struct TrackPlugin {
    track: Arc<Track>,
    style: PathStyle,
}

impl TrackPlugin {
    pub fn new(track: Arc<Track>, style: PathStyle) -> Self {
        Self { track, style }
    }
}

impl Plugin for TrackPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        let points = if self.style.geodesic {
            self.track.geodesic_path(GEODESIC_LEG_METERS)
        } else {
            self.track.points().to_vec()
        };

        let screen_points: Vec<egui::Pos2> = points
            .iter()
            .map(|point| {
                let position = walkers::lat_lon(point.lat, point.lon);
                let screen_vec = projector.project(position);
                egui::Pos2::new(screen_vec.x, screen_vec.y)
            })
            .collect();

        if screen_points.len() >= 2 {
            ui.painter()
                .add(egui::Shape::line(screen_points, self.style.stroke()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_matches_the_drawn_track() {
        let style = PathStyle::default();
        assert_eq!(style.color, Color32::RED);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.width, 3.0);
        assert!(style.geodesic);

        // Full opacity leaves the stroke color untouched.
        let stroke = style.stroke();
        assert_eq!(stroke.color, Color32::RED);
        assert_eq!(stroke.width, 3.0);
    }
}
