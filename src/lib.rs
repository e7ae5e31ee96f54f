//! GPX Track Viewer
//!
//! Loads a GPX file, extracts its track points, and draws the path on an
//! interactive OpenStreetMap view, auto-framing the camera to fit it.

mod app;
pub mod track;

pub use app::TrackViewerApp;
