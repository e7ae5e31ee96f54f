use clap::Parser;
use std::path::PathBuf;

/// GPX Track Viewer - load a GPX file and view the recorded track on an interactive map
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Settings {
    /// GPX files to load on startup
    #[clap(value_name = "FILE")]
    pub gpx_files: Vec<PathBuf>,

    /// Initial map center latitude
    #[clap(long, default_value = "40.416775")]
    pub center_lat: f64,

    /// Initial map center longitude
    #[clap(long, default_value = "-3.703790")]
    pub center_lon: f64,

    /// Initial zoom level
    #[clap(long, default_value = "12.0")]
    pub zoom: f64,

    /// Track line width in pixels
    #[clap(long, default_value = "3.0")]
    pub line_width: f32,
}

impl Settings {
    pub fn from_cli() -> Self {
        Settings::parse()
    }
}
