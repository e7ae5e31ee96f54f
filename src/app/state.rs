//! Application state and the file-load state machine.
//!
//! A load goes Idle -> Reading -> Extracting -> Rendering -> Idle. Reads run
//! on the async runtime and complete exactly once onto an mpsc channel that
//! the UI thread drains each frame; extraction is synchronous on the UI
//! thread. Overlapping reads are not cancelled: results are processed in
//! arrival order and the last one drained determines the drawn state.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;

use crate::track::{self, Track, TrackBounds};

/// Reading a dropped or CLI-given file can fail; picker reads cannot.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

type ReadResult = Result<(String, String), LoadError>;

/// The currently drawn track.
pub struct LoadedTrack {
    pub name: String,
    pub track: Arc<Track>,
    pub bounds: TrackBounds,
}

pub struct AppState {
    /// Track currently drawn on the map, if any.
    pub loaded: Option<LoadedTrack>,

    /// Bounds the map should be framed to on the next frame.
    pub pending_fit: Option<TrackBounds>,

    reads_tx: mpsc::Sender<ReadResult>,
    reads_rx: mpsc::Receiver<ReadResult>,
}

impl AppState {
    pub fn new() -> Self {
        let (reads_tx, reads_rx) = mpsc::channel();
        Self {
            loaded: None,
            pending_fit: None,
            reads_tx,
            reads_rx,
        }
    }

    /// Open the async file picker; a dismissed dialog completes without
    /// sending anything.
    pub fn open_picker(&self) {
        let tx = self.reads_tx.clone();
        tokio::spawn(async move {
            let picked = rfd::AsyncFileDialog::new()
                .add_filter("GPX files", &["gpx"])
                .set_title("Select a GPX file")
                .pick_file()
                .await;

            if let Some(handle) = picked {
                let name = handle.file_name();
                let bytes = handle.read().await;
                // Same leniency as a browser's readAsText: never fail on
                // encoding, let the extractor decide what is usable.
                let text = String::from_utf8_lossy(&bytes).into_owned();
                let _ = tx.send(Ok((name, text)));
            }
        });
    }

    /// Start an asynchronous read of a known path (drag-and-drop or CLI).
    pub fn queue_path(&self, path: PathBuf) {
        let tx = self.reads_tx.clone();
        tokio::spawn(async move {
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => Ok((name, String::from_utf8_lossy(&bytes).into_owned())),
                Err(source) => Err(LoadError::Read { name, source }),
            };
            let _ = tx.send(result);
        });
    }

    /// Drain completed reads and run extraction on each.
    ///
    /// Returns true if any read completed this frame, successful or not.
    pub fn drain_completed_reads(&mut self) -> bool {
        let mut processed = false;
        while let Ok(result) = self.reads_rx.try_recv() {
            processed = true;
            match result {
                Ok((name, text)) => self.extract_and_render(name, text),
                Err(error) => tracing::warn!("{error}"),
            }
        }
        processed
    }

    /// Clear the drawn track.
    pub fn clear(&mut self) {
        self.loaded = None;
        self.pending_fit = None;
    }

    fn extract_and_render(&mut self, name: String, text: String) {
        let points = track::track_points(&text);
        if points.is_empty() {
            // The previously drawn track, if any, stays as-is.
            tracing::warn!("{name} contained no usable track points");
            return;
        }

        let track = Track::new(points);
        let Some(bounds) = track.bounds() else {
            return;
        };

        tracing::info!(
            "loaded {name}: {} points, {:.1} km",
            track.len(),
            track.distance_meters() / 1000.0
        );

        self.pending_fit = Some(bounds);
        self.loaded = Some(LoadedTrack {
            name,
            track: Arc::new(track),
            bounds,
        });
    }
}
