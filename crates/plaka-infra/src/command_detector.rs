//! Plate detection via an external YOLO command
//!
//! The tool is invoked once per frame and answers on stdout:
//! `{"detections": [{"box": [x1, y1, x2, y2], "conf": 0.93, "track_id": 3}]}`
//! Track identifiers are only present when the tool is run in tracking mode,
//! where it persists tracker state in a session file between invocations.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbImage;
use serde::Deserialize;

use plaka_types::{BoundingBox, Detection, Error, Result};
use plaka_vision::{PlateDetector, PlateTracker};

use crate::subprocess::run_image_tool;

#[derive(Debug, Deserialize)]
struct DetectorResponse {
    #[serde(default)]
    detections: Vec<RawDetection>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    #[serde(rename = "box")]
    bbox: [i32; 4],
    conf: f32,
    #[serde(default)]
    track_id: Option<u32>,
}

/// Subprocess-backed plate detector/tracker
pub struct CommandPlateDetector {
    command: String,
    min_confidence: f32,
    verbose: bool,
    /// Session state file the external tracker persists identities in.
    /// One session per detector instance, so concurrent video requests
    /// never share track state.
    session_path: PathBuf,
}

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

impl CommandPlateDetector {
    pub fn new(command: String, min_confidence: f32) -> Self {
        let session_path = std::env::temp_dir().join(format!(
            "plaka_track_session_{}_{}.json",
            std::process::id(),
            SESSION_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        Self {
            command,
            min_confidence,
            verbose: false,
            session_path,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn run(&self, frame: &RgbImage, extra_args: &[String]) -> Result<Vec<Detection>> {
        let stdout = run_image_tool(&self.command, frame, "detect", extra_args, self.verbose)
            .map_err(Error::Detector)?;

        let response: DetectorResponse =
            serde_json::from_str(stdout.trim()).map_err(|e| {
                Error::Detector(format!("invalid detector output: {}", e))
            })?;

        if let Some(message) = response.error {
            return Err(Error::Detector(message));
        }

        let detections = response
            .detections
            .into_iter()
            .filter(|d| d.conf >= self.min_confidence)
            .map(|d| Detection {
                bbox: BoundingBox::new(d.bbox[0], d.bbox[1], d.bbox[2], d.bbox[3]),
                confidence: d.conf,
                track_id: d.track_id,
            })
            .collect();
        Ok(detections)
    }
}

impl Drop for CommandPlateDetector {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.session_path);
    }
}

impl PlateDetector for CommandPlateDetector {
    fn detect(&self, frame: &RgbImage) -> Result<Vec<Detection>> {
        self.run(frame, &[])
    }
}

impl PlateTracker for CommandPlateDetector {
    fn track(&mut self, frame: &RgbImage) -> Result<Vec<Detection>> {
        let args = vec![
            "--track".to_string(),
            "--session".to_string(),
            self.session_path.display().to_string(),
        ];
        self.run(frame, &args)
    }
}
