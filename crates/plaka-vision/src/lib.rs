//! Vision layer: detector/recognizer capability traits, crop handling,
//! per-track best-frame aggregation, and output rendering.
//!
//! The detector, tracker, and recognizer are external collaborators. They are
//! modeled as traits so the pipeline can be wired to subprocess-backed
//! implementations in production and to in-memory stubs in tests.

pub mod crop;
pub mod render;
pub mod tracker;

pub use crop::{context_region, crop_region, DEFAULT_CONTEXT_PADDING};
pub use render::{draw_box, encode_jpeg_base64};
pub use tracker::{TrackAggregator, TrackRecord};

use image::RgbImage;
use plaka_types::{Detection, Result};

/// Finds plate candidates in a single frame
pub trait PlateDetector {
    fn detect(&self, frame: &RgbImage) -> Result<Vec<Detection>>;
}

/// Stateful detector that assigns stable track identifiers across
/// consecutive frames. Frames must be fed in arrival order; identity
/// continuity is owned entirely by the implementation.
pub trait PlateTracker {
    fn track(&mut self, frame: &RgbImage) -> Result<Vec<Detection>>;
}

/// Reads raw text from a plate crop. An empty string means "no reading".
pub trait TextRecognizer {
    fn recognize(&self, crop: &RgbImage) -> Result<String>;
}

/// A sequence of decoded video frames
pub trait VideoSource {
    /// The next frame in arrival order, or None at end of stream
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}
