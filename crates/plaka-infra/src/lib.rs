//! Infrastructure layer: subprocess-backed detector/recognizer adapters
//! and file-based frame sources

pub mod command_detector;
pub mod command_recognizer;
pub mod frame_source;
mod subprocess;

pub use command_detector::CommandPlateDetector;
pub use command_recognizer::CommandTextRecognizer;
pub use frame_source::FrameDirSource;
