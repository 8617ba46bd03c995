//! Application service layer: configuration and the extraction pipeline

pub mod config;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{ExtractionPipeline, PipelineOptions};
