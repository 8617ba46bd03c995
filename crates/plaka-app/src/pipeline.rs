//! Extraction pipeline orchestration
//!
//! Single-image mode: detect once, then crop -> recognize -> normalize ->
//! classify per detection. Video mode: feed every frame to the tracking
//! detector and a track aggregator, then run recognition once per track on
//! its best crop after the stream ends.
//!
//! In both modes an empty recognizer result means "no reading" and the
//! detection/track is dropped from the output.

use plaka_domain::{classify_text, GrammarProfile};
use plaka_types::{Error, ImageReport, PlateReading, Result, TrackReading};
use plaka_vision::{
    crop_region, draw_box, encode_jpeg_base64, PlateDetector, PlateTracker, TextRecognizer,
    TrackAggregator, VideoSource, DEFAULT_CONTEXT_PADDING,
};

const BOX_THICKNESS: u32 = 2;

/// Tuning knobs for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub grammar_profile: GrammarProfile,
    pub context_padding: i32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            grammar_profile: GrammarProfile::default(),
            context_padding: DEFAULT_CONTEXT_PADDING,
        }
    }
}

impl PipelineOptions {
    pub fn with_grammar_profile(mut self, profile: GrammarProfile) -> Self {
        self.grammar_profile = profile;
        self
    }

    pub fn with_context_padding(mut self, padding: i32) -> Self {
        self.context_padding = padding;
        self
    }
}

/// Orchestrates detector, recognizer, normalizer, and classifier.
///
/// The collaborators are injected; the pipeline owns no model state of its
/// own and one instance serves one request at a time.
pub struct ExtractionPipeline<D, R> {
    detector: D,
    recognizer: R,
    options: PipelineOptions,
}

impl<D, R> ExtractionPipeline<D, R> {
    pub fn new(detector: D, recognizer: R) -> Self {
        Self {
            detector,
            recognizer,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }
}

impl<D: PlateDetector, R: TextRecognizer> ExtractionPipeline<D, R> {
    /// Process a single image given as raw encoded bytes.
    ///
    /// Fails fast when the bytes do not decode. Zero-area detections are
    /// skipped silently; detections with an empty recognized text are
    /// dropped from the output.
    pub fn process_image(&self, image_bytes: &[u8]) -> Result<ImageReport> {
        let frame = image::load_from_memory(image_bytes)
            .map_err(|e| Error::CannotDecodeImage(e.to_string()))?
            .to_rgb8();

        let detections = self.detector.detect(&frame)?;

        let mut annotated = frame.clone();
        let mut readings = Vec::new();
        for detection in &detections {
            let Some(crop) = crop_region(&frame, &detection.bbox) else {
                continue;
            };
            let raw_text = self.recognizer.recognize(&crop)?;
            if raw_text.trim().is_empty() {
                continue;
            }
            let result = classify_text(&raw_text, self.options.grammar_profile);

            draw_box(&mut annotated, &detection.bbox, BOX_THICKNESS);
            readings.push(PlateReading {
                bbox: detection.bbox,
                text: result.text.clone(),
                category: result.category,
                city: result.city_display().to_string(),
                confidence: detection.confidence,
            });
        }

        Ok(ImageReport {
            image: encode_jpeg_base64(&annotated)?,
            detections: readings,
            processed_at: chrono::Utc::now(),
        })
    }
}

impl<D: PlateTracker, R: TextRecognizer> ExtractionPipeline<D, R> {
    /// Process a video stream: aggregate the best crop per track, then
    /// recognize and classify each track once.
    ///
    /// Frames are fed to the tracker strictly in arrival order. The returned
    /// readings are in no particular order.
    pub fn process_video(&mut self, source: &mut dyn VideoSource) -> Result<Vec<TrackReading>> {
        let mut aggregator = TrackAggregator::with_context_padding(self.options.context_padding);

        let mut frame_index = 0;
        while let Some(frame) = source.next_frame()? {
            frame_index += 1;
            for detection in self.detector.track(&frame)? {
                aggregator.observe(frame_index, &detection, &frame);
            }
        }

        let mut readings = Vec::new();
        for (track_id, record) in aggregator.finalize() {
            let raw_text = self.recognizer.recognize(&record.plate_crop)?;
            if raw_text.trim().is_empty() {
                continue;
            }
            let result = classify_text(&raw_text, self.options.grammar_profile);

            readings.push(TrackReading {
                track_id,
                frame_index: record.frame_index,
                text: result.text.clone(),
                category: result.category,
                city: result.city_display().to_string(),
                image: encode_jpeg_base64(&record.context_crop)?,
            });
        }
        Ok(readings)
    }
}
