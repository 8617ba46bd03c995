//! Per-track best-frame aggregation
//!
//! Recognition is expensive, so the video path runs it once per tracked
//! vehicle instead of once per frame. The aggregator keeps, per track
//! identifier, only the highest-scoring detection seen so far
//! (score = box area x confidence) together with its crop and a padded
//! context snippet. Finalization consumes the aggregator, so a finalized
//! set can never be observed into again.

use std::collections::HashMap;

use image::RgbImage;
use plaka_types::Detection;

use crate::crop::{context_region, crop_region, DEFAULT_CONTEXT_PADDING};

/// Best detection retained for one track identifier
#[derive(Debug, Clone)]
pub struct TrackRecord {
    pub best_score: f64,
    /// Plate crop from the best-scoring frame
    pub plate_crop: RgbImage,
    /// Padded context snippet, clamped to the frame bounds
    pub context_crop: RgbImage,
    /// Frame the best crop was taken from
    pub frame_index: usize,
}

/// Accumulates the best-scoring detection per track across a frame sequence
#[derive(Debug)]
pub struct TrackAggregator {
    context_padding: i32,
    tracks: HashMap<u32, TrackRecord>,
}

impl Default for TrackAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackAggregator {
    pub fn new() -> Self {
        Self::with_context_padding(DEFAULT_CONTEXT_PADDING)
    }

    pub fn with_context_padding(context_padding: i32) -> Self {
        Self {
            context_padding,
            tracks: HashMap::new(),
        }
    }

    /// Observe one detection. Detections without a track identifier and
    /// detections whose crop has zero area are skipped. An incumbent record
    /// is replaced only by a strictly greater score, so ties keep the
    /// earlier-seen record.
    pub fn observe(&mut self, frame_index: usize, detection: &Detection, frame: &RgbImage) {
        let Some(track_id) = detection.track_id else {
            return;
        };
        let Some(plate_crop) = crop_region(frame, &detection.bbox) else {
            return;
        };

        let score = detection.score();
        let is_better = match self.tracks.get(&track_id) {
            Some(record) => score > record.best_score,
            None => true,
        };
        if !is_better {
            return;
        }

        let Some(context_crop) = context_region(frame, &detection.bbox, self.context_padding)
        else {
            return;
        };

        self.tracks.insert(
            track_id,
            TrackRecord {
                best_score: score,
                plate_crop,
                context_crop,
                frame_index,
            },
        );
    }

    /// Number of tracks observed so far
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Consume the aggregator and yield the final track records, exactly once
    pub fn finalize(self) -> HashMap<u32, TrackRecord> {
        self.tracks
    }
}
