//! Integration tests for the extraction pipeline with stub collaborators

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use image::RgbImage;
use plaka_app::ExtractionPipeline;
use plaka_types::{BoundingBox, Detection, Error, PlateCategory, Result};
use plaka_vision::{PlateDetector, PlateTracker, TextRecognizer, VideoSource};

/// Detector stub: yields a fixed detection list per frame, in order
struct StubDetector {
    per_frame: Vec<Vec<Detection>>,
    next: usize,
}

impl StubDetector {
    fn new(per_frame: Vec<Vec<Detection>>) -> Self {
        Self { per_frame, next: 0 }
    }
}

impl PlateDetector for StubDetector {
    fn detect(&self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        Ok(self.per_frame[0].clone())
    }
}

impl PlateTracker for StubDetector {
    fn track(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        let detections = self.per_frame[self.next].clone();
        self.next += 1;
        Ok(detections)
    }
}

/// Recognizer stub: answers by crop dimensions and counts invocations
struct StubRecognizer {
    by_size: HashMap<(u32, u32), String>,
    calls: Rc<Cell<usize>>,
}

impl StubRecognizer {
    fn new(entries: &[((u32, u32), &str)]) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let recognizer = Self {
            by_size: entries
                .iter()
                .map(|(size, text)| (*size, text.to_string()))
                .collect(),
            calls: Rc::clone(&calls),
        };
        (recognizer, calls)
    }
}

impl TextRecognizer for StubRecognizer {
    fn recognize(&self, crop: &RgbImage) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self
            .by_size
            .get(&crop.dimensions())
            .cloned()
            .unwrap_or_default())
    }
}

/// In-memory frame sequence
struct StubSource {
    frames: Vec<RgbImage>,
    position: usize,
}

impl StubSource {
    fn new(count: usize) -> Self {
        Self {
            frames: (0..count).map(|_| RgbImage::new(200, 200)).collect(),
            position: 0,
        }
    }
}

impl VideoSource for StubSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let frame = self.frames.get(self.position).cloned();
        self.position += 1;
        Ok(frame)
    }
}

fn detection(bbox: BoundingBox, confidence: f32, track_id: Option<u32>) -> Detection {
    Detection {
        bbox,
        confidence,
        track_id,
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let frame = RgbImage::new(width, height);
    let mut bytes = Vec::new();
    frame
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_image_mode_reads_and_annotates() {
    let detector = StubDetector::new(vec![vec![
        // 30x20 crop: a readable standard plate
        detection(BoundingBox::new(10, 10, 40, 30), 0.9, None),
        // 10x8 crop: recognizer finds no text, dropped from output
        detection(BoundingBox::new(50, 50, 60, 58), 0.8, None),
        // Zero-area box: skipped before the recognizer
        detection(BoundingBox::new(70, 70, 70, 80), 0.7, None),
    ]]);
    let (recognizer, calls) = StubRecognizer::new(&[((30, 20), "34abc123")]);

    let pipeline = ExtractionPipeline::new(detector, recognizer);
    let report = pipeline.process_image(&png_bytes(100, 80)).unwrap();

    assert_eq!(report.detections.len(), 1);
    let reading = &report.detections[0];
    assert_eq!(reading.category, PlateCategory::Standard);
    assert_eq!(reading.text, "34 ABC 123");
    assert_eq!(reading.city, "İstanbul");
    assert!((reading.confidence - 0.9).abs() < f32::EPSILON);
    assert!(report.image.starts_with("data:image/jpeg;base64,"));

    // The zero-area detection never reaches the recognizer
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_image_mode_fails_fast_on_undecodable_bytes() {
    let detector = StubDetector::new(vec![vec![]]);
    let (recognizer, _) = StubRecognizer::new(&[]);
    let pipeline = ExtractionPipeline::new(detector, recognizer);

    let result = pipeline.process_image(b"definitely not an image");
    assert!(matches!(result, Err(Error::CannotDecodeImage(_))));
}

#[test]
fn test_video_mode_recognizes_once_per_track() {
    let track1_small = BoundingBox::new(0, 0, 10, 10);
    let track1_best = BoundingBox::new(0, 0, 20, 20);
    let track2_box = BoundingBox::new(100, 100, 130, 110);

    let detector = StubDetector::new(vec![
        vec![detection(track1_small, 0.5, Some(1))], // score 50
        vec![detection(track1_best, 0.5, Some(1))],  // score 200, best
        vec![
            detection(track1_small, 0.9, Some(1)), // score 90, worse
            detection(track2_box, 0.5, Some(2)),
            detection(track1_small, 0.9, None), // no track id, ignored
        ],
    ]);
    let (recognizer, calls) = StubRecognizer::new(&[
        ((20, 20), "TR 34 ABC 123"),
        ((30, 10), "06MA1234"),
    ]);

    let mut pipeline = ExtractionPipeline::new(detector, recognizer);
    let mut source = StubSource::new(3);
    let mut readings = pipeline.process_video(&mut source).unwrap();

    readings.sort_by_key(|r| r.track_id);
    assert_eq!(readings.len(), 2);

    assert_eq!(readings[0].track_id, 1);
    assert_eq!(readings[0].frame_index, 2);
    assert_eq!(readings[0].category, PlateCategory::Standard);
    assert_eq!(readings[0].text, "34 ABC 123");
    assert_eq!(readings[0].city, "İstanbul");
    assert!(readings[0].image.starts_with("data:image/jpeg;base64,"));

    assert_eq!(readings[1].track_id, 2);
    assert_eq!(readings[1].category, PlateCategory::Guest);
    assert_eq!(readings[1].city, "Ankara");

    // One recognition per distinct track, not per frame
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_video_mode_drops_tracks_without_reading() {
    let detector = StubDetector::new(vec![vec![detection(
        BoundingBox::new(0, 0, 10, 10),
        0.9,
        Some(1),
    )]]);
    // Recognizer knows no crop of this size, so it answers with empty text
    let (recognizer, _) = StubRecognizer::new(&[]);

    let mut pipeline = ExtractionPipeline::new(detector, recognizer);
    let mut source = StubSource::new(1);
    let readings = pipeline.process_video(&mut source).unwrap();
    assert!(readings.is_empty());
}

#[test]
fn test_video_mode_foreign_plate_keeps_raw_text() {
    let detector = StubDetector::new(vec![vec![detection(
        BoundingBox::new(0, 0, 25, 10),
        0.9,
        Some(5),
    )]]);
    let (recognizer, _) = StubRecognizer::new(&[((25, 10), "xyz-999")]);

    let mut pipeline = ExtractionPipeline::new(detector, recognizer);
    let mut source = StubSource::new(1);
    let readings = pipeline.process_video(&mut source).unwrap();

    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].category, PlateCategory::Foreign);
    assert_eq!(readings[0].text, "XYZ999");
    assert_eq!(readings[0].city, "Unknown");
}
