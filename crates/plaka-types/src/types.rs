//! Core types for license plate extraction

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates (x1 < x2, y1 < y2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }

    /// Pixel area; zero when the box is degenerate
    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Grow the box by `margin` pixels on every side
    pub fn padded(&self, margin: i32) -> Self {
        Self {
            x1: self.x1 - margin,
            y1: self.y1 - margin,
            x2: self.x2 + margin,
            y2: self.y2 + margin,
        }
    }

    /// Clip the box to a frame of the given dimensions
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Self {
        Self {
            x1: self.x1.clamp(0, frame_width as i32),
            y1: self.y1.clamp(0, frame_height as i32),
            x2: self.x2.clamp(0, frame_width as i32),
            y2: self.y2.clamp(0, frame_height as i32),
        }
    }
}

/// A single detector output: one plate candidate in one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Detector confidence in [0, 1]
    pub confidence: f32,
    /// Stable track identifier, assigned by the external tracker (video only)
    #[serde(default)]
    pub track_id: Option<u32>,
}

impl Detection {
    /// Crop quality proxy: box area weighted by confidence
    pub fn score(&self) -> f64 {
        self.bbox.area() as f64 * self.confidence as f64
    }
}

/// Jurisdictional plate category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateCategory {
    /// 99 + CD/CC/CG/CM series
    Diplomatic,
    /// MA/MZ series
    Guest,
    /// A-series (police and official vehicles)
    Police,
    /// Two-digit city code + 1-3 letters + 3-4 digits
    Standard,
    /// Valid city code but no grammar matched
    OtherLocal,
    /// Not a local plate
    Foreign,
}

impl PlateCategory {
    /// Display label for result records
    pub fn label(&self) -> &'static str {
        match self {
            PlateCategory::Diplomatic => "TR Special (Diplomatic)",
            PlateCategory::Guest => "TR Special (Guest)",
            PlateCategory::Police => "TR Special (Police)",
            PlateCategory::Standard => "TR Standard",
            PlateCategory::OtherLocal => "TR (Other/Invalid Format)",
            PlateCategory::Foreign => "Foreign/Unknown",
        }
    }

    /// Whether the plate belongs to the local jurisdiction
    pub fn is_local(&self) -> bool {
        !matches!(self, PlateCategory::Foreign)
    }
}

impl std::fmt::Display for PlateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One read plate in a single-image request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateReading {
    pub bbox: BoundingBox,
    /// Formatted plate text, or the cleaned raw text for foreign plates
    pub text: String,
    pub category: PlateCategory,
    /// Resolved city name ("Unknown" when the code is absent)
    pub city: String,
    pub confidence: f32,
}

/// Result of a single-image extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReport {
    /// Annotated source image as a base64 JPEG data URI
    pub image: String,
    pub detections: Vec<PlateReading>,
    pub processed_at: chrono::DateTime<chrono::Utc>,
}

/// One read plate per tracked vehicle in a video request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackReading {
    pub track_id: u32,
    /// Frame the best-scoring crop was taken from
    pub frame_index: usize,
    pub text: String,
    pub category: PlateCategory,
    pub city: String,
    /// Padded context snippet as a base64 JPEG data URI
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_area() {
        let bbox = BoundingBox::new(10, 10, 30, 20);
        assert_eq!(bbox.area(), 200);
        assert!(!bbox.is_empty());
    }

    #[test]
    fn test_bbox_empty() {
        let bbox = BoundingBox::new(10, 10, 10, 20);
        assert!(bbox.is_empty());
    }

    #[test]
    fn test_bbox_padded_and_clamped() {
        let bbox = BoundingBox::new(10, 10, 630, 470).padded(50).clamp_to(640, 480);
        assert_eq!(bbox, BoundingBox::new(0, 0, 640, 480));
    }

    #[test]
    fn test_detection_score() {
        let det = Detection {
            bbox: BoundingBox::new(0, 0, 10, 10),
            confidence: 0.5,
            track_id: None,
        };
        assert!((det.score() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(PlateCategory::Standard.label(), "TR Standard");
        assert_eq!(PlateCategory::Foreign.label(), "Foreign/Unknown");
        assert!(PlateCategory::OtherLocal.is_local());
        assert!(!PlateCategory::Foreign.is_local());
    }
}
