//! Crop extraction helpers

use image::RgbImage;
use plaka_types::BoundingBox;

/// Context snippet padding around a plate box, in pixels
pub const DEFAULT_CONTEXT_PADDING: i32 = 50;

/// Extract the region under `bbox`, clipped to the frame bounds.
/// Returns None when the clipped region has zero area.
pub fn crop_region(frame: &RgbImage, bbox: &BoundingBox) -> Option<RgbImage> {
    let clamped = bbox.clamp_to(frame.width(), frame.height());
    if clamped.is_empty() {
        return None;
    }
    Some(
        image::imageops::crop_imm(
            frame,
            clamped.x1 as u32,
            clamped.y1 as u32,
            clamped.width() as u32,
            clamped.height() as u32,
        )
        .to_image(),
    )
}

/// Extract the region under `bbox` grown by `padding` on every side,
/// clipped to the frame bounds
pub fn context_region(frame: &RgbImage, bbox: &BoundingBox, padding: i32) -> Option<RgbImage> {
    crop_region(frame, &bbox.padded(padding))
}
