//! Output image rendering: box annotation and JPEG/base64 encoding

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use plaka_types::{BoundingBox, Result};

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const JPEG_QUALITY: u8 = 90;

/// Draw a hollow rectangle for `bbox` onto the image, `thickness` pixels
/// wide, growing inward. Boxes outside the frame are clipped.
pub fn draw_box(image: &mut RgbImage, bbox: &BoundingBox, thickness: u32) {
    for inset in 0..thickness {
        draw_outline(image, &bbox.padded(-(inset as i32)));
    }
}

fn draw_outline(image: &mut RgbImage, bbox: &BoundingBox) {
    let clamped = bbox.clamp_to(image.width(), image.height());
    if clamped.is_empty() {
        return;
    }
    let (x1, y1) = (clamped.x1 as u32, clamped.y1 as u32);
    let (x2, y2) = (clamped.x2 as u32 - 1, clamped.y2 as u32 - 1);
    for x in x1..=x2 {
        image.put_pixel(x, y1, BOX_COLOR);
        image.put_pixel(x, y2, BOX_COLOR);
    }
    for y in y1..=y2 {
        image.put_pixel(x1, y, BOX_COLOR);
        image.put_pixel(x2, y, BOX_COLOR);
    }
}

/// Encode an image as a JPEG base64 data URI for embedding in result records
pub fn encode_jpeg_base64(image: &RgbImage) -> Result<String> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    encoder.encode_image(image)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&buffer);
    Ok(format!("data:image/jpeg;base64,{}", encoded))
}
