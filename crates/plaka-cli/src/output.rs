//! Output formatting module

use plaka_domain::ClassificationResult;
use plaka_types::{ImageReport, OutputFormat, Result, TrackReading};

pub fn print_image_report(format: OutputFormat, report: &ImageReport) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nPlate Readings");
    println!("==============");
    if report.detections.is_empty() {
        println!("No plates read.");
        return Ok(());
    }
    for reading in &report.detections {
        println!(
            "{:<14} {:<28} {:<16} conf {:>4.2}  box [{}, {}, {}, {}]",
            reading.text,
            reading.category.label(),
            reading.city,
            reading.confidence,
            reading.bbox.x1,
            reading.bbox.y1,
            reading.bbox.x2,
            reading.bbox.y2,
        );
    }
    Ok(())
}

pub fn print_track_readings(format: OutputFormat, readings: &[TrackReading]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(readings)?);
        return Ok(());
    }

    println!("\nTracked Plates");
    println!("==============");
    if readings.is_empty() {
        println!("No plates read.");
        return Ok(());
    }
    for reading in readings {
        println!(
            "track {:<5} frame {:<6} {:<14} {:<28} {}",
            reading.track_id,
            reading.frame_index,
            reading.text,
            reading.category.label(),
            reading.city,
        );
    }
    Ok(())
}

pub fn print_classification(format: OutputFormat, result: &ClassificationResult) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("\nClassification");
    println!("==============");
    println!("Text:      {}", result.text);
    println!("Category:  {}", result.category.label());
    println!("City:      {}", result.city_display());
    if let Some(ref code) = result.city_code {
        println!("City code: {}", code);
    }
    Ok(())
}
