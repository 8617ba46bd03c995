//! Shared subprocess plumbing for external vision tools
//!
//! External tools receive the frame as a temporary JPEG via `--image` and
//! answer with a single JSON object on stdout.

use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{ImageFormat, RgbImage};

static CALL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write the frame to a unique temporary JPEG and return its path
fn write_temp_frame(frame: &RgbImage, tag: &str) -> Result<PathBuf, String> {
    let n = CALL_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "plaka_{}_{}_{}.jpg",
        tag,
        std::process::id(),
        n
    ));
    frame
        .save_with_format(&path, ImageFormat::Jpeg)
        .map_err(|e| format!("failed to write temp frame: {}", e))?;
    Ok(path)
}

/// Run a configured command line against one frame and return its stdout.
/// `extra_args` are appended after `--image <path>`.
pub fn run_image_tool(
    command: &str,
    frame: &RgbImage,
    tag: &str,
    extra_args: &[String],
    verbose: bool,
) -> Result<String, String> {
    let mut parts = match shell_words::split(command) {
        Ok(parts) if !parts.is_empty() => parts,
        _ => return Err(format!("invalid command line: {}", command)),
    };

    let frame_path = write_temp_frame(frame, tag)?;

    let program = parts.remove(0);
    let mut cmd = Command::new(&program);
    cmd.args(&parts);
    cmd.arg("--image");
    cmd.arg(&frame_path);
    cmd.args(extra_args);

    if verbose {
        eprintln!(
            "Running: {} {:?} --image {:?} {:?}",
            program, parts, frame_path, extra_args
        );
    }

    let output = cmd.output();
    let _ = std::fs::remove_file(&frame_path);

    let output = output.map_err(|e| format!("failed to run {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} exited with error: {}", program, stderr.trim()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if stdout.trim().is_empty() {
        return Err(format!("{} produced no output", program));
    }
    Ok(stdout)
}
