//! Frame directory video source
//!
//! Treats a directory of pre-extracted frame images (sorted by file name)
//! as a decoded video stream.

use std::path::{Path, PathBuf};

use image::RgbImage;
use walkdir::WalkDir;

use plaka_types::{Error, Result};
use plaka_vision::VideoSource;

/// Supported frame image extensions
const FRAME_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reads frames from a directory of image files, in file name order
pub struct FrameDirSource {
    frames: Vec<PathBuf>,
    position: usize,
}

impl FrameDirSource {
    /// Open a frame directory. Fails fast with `CannotOpenSource` when the
    /// directory does not exist or contains no frame images.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::CannotOpenSource(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let mut frames: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && is_frame_file(path))
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(Error::CannotOpenSource(format!(
                "no frame images in {}",
                dir.display()
            )));
        }

        Ok(Self {
            frames,
            position: 0,
        })
    }

    /// Total number of frames in the sequence
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl VideoSource for FrameDirSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(path) = self.frames.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        let frame = image::open(path)
            .map_err(|e| Error::CannotDecodeImage(format!("{}: {}", path.display(), e)))?;
        Ok(Some(frame.to_rgb8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use tempfile::tempdir;

    fn write_frame(dir: &Path, name: &str, width: u32, height: u32) {
        let frame = RgbImage::new(width, height);
        frame
            .save_with_format(dir.join(name), ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn test_reads_frames_in_name_order() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "frame_002.png", 20, 10);
        write_frame(dir.path(), "frame_001.png", 10, 10);

        let mut source = FrameDirSource::open(dir.path()).unwrap();
        assert_eq!(source.frame_count(), 2);

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.dimensions(), (10, 10));
        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.dimensions(), (20, 10));
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_missing_directory_fails_to_open() {
        let result = FrameDirSource::open(Path::new("/nonexistent/frames"));
        assert!(matches!(result, Err(Error::CannotOpenSource(_))));
    }

    #[test]
    fn test_empty_directory_fails_to_open() {
        let dir = tempdir().unwrap();
        let result = FrameDirSource::open(dir.path());
        assert!(matches!(result, Err(Error::CannotOpenSource(_))));
    }

    #[test]
    fn test_non_frame_files_are_ignored() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "frame_001.png", 10, 10);
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let source = FrameDirSource::open(dir.path()).unwrap();
        assert_eq!(source.frame_count(), 1);
    }
}
