//! Text recognition via an external OCR command
//!
//! The tool receives a plate crop and answers on stdout:
//! `{"text": "34 ABC 123"}`. An empty text means no readable plate.

use image::RgbImage;
use serde::Deserialize;

use plaka_types::{Error, Result};
use plaka_vision::TextRecognizer;

use crate::subprocess::run_image_tool;

#[derive(Debug, Deserialize)]
struct RecognizerResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    error: Option<String>,
}

/// Subprocess-backed OCR recognizer
pub struct CommandTextRecognizer {
    command: String,
    verbose: bool,
}

impl CommandTextRecognizer {
    pub fn new(command: String) -> Self {
        Self {
            command,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl TextRecognizer for CommandTextRecognizer {
    fn recognize(&self, crop: &RgbImage) -> Result<String> {
        let stdout = run_image_tool(&self.command, crop, "ocr", &[], self.verbose)
            .map_err(Error::Recognizer)?;

        let response: RecognizerResponse = serde_json::from_str(stdout.trim())
            .map_err(|e| Error::Recognizer(format!("invalid recognizer output: {}", e)))?;

        if let Some(message) = response.error {
            return Err(Error::Recognizer(message));
        }

        Ok(response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_recognizer_response() {
        let response: RecognizerResponse =
            serde_json::from_str(r#"{"text": "34 ABC 123"}"#).unwrap();
        assert_eq!(response.text, "34 ABC 123");
    }

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let response: RecognizerResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text, "");
    }
}
