//! OCR text normalization service
//!
//! Turns a raw recognizer string into a cleaned candidate plate string:
//! 1. Uppercase and trim.
//! 2. Strip every character outside {A-Z, 0-9, whitespace}.
//! 3. Strip a literal "TR" country prefix (marks the text as a local candidate).
//! 4. A leading two-digit province code also marks it as a local candidate.
//! 5. For local candidates only, correct ambiguous glyphs O->0, I->1 in the
//!    first two characters (letter to digit, never the reverse).

use serde::{Deserialize, Serialize};

use crate::constants::cities::is_valid_city_code;

/// Diplomatic plates carry the fixed code 99, outside the province range
const DIPLOMATIC_CODE: &str = "99";

/// Cleaned recognizer output plus local-jurisdiction candidacy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    pub text: String,
    pub is_local_candidate: bool,
}

/// Normalize a raw recognized string. Total: empty input yields an empty,
/// non-candidate result.
pub fn normalize(raw: &str) -> NormalizedText {
    let upper = raw.to_uppercase();
    let cleaned: String = upper
        .trim()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let mut is_local_candidate = false;
    let mut text = cleaned.trim().to_string();

    if let Some(rest) = text.strip_prefix("TR") {
        text = rest.trim().to_string();
        is_local_candidate = true;
    }

    if starts_with_plate_code(&text) {
        is_local_candidate = true;
    }

    if is_local_candidate {
        text = correct_leading_glyphs(&text);
    }

    NormalizedText {
        text,
        is_local_candidate,
    }
}

/// Whether the first two characters form a plate code prefix: a province
/// code in [1, 81], or the fixed diplomatic code
fn starts_with_plate_code(text: &str) -> bool {
    let prefix: String = text.chars().take(2).collect();
    if prefix.len() < 2 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    is_valid_city_code(&prefix) || prefix == DIPLOMATIC_CODE
}

/// O->0 and I->1, applied to the first two characters only
fn correct_leading_glyphs(text: &str) -> String {
    text.chars()
        .enumerate()
        .map(|(i, c)| match (i, c) {
            (0..=1, 'O') => '0',
            (0..=1, 'I') => '1',
            _ => c,
        })
        .collect()
}
