//! Plate grammar classification service
//!
//! Applies an ordered list of grammar rules to the compacted (whitespace-free)
//! normalized text. The first satisfied rule wins. Every rule parses the same
//! three segments: a leading two-digit code, a letter series, and a trailing
//! digit/alphanumeric group; anything after the matched segments is ignored
//! as OCR garbage.

use serde::{Deserialize, Serialize};

use plaka_types::PlateCategory;

use crate::constants::cities::{city_name, is_valid_city_code};
use crate::service::normalizer::{normalize, NormalizedText};

/// Which grammar precedence list to evaluate.
///
/// `Full` is the canonical five-tier order and the default everywhere.
/// `ImageLegacy` is a narrow list (Standard, then Police) kept selectable
/// for comparison against results produced before the special series
/// were handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarProfile {
    #[default]
    Full,
    ImageLegacy,
}

impl GrammarProfile {
    fn rules(&self) -> &'static [GrammarRule] {
        match self {
            GrammarProfile::Full => FULL_GRAMMAR,
            GrammarProfile::ImageLegacy => IMAGE_LEGACY_GRAMMAR,
        }
    }
}

/// Outcome of classifying one normalized text. Total: every input maps to
/// exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: PlateCategory,
    /// Canonical "<code> <series> <digits>" string, set only for matched grammars
    pub formatted: Option<String>,
    pub city_code: Option<String>,
    pub city_name: Option<String>,
    /// Display text: the formatted plate, or the cleaned text as fallback
    pub text: String,
}

impl ClassificationResult {
    /// City name for display, defaulting to "Unknown"
    pub fn city_display(&self) -> &str {
        self.city_name.as_deref().unwrap_or("Unknown")
    }
}

/// Leading-code requirement of a rule
#[derive(Debug, Clone, Copy)]
enum CodeSpec {
    /// The fixed diplomatic code "99" (outside the province range)
    Diplomatic,
    /// Any province code in [1, 81]
    AnyValid,
}

/// Letter-series requirement of a rule
#[derive(Debug, Clone, Copy)]
enum SeriesSpec {
    /// One of a fixed set of two-letter series
    OneOf(&'static [&'static str]),
    /// 1-3 repetitions of a single letter
    Repeated(char, usize, usize),
    /// A plain letter run with the given length bounds
    Letters(usize, usize),
}

/// Trailing-group requirement of a rule
#[derive(Debug, Clone, Copy)]
enum TailSpec {
    Digits(usize, usize),
    Alphanumeric(usize, usize),
}

struct GrammarRule {
    category: PlateCategory,
    code: CodeSpec,
    series: SeriesSpec,
    tail: TailSpec,
}

const DIPLOMATIC_SERIES: &[&str] = &["CD", "CC", "CG", "CM"];
const GUEST_SERIES: &[&str] = &["MA", "MZ"];

/// Canonical precedence: special series before the standard grammar
const FULL_GRAMMAR: &[GrammarRule] = &[
    GrammarRule {
        category: PlateCategory::Diplomatic,
        code: CodeSpec::Diplomatic,
        series: SeriesSpec::OneOf(DIPLOMATIC_SERIES),
        tail: TailSpec::Digits(1, 4),
    },
    GrammarRule {
        category: PlateCategory::Guest,
        code: CodeSpec::AnyValid,
        series: SeriesSpec::OneOf(GUEST_SERIES),
        tail: TailSpec::Alphanumeric(2, 6),
    },
    GrammarRule {
        category: PlateCategory::Police,
        code: CodeSpec::AnyValid,
        series: SeriesSpec::Repeated('A', 1, 3),
        tail: TailSpec::Digits(1, 4),
    },
    GrammarRule {
        category: PlateCategory::Standard,
        code: CodeSpec::AnyValid,
        series: SeriesSpec::Letters(1, 3),
        tail: TailSpec::Digits(3, 4),
    },
];

/// Narrow profile: Standard first, Police as fallback
const IMAGE_LEGACY_GRAMMAR: &[GrammarRule] = &[
    GrammarRule {
        category: PlateCategory::Standard,
        code: CodeSpec::AnyValid,
        series: SeriesSpec::Letters(1, 3),
        tail: TailSpec::Digits(3, 4),
    },
    GrammarRule {
        category: PlateCategory::Police,
        code: CodeSpec::AnyValid,
        series: SeriesSpec::Repeated('A', 1, 3),
        tail: TailSpec::Digits(1, 4),
    },
];

/// Classify a normalized text under the given grammar profile
pub fn classify(normalized: &NormalizedText, profile: GrammarProfile) -> ClassificationResult {
    if !normalized.is_local_candidate {
        return foreign(normalized.text.clone());
    }

    let compact: String = normalized
        .text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    for rule in profile.rules() {
        if let Some((code, series, digits)) = match_rule(rule, &compact) {
            let formatted = format!("{} {} {}", code, series, digits);
            return ClassificationResult {
                category: rule.category,
                formatted: Some(formatted.clone()),
                city_code: Some(code.to_string()),
                city_name: city_name(code).map(str::to_string),
                text: formatted,
            };
        }
    }

    // Valid-looking province code but a non-standard layout
    if compact.len() >= 2 {
        let code = &compact[..2];
        if code.bytes().all(|b| b.is_ascii_digit()) && is_valid_city_code(code) {
            return ClassificationResult {
                category: PlateCategory::OtherLocal,
                formatted: None,
                city_code: Some(code.to_string()),
                city_name: city_name(code).map(str::to_string),
                text: normalized.text.clone(),
            };
        }
    }

    // The candidacy flag is advisory only
    foreign(normalized.text.clone())
}

/// Normalize and classify a raw recognized string in one step
pub fn classify_text(raw: &str, profile: GrammarProfile) -> ClassificationResult {
    classify(&normalize(raw), profile)
}

fn foreign(text: String) -> ClassificationResult {
    ClassificationResult {
        category: PlateCategory::Foreign,
        formatted: None,
        city_code: None,
        city_name: None,
        text,
    }
}

/// Try one rule against the compacted text. Returns the (code, series, digits)
/// segments on success. The compacted text is ASCII by construction, so byte
/// slicing is safe here.
fn match_rule<'a>(rule: &GrammarRule, compact: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
    if compact.len() < 2 {
        return None;
    }
    let (code, rest) = compact.split_at(2);
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match rule.code {
        CodeSpec::Diplomatic => {
            if code != "99" {
                return None;
            }
        }
        CodeSpec::AnyValid => {
            if !is_valid_city_code(code) {
                return None;
            }
        }
    }

    let (series, rest) = match rule.series {
        SeriesSpec::OneOf(set) => {
            let matched = set.iter().find(|s| rest.starts_with(**s))?;
            rest.split_at(matched.len())
        }
        SeriesSpec::Repeated(letter, min, max) => {
            let run = rest.chars().take_while(|&c| c == letter).count();
            if run < min || run > max {
                return None;
            }
            rest.split_at(run)
        }
        SeriesSpec::Letters(min, max) => {
            let run = rest.bytes().take_while(|b| b.is_ascii_uppercase()).count();
            if run < min || run > max {
                return None;
            }
            rest.split_at(run)
        }
    };

    let digits = match rule.tail {
        TailSpec::Digits(min, max) => {
            let run = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
            if run < min {
                return None;
            }
            &rest[..run.min(max)]
        }
        TailSpec::Alphanumeric(min, max) => {
            let run = rest.bytes().take_while(|b| b.is_ascii_alphanumeric()).count();
            if run < min {
                return None;
            }
            &rest[..run.min(max)]
        }
    };

    Some((code, series, digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_full(raw: &str) -> ClassificationResult {
        classify_text(raw, GrammarProfile::Full)
    }

    #[test]
    fn test_standard_plate() {
        let result = classify_full("34ABC123");
        assert_eq!(result.category, PlateCategory::Standard);
        assert_eq!(result.formatted.as_deref(), Some("34 ABC 123"));
        assert_eq!(result.city_name.as_deref(), Some("İstanbul"));
    }

    #[test]
    fn test_standard_plate_four_digits() {
        let result = classify_full("06BC4567");
        assert_eq!(result.category, PlateCategory::Standard);
        assert_eq!(result.formatted.as_deref(), Some("06 BC 4567"));
        assert_eq!(result.city_name.as_deref(), Some("Ankara"));
    }

    #[test]
    fn test_diplomatic_plate() {
        let result = classify_full("99CD1234");
        assert_eq!(result.category, PlateCategory::Diplomatic);
        assert_eq!(result.formatted.as_deref(), Some("99 CD 1234"));
        // 99 is not a province code
        assert_eq!(result.city_display(), "Unknown");
    }

    #[test]
    fn test_guest_plate() {
        let result = classify_full("06MA1234");
        assert_eq!(result.category, PlateCategory::Guest);
        assert_eq!(result.formatted.as_deref(), Some("06 MA 1234"));
        assert_eq!(result.city_name.as_deref(), Some("Ankara"));
    }

    #[test]
    fn test_police_plate() {
        let result = classify_full("34A1234");
        assert_eq!(result.category, PlateCategory::Police);
        assert_eq!(result.formatted.as_deref(), Some("34 A 1234"));
    }

    #[test]
    fn test_police_beats_standard() {
        // "34AA123" satisfies both grammars; the A-series rule has precedence
        let result = classify_full("34AA123");
        assert_eq!(result.category, PlateCategory::Police);
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        let result = classify_full("34ABC123XYZ");
        assert_eq!(result.category, PlateCategory::Standard);
        assert_eq!(result.formatted.as_deref(), Some("34 ABC 123"));
    }

    #[test]
    fn test_foreign_plate() {
        let result = classify_full("XYZ999");
        assert_eq!(result.category, PlateCategory::Foreign);
        assert!(result.formatted.is_none());
        assert_eq!(result.text, "XYZ999");
        assert_eq!(result.city_display(), "Unknown");
    }

    #[test]
    fn test_other_local_format() {
        // Valid province code but no grammar matches
        let result = classify_full("34ABCDE");
        assert_eq!(result.category, PlateCategory::OtherLocal);
        assert!(result.formatted.is_none());
        assert_eq!(result.city_name.as_deref(), Some("İstanbul"));
    }

    #[test]
    fn test_corrected_glyphs_with_invalid_code_fall_through() {
        // TR prefix makes it a candidate, correction yields "00" which is not
        // a valid code, so every grammar falls through
        let result = classify_full("TROOABC123");
        assert_eq!(result.category, PlateCategory::Foreign);
    }

    #[test]
    fn test_out_of_range_code() {
        let result = classify_full("82ABC123");
        assert_eq!(result.category, PlateCategory::Foreign);
    }

    #[test]
    fn test_image_legacy_profile_narrows_grammar() {
        // The legacy image grammar has no Guest tier, so the MA series
        // falls into the standard rule instead
        let result = classify_text("06MA1234", GrammarProfile::ImageLegacy);
        assert_eq!(result.category, PlateCategory::Standard);

        let result = classify_text("99CD1234", GrammarProfile::ImageLegacy);
        assert_ne!(result.category, PlateCategory::Diplomatic);
    }

    #[test]
    fn test_formatted_round_trip() {
        for raw in ["34ABC123", "99CD1234", "06MA1234", "34A1234"] {
            let first = classify_full(raw);
            let formatted = first.formatted.clone().unwrap();
            let second = classify_full(&formatted);
            assert_eq!(first.category, second.category, "round-trip of {}", raw);
            assert_eq!(first.formatted, second.formatted);
        }
    }

    #[test]
    fn test_classification_is_total() {
        // Every input maps to exactly one category without panicking
        for raw in ["", " ", "9", "99", "34", "TR", "TR99", "1234567890", "AAAAAA", "34 A"] {
            let _ = classify_full(raw);
        }
    }

    #[test]
    fn test_city_code_bound() {
        // Any result carrying a city name has a code in [1, 81]
        for raw in ["34ABC123", "06MA1234", "81XY123", "99CD1234", "XYZ999"] {
            let result = classify_full(raw);
            if result.city_name.is_some() {
                let code: u32 = result.city_code.as_ref().unwrap().parse().unwrap();
                assert!((1..=81).contains(&code));
            }
        }
    }
}
