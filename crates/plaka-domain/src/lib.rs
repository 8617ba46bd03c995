//! Domain layer: plate text normalization and grammar classification

pub mod constants;
pub mod service;

pub use constants::cities::{city_name, is_valid_city_code};
pub use service::classifier::{classify, classify_text, ClassificationResult, GrammarProfile};
pub use service::normalizer::{normalize, NormalizedText};
