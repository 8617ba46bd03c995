//! Domain services

pub mod classifier;
pub mod normalizer;

pub use classifier::{classify, classify_text, ClassificationResult, GrammarProfile};
pub use normalizer::{normalize, NormalizedText};
