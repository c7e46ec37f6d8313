// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Lexical Feature Extractor
// ─────────────────────────────────────────────────────────────────────
//! Derives the two crisp inputs of the fuzzy engine from raw text:
//! - **caps_ratio**: percentage of alphabetic characters that are
//!   uppercase (Unicode semantics, non-letters ignored).
//! - **provocative_score**: trigger-word hits plus punctuation,
//!   clamped to [0, 100].
//!
//! Empty text is a defined zero case, never an error.

use hoax_types::score::{clamp_score, SCORE_MAX, SCORE_MIN};
use hoax_types::{FeatureVector, HoaxConfig, HoaxResult};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Trait for feature producers feeding the inference engine.
///
/// Implementations must return values in [0, 100]; `FeatureVector::new`
/// enforces this.
pub trait FeatureSource: Send + Sync {
    fn extract(&self, text: &str) -> FeatureVector;
}

/// True for general categories Lu, Ll, Lt, Lm and Lo.
///
/// Combining vowel signs (Mn/Mc), letter-like numerals (Nl) and circled
/// letters (So) are not letters here.
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Percentage of letters in `text` that are uppercase.
///
/// Returns 0.0 when `text` contains no letters.
pub fn caps_ratio(text: &str) -> f64 {
    let (letters, upper) = text
        .chars()
        .filter(|&c| is_letter(c))
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });
    if letters == 0 {
        return 0.0;
    }
    100.0 * upper as f64 / letters as f64
}

/// Vocabulary and punctuation scorer.
#[derive(Debug, Clone)]
pub struct LexicalFeatureExtractor {
    /// Lowercased, de-duplicated vocabulary.
    terms: Vec<String>,
    term_weight: f64,
    exclamation_weight: f64,
    question_bonus: f64,
    question_threshold: usize,
}

impl Default for LexicalFeatureExtractor {
    fn default() -> Self {
        Self::build(&HoaxConfig::default())
    }
}

impl LexicalFeatureExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &HoaxConfig) -> HoaxResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &HoaxConfig) -> Self {
        let mut terms: Vec<String> = Vec::with_capacity(config.provocative_terms.len());
        for term in &config.provocative_terms {
            let term = term.trim().to_lowercase();
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        Self {
            terms,
            term_weight: config.term_weight,
            exclamation_weight: config.exclamation_weight,
            question_bonus: config.question_bonus,
            question_threshold: config.question_threshold,
        }
    }

    /// Vocabulary entries found anywhere in `text` (substring match,
    /// case-insensitive). Each entry counts at most once.
    pub fn matched_terms<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let lower = text.to_lowercase();
        self.terms
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Trigger-word and punctuation score in [0, 100].
    pub fn provocative_score(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }

        let hits = self.matched_terms(text).len();
        let exclamations = text.chars().filter(|&c| c == '!').count();
        let questions = text.chars().filter(|&c| c == '?').count();

        let mut score = hits as f64 * self.term_weight;
        score += exclamations as f64 * self.exclamation_weight;
        if questions > self.question_threshold {
            score += self.question_bonus;
        }

        clamp_score(score, SCORE_MIN, SCORE_MAX)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl FeatureSource for LexicalFeatureExtractor {
    fn extract(&self, text: &str) -> FeatureVector {
        let text = text.trim();
        if text.is_empty() {
            return FeatureVector::default();
        }
        FeatureVector::new(caps_ratio(text), self.provocative_score(text))
    }
}

/// External feature source that calls a function pointer.
///
/// Used by the PyO3 FFI layer to let Python supply its own features
/// while inference stays in Rust.
type ExtractFn = Box<dyn Fn(&str) -> (f64, f64) + Send + Sync>;

pub struct ExternalFeatures {
    extract_fn: ExtractFn,
}

impl ExternalFeatures {
    pub fn new(extract_fn: impl Fn(&str) -> (f64, f64) + Send + Sync + 'static) -> Self {
        Self {
            extract_fn: Box::new(extract_fn),
        }
    }
}

impl FeatureSource for ExternalFeatures {
    fn extract(&self, text: &str) -> FeatureVector {
        let (caps, provocative) = (self.extract_fn)(text);
        FeatureVector::new(caps, provocative)
    }
}
