// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{HoaxError, HoaxResult};

/// Trigger words commonly found in clickbait and hoax headlines.
pub const DEFAULT_PROVOCATIVE_TERMS: [&str; 14] = [
    "viral",
    "heboh",
    "gemparkan",
    "menjerit",
    "awas",
    "terbongkar",
    "ternyata",
    "mengejutkan",
    "ngeri",
    "sadis",
    "azab",
    "subhanallah",
    "konspirasi",
    "diam-diam",
];

/// Runtime configuration for the Hoax Kernel.
///
/// Holds the crisp constants of feature extraction and labeling. The
/// membership functions and rule base are not configurable here; they
/// are fixed by `FuzzySystem::standard()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoaxConfig {
    /// Vocabulary matched as lowercase substrings of the input text.
    pub provocative_terms: Vec<String>,

    /// Added once per distinct vocabulary entry found in the text.
    /// Default: 20.
    pub term_weight: f64,

    /// Added per `'!'` character.
    /// Default: 10.
    pub exclamation_weight: f64,

    /// Flat bonus when the `'?'` count exceeds `question_threshold`.
    /// Default: 10.
    pub question_bonus: f64,

    /// Default: 1 (so exactly one question mark adds nothing).
    pub question_threshold: usize,

    /// Scores at or above this are labeled SUSPICIOUS.
    /// Default: 40.
    pub suspicious_threshold: f64,

    /// Scores at or above this are labeled HOAX.
    /// Default: 70.
    pub hoax_threshold: f64,

    /// Score reported when no rule fires.
    /// Default: 50.
    pub fallback_score: f64,
}

impl Default for HoaxConfig {
    fn default() -> Self {
        Self {
            provocative_terms: DEFAULT_PROVOCATIVE_TERMS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            term_weight: 20.0,
            exclamation_weight: 10.0,
            question_bonus: 10.0,
            question_threshold: 1,
            suspicious_threshold: 40.0,
            hoax_threshold: 70.0,
            fallback_score: 50.0,
        }
    }
}

impl HoaxConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> HoaxResult<()> {
        for (name, value) in [
            ("term_weight", self.term_weight),
            ("exclamation_weight", self.exclamation_weight),
            ("question_bonus", self.question_bonus),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HoaxError::Config(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("suspicious_threshold", self.suspicious_threshold),
            ("hoax_threshold", self.hoax_threshold),
            ("fallback_score", self.fallback_score),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(HoaxError::Config(format!(
                    "{name} must be in [0, 100], got {value}"
                )));
            }
        }
        if self.suspicious_threshold >= self.hoax_threshold {
            return Err(HoaxError::Config(format!(
                "suspicious_threshold must be < hoax_threshold, got {} >= {}",
                self.suspicious_threshold, self.hoax_threshold
            )));
        }
        if let Some(pos) = self
            .provocative_terms
            .iter()
            .position(|t| t.trim().is_empty())
        {
            return Err(HoaxError::Config(format!(
                "provocative_terms[{pos}] is empty"
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> HoaxResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HoaxError::Config(format!("JSON parse error: {e}")))
    }
}
