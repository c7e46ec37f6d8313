// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Text → Verdict Pipeline
// ─────────────────────────────────────────────────────────────────────
//! `HoaxDetector` chains a `FeatureSource` and a `FuzzySystem`:
//! raw text → (caps_ratio, provocative_score) → (score, label).
//!
//! This is the surface the dashboard and the agent tool call.

use std::sync::Arc;

use hoax_types::{FeatureVector, HoaxAssessment, HoaxConfig, HoaxResult, InferenceResult};

use crate::engine::FuzzySystem;
use crate::features::{FeatureSource, LexicalFeatureExtractor};

/// Full hoax-likelihood pipeline.
///
/// Stateless between calls; safe to share behind an `Arc`.
pub struct HoaxDetector {
    features: Arc<dyn FeatureSource>,
    system: FuzzySystem,
}

impl Default for HoaxDetector {
    fn default() -> Self {
        Self::new(Arc::new(LexicalFeatureExtractor::new()), FuzzySystem::standard())
    }
}

impl HoaxDetector {
    pub fn new(features: Arc<dyn FeatureSource>, system: FuzzySystem) -> Self {
        Self { features, system }
    }

    /// Lexical extractor and standard system, both driven by `config`.
    pub fn from_config(config: HoaxConfig) -> HoaxResult<Self> {
        let features = LexicalFeatureExtractor::from_config(&config)?;
        let system = FuzzySystem::with_config(config)?;
        Ok(Self::new(Arc::new(features), system))
    }

    pub fn extract(&self, text: &str) -> FeatureVector {
        self.features.extract(text)
    }

    pub fn infer(&self, caps_ratio: f64, provocative_score: f64) -> InferenceResult {
        self.system.infer(caps_ratio, provocative_score)
    }

    /// Score a text and return the agent-facing assessment.
    pub fn analyze(&self, text: &str) -> HoaxAssessment {
        let features = self.extract(text);
        let result = self.system.infer(features.caps_ratio, features.provocative_score);
        log::debug!(
            "analyze: caps={:.1} prov={:.1} -> {:.1} {}",
            features.caps_ratio,
            features.provocative_score,
            result.score,
            result.label
        );
        HoaxAssessment::new(features, &result)
    }

    /// Score a text keeping the features and the membership trace, for
    /// the visualization panel.
    pub fn inspect(&self, text: &str) -> (FeatureVector, InferenceResult) {
        let features = self.extract(text);
        let result = self
            .system
            .infer_traced(features.caps_ratio, features.provocative_score);
        (features, result)
    }

    pub fn system(&self) -> &FuzzySystem {
        &self.system
    }
}
