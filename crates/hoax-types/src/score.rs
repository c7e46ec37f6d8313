// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Feature and Score Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::linguistic::InputSet;

/// Lower bound of every crisp axis.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of every crisp axis.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Crisp features extracted from one text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Percentage of alphabetic characters that are uppercase.
    pub caps_ratio: f64,
    /// Trigger-word and punctuation score.
    pub provocative_score: f64,
}

impl FeatureVector {
    pub fn new(caps_ratio: f64, provocative_score: f64) -> Self {
        Self {
            caps_ratio: clamp_score(caps_ratio, SCORE_MIN, SCORE_MAX),
            provocative_score: clamp_score(provocative_score, SCORE_MIN, SCORE_MAX),
        }
    }
}

/// User-facing verdict derived from the crisp score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoaxLabel {
    Real,
    Suspicious,
    Hoax,
}

impl HoaxLabel {
    /// Label with the default cut points (40 / 70).
    pub fn from_score(score: f64) -> Self {
        Self::classify(score, 40.0, 70.0)
    }

    /// `score < suspicious` is REAL, `score >= hoax` is HOAX, anything
    /// in between is SUSPICIOUS.
    pub fn classify(score: f64, suspicious: f64, hoax: f64) -> Self {
        if score < suspicious {
            HoaxLabel::Real
        } else if score < hoax {
            HoaxLabel::Suspicious
        } else {
            HoaxLabel::Hoax
        }
    }

    /// Banner text shown by the dashboard.
    pub fn display_text(self) -> &'static str {
        match self {
            HoaxLabel::Real => "REAL NEWS (Aman)",
            HoaxLabel::Suspicious => "SUSPICIOUS (Perlu Verifikasi)",
            HoaxLabel::Hoax => "HOAX (Berita Palsu)",
        }
    }

    /// Inverse of `display_text`.
    pub fn from_display_text(text: &str) -> Option<Self> {
        [HoaxLabel::Real, HoaxLabel::Suspicious, HoaxLabel::Hoax]
            .into_iter()
            .find(|label| label.display_text() == text)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HoaxLabel::Real => "REAL",
            HoaxLabel::Suspicious => "SUSPICIOUS",
            HoaxLabel::Hoax => "HOAX",
        }
    }
}

impl fmt::Display for HoaxLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership degrees of one crisp input in the `low/medium/high` sets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SetDegrees {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl SetDegrees {
    pub fn degree(&self, set: InputSet) -> f64 {
        match set {
            InputSet::Low => self.low,
            InputSet::Medium => self.medium,
            InputSet::High => self.high,
        }
    }
}

/// Intermediate values of one inference, for visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipTrace {
    /// Inputs after clamping to [0, 100].
    pub caps_ratio: f64,
    pub provocative_score: f64,
    pub caps_degrees: SetDegrees,
    pub provocative_degrees: SetDegrees,
    /// One firing strength per rule, in rule-base order.
    pub firing_strengths: Vec<f64>,
    /// Aggregated output curve sampled over the universe.
    pub output_aggregate: Vec<f64>,
    /// True when no rule fired and the fallback score was used.
    pub fallback_used: bool,
}

/// Output of the fuzzy inference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Defuzzified hoax likelihood in [0, 100].
    pub score: f64,
    pub label: HoaxLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<MembershipTrace>,
}

/// One fuzzy set sampled over its variable's universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetCurve {
    pub name: String,
    pub degrees: Vec<f64>,
}

/// All fuzzy sets of one linguistic variable, ready to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipCurve {
    pub variable: String,
    pub universe: Vec<f64>,
    pub sets: Vec<SetCurve>,
}

/// Structured result of the full text → verdict pipeline.
///
/// Field names match the tool payload read by the agent layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoaxAssessment {
    pub caps_ratio_percent: f64,
    pub provocative_score_raw: f64,
    pub hoax_likelihood_score: f64,
    /// Dashboard text of the verdict, e.g. `"HOAX (Berita Palsu)"`.
    pub assessment_label: String,
}

impl HoaxAssessment {
    pub fn new(features: FeatureVector, result: &InferenceResult) -> Self {
        Self {
            caps_ratio_percent: features.caps_ratio,
            provocative_score_raw: features.provocative_score,
            hoax_likelihood_score: result.score,
            assessment_label: result.label.display_text().to_string(),
        }
    }

    /// Verdict behind `assessment_label`.
    pub fn label(&self) -> Option<HoaxLabel> {
        HoaxLabel::from_display_text(&self.assessment_label)
    }

    /// Serialize as the JSON object handed to the agent layer.
    pub fn to_json(&self) -> String {
        // Plain numbers and strings only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_score(f64::NAN, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_pos_inf() {
        assert_eq!(clamp_score(f64::INFINITY, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_clamp_neg_inf() {
        assert_eq!(clamp_score(f64::NEG_INFINITY, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_above_hi() {
        assert_eq!(clamp_score(150.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_clamp_below_lo() {
        assert_eq!(clamp_score(-3.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_feature_vector_clamps() {
        let fv = FeatureVector::new(120.0, f64::NAN);
        assert_eq!(fv.caps_ratio, 100.0);
        assert_eq!(fv.provocative_score, 0.0);
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(HoaxLabel::from_score(0.0), HoaxLabel::Real);
        assert_eq!(HoaxLabel::from_score(39.999), HoaxLabel::Real);
        assert_eq!(HoaxLabel::from_score(40.0), HoaxLabel::Suspicious);
        assert_eq!(HoaxLabel::from_score(69.999), HoaxLabel::Suspicious);
        assert_eq!(HoaxLabel::from_score(70.0), HoaxLabel::Hoax);
        assert_eq!(HoaxLabel::from_score(100.0), HoaxLabel::Hoax);
    }

    #[test]
    fn test_label_custom_thresholds() {
        assert_eq!(HoaxLabel::classify(55.0, 30.0, 50.0), HoaxLabel::Hoax);
        assert_eq!(HoaxLabel::classify(35.0, 30.0, 50.0), HoaxLabel::Suspicious);
    }

    #[test]
    fn test_label_text() {
        assert_eq!(HoaxLabel::Real.display_text(), "REAL NEWS (Aman)");
        assert_eq!(HoaxLabel::Hoax.to_string(), "HOAX");
    }

    #[test]
    fn test_label_serde() {
        let json = serde_json::to_string(&HoaxLabel::Suspicious).unwrap();
        assert_eq!(json, "\"SUSPICIOUS\"");
    }

    #[test]
    fn test_set_degrees_lookup() {
        let d = SetDegrees {
            low: 0.1,
            medium: 0.2,
            high: 0.3,
        };
        assert_eq!(d.degree(InputSet::Low), 0.1);
        assert_eq!(d.degree(InputSet::Medium), 0.2);
        assert_eq!(d.degree(InputSet::High), 0.3);
    }

    #[test]
    fn test_assessment_json_fields() {
        let result = InferenceResult {
            score: 84.7,
            label: HoaxLabel::Hoax,
            trace: None,
        };
        let assessment = HoaxAssessment::new(FeatureVector::new(100.0, 60.0), &result);
        let value: serde_json::Value = serde_json::from_str(&assessment.to_json()).unwrap();
        assert_eq!(value["caps_ratio_percent"], 100.0);
        assert_eq!(value["provocative_score_raw"], 60.0);
        assert_eq!(value["hoax_likelihood_score"], 84.7);
        assert_eq!(value["assessment_label"], "HOAX (Berita Palsu)");
        assert_eq!(value.as_object().unwrap().len(), 4);
        assert_eq!(assessment.label(), Some(HoaxLabel::Hoax));
    }

    #[test]
    fn test_label_from_display_text() {
        for label in [HoaxLabel::Real, HoaxLabel::Suspicious, HoaxLabel::Hoax] {
            assert_eq!(HoaxLabel::from_display_text(label.display_text()), Some(label));
        }
        assert_eq!(HoaxLabel::from_display_text("HOAX"), None);
    }

    #[test]
    fn test_inference_result_skips_empty_trace() {
        let result = InferenceResult {
            score: 13.0,
            label: HoaxLabel::Real,
            trace: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("trace"));
    }
}
