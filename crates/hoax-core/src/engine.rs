// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Mamdani Fuzzy Inference Engine
// ─────────────────────────────────────────────────────────────────────
//! Mamdani inference from `(caps_ratio, provocative_score)` to a crisp
//! hoax likelihood in [0, 100].
//!
//! Pipeline per call:
//!   1. Clamp both inputs to [0, 100] (NaN → 0)
//!   2. Fuzzify each input into `low/medium/high` degrees
//!   3. Evaluate every rule's antecedent (AND = min, OR = max)
//!   4. Clip each consequent curve at its rule's firing strength
//!   5. Aggregate clipped curves by pointwise max over the universe
//!   6. Centroid defuzzification, with a fixed fallback when no rule fired
//!   7. Label the crisp score with the 40 / 70 cut points
//!
//! The system is immutable after construction and holds no per-call
//! state, so one instance can be shared across threads without locking.

use hoax_types::score::{clamp_score, SCORE_MAX, SCORE_MIN};
use hoax_types::{
    HoaxConfig, HoaxError, HoaxLabel, HoaxResult, InferenceResult, InputSet, InputVariable,
    MembershipCurve, MembershipTrace, OutputSet, SetCurve, SetDegrees,
};

use crate::membership::{universe, MembershipFunction, UNIVERSE_SIZE};
use crate::rules::{standard_rules, Fuzzified, Rule};

/// `low/medium/high` partition of an input axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputPartition {
    pub low: MembershipFunction,
    pub medium: MembershipFunction,
    pub high: MembershipFunction,
}

impl InputPartition {
    pub fn new(
        low: MembershipFunction,
        medium: MembershipFunction,
        high: MembershipFunction,
    ) -> Self {
        Self { low, medium, high }
    }

    pub fn get(&self, set: InputSet) -> &MembershipFunction {
        match set {
            InputSet::Low => &self.low,
            InputSet::Medium => &self.medium,
            InputSet::High => &self.high,
        }
    }

    pub fn fuzzify(&self, x: f64) -> SetDegrees {
        SetDegrees {
            low: self.low.degree(x),
            medium: self.medium.degree(x),
            high: self.high.degree(x),
        }
    }
}

/// `safe/suspicious/hoax` partition of the output axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputPartition {
    pub safe: MembershipFunction,
    pub suspicious: MembershipFunction,
    pub hoax: MembershipFunction,
}

impl OutputPartition {
    pub fn new(
        safe: MembershipFunction,
        suspicious: MembershipFunction,
        hoax: MembershipFunction,
    ) -> Self {
        Self {
            safe,
            suspicious,
            hoax,
        }
    }

    pub fn get(&self, set: OutputSet) -> &MembershipFunction {
        match set {
            OutputSet::Safe => &self.safe,
            OutputSet::Suspicious => &self.suspicious,
            OutputSet::Hoax => &self.hoax,
        }
    }
}

/// Standard `caps_ratio` sets: low = tri(0,0,20), medium = tri(10,30,50),
/// high = trap(40,60,100,100).
pub const CAPS_RATIO_SETS: InputPartition = InputPartition {
    low: MembershipFunction::Triangular { a: 0.0, b: 0.0, c: 20.0 },
    medium: MembershipFunction::Triangular { a: 10.0, b: 30.0, c: 50.0 },
    high: MembershipFunction::Trapezoidal { a: 40.0, b: 60.0, c: 100.0, d: 100.0 },
};

/// Standard `provocative_score` sets: low = tri(0,0,30),
/// medium = tri(20,50,80), high = trap(60,80,100,100).
pub const PROVOCATIVE_SCORE_SETS: InputPartition = InputPartition {
    low: MembershipFunction::Triangular { a: 0.0, b: 0.0, c: 30.0 },
    medium: MembershipFunction::Triangular { a: 20.0, b: 50.0, c: 80.0 },
    high: MembershipFunction::Trapezoidal { a: 60.0, b: 80.0, c: 100.0, d: 100.0 },
};

/// Standard `hoax_likelihood` sets: safe = tri(0,0,40),
/// suspicious = tri(30,50,70), hoax = trap(60,80,100,100).
pub const HOAX_LIKELIHOOD_SETS: OutputPartition = OutputPartition {
    safe: MembershipFunction::Triangular { a: 0.0, b: 0.0, c: 40.0 },
    suspicious: MembershipFunction::Triangular { a: 30.0, b: 50.0, c: 70.0 },
    hoax: MembershipFunction::Trapezoidal { a: 60.0, b: 80.0, c: 100.0, d: 100.0 },
};

/// Intermediate values of one inference.
struct Evaluation {
    caps_ratio: f64,
    provocative_score: f64,
    degrees: Fuzzified,
    firing_strengths: Vec<f64>,
    aggregate: Vec<f64>,
}

/// Immutable Mamdani inference system.
#[derive(Debug, Clone)]
pub struct FuzzySystem {
    config: HoaxConfig,
    caps_ratio: InputPartition,
    provocative_score: InputPartition,
    hoax_likelihood: OutputPartition,
    rules: Vec<Rule>,
    /// Consequent curves sampled over the universe, indexed by `OutputSet::index()`.
    output_curves: [Vec<f64>; 3],
}

impl Default for FuzzySystem {
    fn default() -> Self {
        Self::standard()
    }
}

impl FuzzySystem {
    /// The fixed hoax-likelihood system with default configuration.
    pub fn standard() -> Self {
        Self::assemble(
            HoaxConfig::default(),
            CAPS_RATIO_SETS,
            PROVOCATIVE_SCORE_SETS,
            HOAX_LIKELIHOOD_SETS,
            standard_rules(),
        )
    }

    /// The fixed system with custom label thresholds and fallback score.
    pub fn with_config(config: HoaxConfig) -> HoaxResult<Self> {
        config.validate()?;
        Ok(Self::assemble(
            config,
            CAPS_RATIO_SETS,
            PROVOCATIVE_SCORE_SETS,
            HOAX_LIKELIHOOD_SETS,
            standard_rules(),
        ))
    }

    pub fn builder() -> FuzzySystemBuilder {
        FuzzySystemBuilder::default()
    }

    fn assemble(
        config: HoaxConfig,
        caps_ratio: InputPartition,
        provocative_score: InputPartition,
        hoax_likelihood: OutputPartition,
        rules: Vec<Rule>,
    ) -> Self {
        let output_curves = OutputSet::ALL.map(|set| hoax_likelihood.get(set).sample());
        Self {
            config,
            caps_ratio,
            provocative_score,
            hoax_likelihood,
            rules,
            output_curves,
        }
    }

    /// Score a feature pair. Never fails: a degenerate aggregate yields
    /// the configured fallback score.
    pub fn infer(&self, caps_ratio: f64, provocative_score: f64) -> InferenceResult {
        self.run(caps_ratio, provocative_score, false)
    }

    /// Like `infer`, with the full membership trace attached.
    pub fn infer_traced(&self, caps_ratio: f64, provocative_score: f64) -> InferenceResult {
        self.run(caps_ratio, provocative_score, true)
    }

    /// Strict variant of `infer` that reports a degenerate aggregate
    /// instead of substituting the fallback.
    pub fn try_infer(&self, caps_ratio: f64, provocative_score: f64) -> HoaxResult<InferenceResult> {
        let eval = self.evaluate(caps_ratio, provocative_score);
        let score = centroid(&eval.aggregate)?;
        Ok(InferenceResult {
            score,
            label: self.label(score),
            trace: None,
        })
    }

    fn run(&self, caps_ratio: f64, provocative_score: f64, traced: bool) -> InferenceResult {
        let eval = self.evaluate(caps_ratio, provocative_score);
        let (score, fallback_used) = match centroid(&eval.aggregate) {
            Ok(score) => (score, false),
            Err(e) => {
                log::warn!(
                    "{e} at caps_ratio={:.4}, provocative_score={:.4}; using fallback {}",
                    eval.caps_ratio,
                    eval.provocative_score,
                    self.config.fallback_score
                );
                (self.config.fallback_score, true)
            }
        };

        let trace = traced.then(|| MembershipTrace {
            caps_ratio: eval.caps_ratio,
            provocative_score: eval.provocative_score,
            caps_degrees: eval.degrees.caps_ratio,
            provocative_degrees: eval.degrees.provocative_score,
            firing_strengths: eval.firing_strengths,
            output_aggregate: eval.aggregate,
            fallback_used,
        });

        InferenceResult {
            score,
            label: self.label(score),
            trace,
        }
    }

    fn evaluate(&self, caps_ratio: f64, provocative_score: f64) -> Evaluation {
        let caps_ratio = clamp_score(caps_ratio, SCORE_MIN, SCORE_MAX);
        let provocative_score = clamp_score(provocative_score, SCORE_MIN, SCORE_MAX);

        let degrees = Fuzzified {
            caps_ratio: self.caps_ratio.fuzzify(caps_ratio),
            provocative_score: self.provocative_score.fuzzify(provocative_score),
        };

        let firing_strengths: Vec<f64> = self
            .rules
            .iter()
            .map(|rule| rule.firing_strength(&degrees))
            .collect();
        log::debug!("firing strengths {firing_strengths:?}");

        let mut aggregate = vec![0.0_f64; UNIVERSE_SIZE];
        for (rule, &strength) in self.rules.iter().zip(&firing_strengths) {
            if strength <= 0.0 {
                continue;
            }
            let curve = &self.output_curves[rule.consequent.index()];
            for (acc, &mu) in aggregate.iter_mut().zip(curve) {
                *acc = acc.max(strength.min(mu));
            }
        }

        Evaluation {
            caps_ratio,
            provocative_score,
            degrees,
            firing_strengths,
            aggregate,
        }
    }

    fn label(&self, score: f64) -> HoaxLabel {
        HoaxLabel::classify(
            score,
            self.config.suspicious_threshold,
            self.config.hoax_threshold,
        )
    }

    /// Every fuzzy set of every variable sampled over the universe, in the
    /// order `caps_ratio`, `provocative_score`, `hoax_likelihood`.
    pub fn curves(&self) -> Vec<MembershipCurve> {
        let axis: Vec<f64> = universe().collect();
        let mut curves: Vec<MembershipCurve> = InputVariable::ALL
            .iter()
            .map(|&variable| MembershipCurve {
                variable: variable.name().to_string(),
                universe: axis.clone(),
                sets: InputSet::ALL
                    .iter()
                    .map(|&set| SetCurve {
                        name: set.name().to_string(),
                        degrees: self.input_partition(variable).get(set).sample(),
                    })
                    .collect(),
            })
            .collect();

        curves.push(MembershipCurve {
            variable: "hoax_likelihood".to_string(),
            universe: axis,
            sets: OutputSet::ALL
                .iter()
                .map(|&set| SetCurve {
                    name: set.name().to_string(),
                    degrees: self.hoax_likelihood.get(set).sample(),
                })
                .collect(),
        });
        curves
    }

    fn input_partition(&self, variable: InputVariable) -> &InputPartition {
        match variable {
            InputVariable::CapsRatio => &self.caps_ratio,
            InputVariable::ProvocativeScore => &self.provocative_score,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Read-only access to config.
    pub fn config(&self) -> &HoaxConfig {
        &self.config
    }
}

/// Center of gravity of a curve sampled at `x = 0, 1, ..., 100`.
pub fn centroid(aggregate: &[f64]) -> HoaxResult<f64> {
    let (weighted, total) = aggregate
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (x, &mu)| (num + x as f64 * mu, den + mu));

    if total <= 0.0 {
        return Err(HoaxError::DegenerateAggregate);
    }
    let score = weighted / total;
    if !score.is_finite() {
        return Err(HoaxError::Numerical(format!(
            "centroid is not finite ({weighted} / {total})"
        )));
    }
    Ok(score.clamp(SCORE_MIN, SCORE_MAX))
}

/// Assembles a custom `FuzzySystem`. Unset partitions default to the
/// standard sets.
#[derive(Debug, Clone, Default)]
pub struct FuzzySystemBuilder {
    config: Option<HoaxConfig>,
    caps_ratio: Option<InputPartition>,
    provocative_score: Option<InputPartition>,
    hoax_likelihood: Option<OutputPartition>,
    rules: Vec<Rule>,
}

impl FuzzySystemBuilder {
    pub fn config(mut self, config: HoaxConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn caps_ratio(mut self, partition: InputPartition) -> Self {
        self.caps_ratio = Some(partition);
        self
    }

    pub fn provocative_score(mut self, partition: InputPartition) -> Self {
        self.provocative_score = Some(partition);
        self
    }

    pub fn hoax_likelihood(mut self, partition: OutputPartition) -> Self {
        self.hoax_likelihood = Some(partition);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> HoaxResult<FuzzySystem> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        if self.rules.is_empty() {
            return Err(HoaxError::Validation(
                "rule base must contain at least one rule".to_string(),
            ));
        }
        Ok(FuzzySystem::assemble(
            config,
            self.caps_ratio.unwrap_or(CAPS_RATIO_SETS),
            self.provocative_score.unwrap_or(PROVOCATIVE_SCORE_SETS),
            self.hoax_likelihood.unwrap_or(HOAX_LIKELIHOOD_SETS),
            self.rules,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Antecedent;

    fn system() -> FuzzySystem {
        FuzzySystem::standard()
    }

    #[test]
    fn test_all_quiet_is_real() {
        // Only rule 3 fires at full strength: centroid of tri(0,0,40) = 13.
        let result = system().infer_traced(0.0, 0.0);
        assert!((result.score - 13.0).abs() < 1e-9);
        assert_eq!(result.label, HoaxLabel::Real);
        let trace = result.trace.unwrap();
        assert_eq!(trace.firing_strengths, vec![0.0, 0.0, 1.0, 0.0]);
        assert!(!trace.fallback_used);
    }

    #[test]
    fn test_shouting_headline_is_hoax() {
        // Rule 1 at full strength: centroid of trap(60,80,100,100) = 2583.5 / 30.5.
        let result = system().infer_traced(100.0, 60.0);
        assert!((result.score - 2583.5 / 30.5).abs() < 1e-9);
        assert!(result.score >= 70.0);
        assert_eq!(result.label, HoaxLabel::Hoax);
        let trace = result.trace.unwrap();
        assert_eq!(trace.firing_strengths[0], 1.0);
        assert_eq!(trace.caps_degrees.high, 1.0);
        assert!((trace.provocative_degrees.medium - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_title_case_headline_is_real() {
        let caps = 500.0 / 31.0;
        let result = system().infer_traced(caps, 0.0);
        let trace = result.trace.clone().unwrap();
        assert!((trace.firing_strengths[2] - 6.0 / 31.0).abs() < 1e-9);
        assert!(result.score < 40.0);
        assert!((result.score - 17.8766499772417).abs() < 1e-6);
        assert_eq!(result.label, HoaxLabel::Real);
    }

    #[test]
    fn test_smart_clickbait() {
        // Rule 1 and rule 4 both fire at 1.0 when provocation is maximal.
        let result = system().infer_traced(0.0, 100.0);
        let trace = result.trace.clone().unwrap();
        assert_eq!(trace.firing_strengths, vec![1.0, 0.0, 0.0, 1.0]);
        assert!((result.score - 71.11167512690355).abs() < 1e-6);
        assert_eq!(result.label, HoaxLabel::Hoax);
    }

    #[test]
    fn test_medium_medium_is_suspicious() {
        let result = system().infer(30.0, 50.0);
        assert!((result.score - 50.0).abs() < 1e-9);
        assert_eq!(result.label, HoaxLabel::Suspicious);
    }

    #[test]
    fn test_no_rule_fires_uses_fallback() {
        // caps=40 sits between low and high; prov=0 has no medium/high degree.
        let result = system().infer_traced(40.0, 0.0);
        assert_eq!(result.score, 50.0);
        assert_eq!(result.label, HoaxLabel::Suspicious);
        let trace = result.trace.unwrap();
        assert!(trace.fallback_used);
        assert!(trace.firing_strengths.iter().all(|&s| s == 0.0));
        assert!(trace.output_aggregate.iter().all(|&mu| mu == 0.0));
    }

    #[test]
    fn test_gap_between_low_and_medium_provocation() {
        let result = system().infer(0.0, 45.0);
        assert_eq!(result.score, 50.0);
        assert_eq!(result.label, HoaxLabel::Suspicious);
    }

    #[test]
    fn test_try_infer_reports_degenerate() {
        let err = system().try_infer(40.0, 0.0).unwrap_err();
        assert_eq!(err, HoaxError::DegenerateAggregate);
        let ok = system().try_infer(0.0, 0.0).unwrap();
        assert!((ok.score - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_above_range() {
        let sys = system();
        assert_eq!(sys.infer(150.0, 0.0), sys.infer(100.0, 0.0));
        assert_eq!(sys.infer(20.0, 1e6), sys.infer(20.0, 100.0));
    }

    #[test]
    fn test_clamp_below_range() {
        let sys = system();
        assert_eq!(sys.infer(-5.0, -1.0), sys.infer(0.0, 0.0));
    }

    #[test]
    fn test_non_finite_inputs() {
        let sys = system();
        assert_eq!(sys.infer(f64::NAN, 0.0), sys.infer(0.0, 0.0));
        assert_eq!(sys.infer(f64::INFINITY, 0.0), sys.infer(100.0, 0.0));
    }

    #[test]
    fn test_idempotent() {
        let sys = system();
        let a = sys.infer_traced(33.3, 71.7);
        let b = sys.infer_traced(33.3, 71.7);
        assert_eq!(a.score.to_bits(), b.score.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_and_label_over_grid() {
        let sys = system();
        for caps in (0..=100).step_by(5) {
            for prov in (0..=100).step_by(5) {
                let r = sys.infer_traced(caps as f64, prov as f64);
                assert!((0.0..=100.0).contains(&r.score), "score {} out of range", r.score);
                assert_eq!(r.label, HoaxLabel::from_score(r.score));
                let trace = r.trace.unwrap();
                for d in [trace.caps_degrees, trace.provocative_degrees] {
                    for v in [d.low, d.medium, d.high] {
                        assert!((0.0..=1.0).contains(&v));
                    }
                }
                assert_eq!(trace.output_aggregate.len(), UNIVERSE_SIZE);
                assert!(trace.output_aggregate.iter().all(|mu| (0.0..=1.0).contains(mu)));
            }
        }
    }

    #[test]
    fn test_rule_order_does_not_matter() {
        let mut reversed = standard_rules();
        reversed.reverse();
        let custom = FuzzySystem::builder().rules(reversed).build().unwrap();
        let sys = system();
        for (caps, prov) in [(0.0, 0.0), (100.0, 60.0), (25.0, 45.0), (5.0, 85.0)] {
            assert_eq!(custom.infer(caps, prov).score, sys.infer(caps, prov).score);
        }
    }

    #[test]
    fn test_builder_requires_rules() {
        let err = FuzzySystem::builder().build().unwrap_err();
        assert!(matches!(err, HoaxError::Validation(_)));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = HoaxConfig {
            fallback_score: 150.0,
            ..Default::default()
        };
        let result = FuzzySystem::builder()
            .config(config)
            .rules(standard_rules())
            .build();
        assert!(matches!(result, Err(HoaxError::Config(_))));
    }

    #[test]
    fn test_builder_custom_single_rule() {
        let sys = FuzzySystem::builder()
            .rule(Rule::new(
                Antecedent::term(InputVariable::CapsRatio, InputSet::Low),
                OutputSet::Safe,
            ))
            .build()
            .unwrap();
        assert!((sys.infer(0.0, 100.0).score - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_config_thresholds() {
        let config = HoaxConfig {
            suspicious_threshold: 10.0,
            hoax_threshold: 20.0,
            fallback_score: 0.0,
            ..Default::default()
        };
        let sys = FuzzySystem::with_config(config).unwrap();
        assert_eq!(sys.infer(0.0, 0.0).label, HoaxLabel::Suspicious);
        let fallback = sys.infer(40.0, 0.0);
        assert_eq!(fallback.score, 0.0);
        assert_eq!(fallback.label, HoaxLabel::Real);
    }

    #[test]
    fn test_centroid_formula() {
        let mut curve = vec![0.0_f64; UNIVERSE_SIZE];
        curve[20] = 1.0;
        curve[40] = 1.0;
        assert!((centroid(&curve).unwrap() - 30.0).abs() < 1e-9);
        assert_eq!(
            centroid(&[0.0_f64; UNIVERSE_SIZE]).unwrap_err(),
            HoaxError::DegenerateAggregate
        );
    }

    #[test]
    fn test_curves_layout() {
        let curves = system().curves();
        let names: Vec<&str> = curves.iter().map(|c| c.variable.as_str()).collect();
        assert_eq!(names, vec!["caps_ratio", "provocative_score", "hoax_likelihood"]);
        for curve in &curves {
            assert_eq!(curve.universe.len(), UNIVERSE_SIZE);
            assert_eq!(curve.sets.len(), 3);
            for set in &curve.sets {
                assert_eq!(set.degrees.len(), UNIVERSE_SIZE);
            }
        }
        assert_eq!(curves[0].sets[0].name, "low");
        assert_eq!(curves[0].sets[0].degrees[0], 1.0);
        assert_eq!(curves[2].sets[2].name, "hoax");
        assert_eq!(curves[2].sets[2].degrees[100], 1.0);
    }

    #[test]
    fn test_curves_follow_builder_partitions() {
        let caps = InputPartition::new(
            MembershipFunction::triangular(0.0, 0.0, 50.0).unwrap(),
            MembershipFunction::triangular(25.0, 50.0, 75.0).unwrap(),
            MembershipFunction::trapezoidal(50.0, 100.0, 100.0, 100.0).unwrap(),
        );
        let sys = FuzzySystem::builder()
            .caps_ratio(caps)
            .rules(standard_rules())
            .build()
            .unwrap();
        let curves = sys.curves();
        assert!((curves[0].sets[0].degrees[25] - 0.5).abs() < 1e-9);
        // provocative_score keeps the standard sets.
        assert_eq!(curves[1].sets[0].degrees[0], 1.0);
        assert_eq!(curves[1].sets[0].degrees[30], 0.0);
    }

    #[test]
    fn test_full_rule_reproduces_output_curve() {
        // Rule 1 fires at 1.0, so the aggregate is exactly the hoax set.
        let sys = system();
        let trace = sys.infer_traced(100.0, 60.0).trace.unwrap();
        let curves = sys.curves();
        assert_eq!(trace.output_aggregate, curves[2].sets[2].degrees);
    }

    #[test]
    fn test_shared_across_threads() {
        let sys = std::sync::Arc::new(system());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sys = sys.clone();
                std::thread::spawn(move || sys.infer(i as f64 * 25.0, 60.0).score)
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let score = h.join().unwrap();
            assert_eq!(score, sys.infer(i as f64 * 25.0, 60.0).score);
        }
    }
}
