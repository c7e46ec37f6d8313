// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Fuzzy Rule Base
// ─────────────────────────────────────────────────────────────────────
//! Rules as a small expression tree over input-set terms.
//!
//! AND is `min`, OR is `max`. Aggregation across rules is a pointwise
//! `max`, so rule order never changes the result.

use std::fmt;

use hoax_types::{InputSet, InputVariable, OutputSet, SetDegrees};

/// Fuzzified inputs: one `SetDegrees` per input variable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fuzzified {
    pub caps_ratio: SetDegrees,
    pub provocative_score: SetDegrees,
}

impl Fuzzified {
    pub fn degree(&self, variable: InputVariable, set: InputSet) -> f64 {
        match variable {
            InputVariable::CapsRatio => self.caps_ratio.degree(set),
            InputVariable::ProvocativeScore => self.provocative_score.degree(set),
        }
    }
}

/// Antecedent expression of a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    Term(InputVariable, InputSet),
    And(Box<Antecedent>, Box<Antecedent>),
    Or(Box<Antecedent>, Box<Antecedent>),
}

impl Antecedent {
    pub fn term(variable: InputVariable, set: InputSet) -> Self {
        Antecedent::Term(variable, set)
    }

    pub fn and(self, other: Antecedent) -> Self {
        Antecedent::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Antecedent) -> Self {
        Antecedent::Or(Box::new(self), Box::new(other))
    }

    /// Firing strength of the expression for the given degrees.
    pub fn evaluate(&self, degrees: &Fuzzified) -> f64 {
        match self {
            Antecedent::Term(variable, set) => degrees.degree(*variable, *set),
            Antecedent::And(lhs, rhs) => lhs.evaluate(degrees).min(rhs.evaluate(degrees)),
            Antecedent::Or(lhs, rhs) => lhs.evaluate(degrees).max(rhs.evaluate(degrees)),
        }
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Antecedent::Term(variable, set) => write!(f, "{variable}.{set}"),
            Antecedent::And(lhs, rhs) => write!(f, "({lhs} AND {rhs})"),
            Antecedent::Or(lhs, rhs) => write!(f, "({lhs} OR {rhs})"),
        }
    }
}

/// `IF antecedent THEN hoax_likelihood IS consequent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Antecedent,
    pub consequent: OutputSet,
}

impl Rule {
    pub fn new(antecedent: Antecedent, consequent: OutputSet) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    pub fn firing_strength(&self, degrees: &Fuzzified) -> f64 {
        self.antecedent.evaluate(degrees)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN hoax_likelihood.{}", self.antecedent, self.consequent)
    }
}

/// The fixed four-rule base.
pub fn standard_rules() -> Vec<Rule> {
    use InputSet::{High, Low, Medium};
    use InputVariable::{CapsRatio, ProvocativeScore};

    vec![
        // Shouting or heavy provocation.
        Rule::new(
            Antecedent::term(CapsRatio, High).or(Antecedent::term(ProvocativeScore, High)),
            OutputSet::Hoax,
        ),
        Rule::new(
            Antecedent::term(CapsRatio, Medium).and(Antecedent::term(ProvocativeScore, Medium)),
            OutputSet::Suspicious,
        ),
        Rule::new(
            Antecedent::term(CapsRatio, Low).and(Antecedent::term(ProvocativeScore, Low)),
            OutputSet::Safe,
        ),
        // Clickbait written in normal case.
        Rule::new(
            Antecedent::term(ProvocativeScore, High).and(Antecedent::term(CapsRatio, Low)),
            OutputSet::Suspicious,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees(caps: (f64, f64, f64), prov: (f64, f64, f64)) -> Fuzzified {
        Fuzzified {
            caps_ratio: SetDegrees {
                low: caps.0,
                medium: caps.1,
                high: caps.2,
            },
            provocative_score: SetDegrees {
                low: prov.0,
                medium: prov.1,
                high: prov.2,
            },
        }
    }

    #[test]
    fn test_term_lookup() {
        let d = degrees((0.1, 0.2, 0.3), (0.4, 0.5, 0.6));
        let t = Antecedent::term(InputVariable::ProvocativeScore, InputSet::Medium);
        assert_eq!(t.evaluate(&d), 0.5);
    }

    #[test]
    fn test_and_is_min_or_is_max() {
        let d = degrees((0.2, 0.0, 0.7), (0.9, 0.0, 0.4));
        let caps_high = Antecedent::term(InputVariable::CapsRatio, InputSet::High);
        let prov_high = Antecedent::term(InputVariable::ProvocativeScore, InputSet::High);
        assert_eq!(caps_high.clone().and(prov_high.clone()).evaluate(&d), 0.4);
        assert_eq!(caps_high.or(prov_high).evaluate(&d), 0.7);
    }

    #[test]
    fn test_nested_expression() {
        let d = degrees((0.3, 0.6, 0.0), (0.8, 0.2, 0.0));
        let expr = Antecedent::term(InputVariable::CapsRatio, InputSet::Low)
            .or(Antecedent::term(InputVariable::CapsRatio, InputSet::Medium))
            .and(Antecedent::term(InputVariable::ProvocativeScore, InputSet::Low));
        // max(0.3, 0.6) = 0.6, min(0.6, 0.8) = 0.6
        assert_eq!(expr.evaluate(&d), 0.6);
    }

    #[test]
    fn test_standard_rule_base_shape() {
        let rules = standard_rules();
        assert_eq!(rules.len(), 4);
        let consequents: Vec<OutputSet> = rules.iter().map(|r| r.consequent).collect();
        assert_eq!(
            consequents,
            vec![
                OutputSet::Hoax,
                OutputSet::Suspicious,
                OutputSet::Safe,
                OutputSet::Suspicious
            ]
        );
    }

    #[test]
    fn test_rule_display() {
        let rules = standard_rules();
        assert_eq!(
            rules[0].to_string(),
            "IF (caps_ratio.high OR provocative_score.high) THEN hoax_likelihood.hoax"
        );
        assert_eq!(
            rules[3].to_string(),
            "IF (provocative_score.high AND caps_ratio.low) THEN hoax_likelihood.suspicious"
        );
    }

    #[test]
    fn test_smart_clickbait_rule_fires() {
        let d = degrees((1.0, 0.0, 0.0), (0.0, 0.0, 0.5));
        let rules = standard_rules();
        assert_eq!(rules[3].firing_strength(&d), 0.5);
        assert_eq!(rules[0].firing_strength(&d), 0.5);
        assert_eq!(rules[2].firing_strength(&d), 0.0);
    }
}
