// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Linguistic Variables and Fuzzy Set Names
// ─────────────────────────────────────────────────────────────────────
//! Closed enumerations of the linguistic axes and their fuzzy sets.
//!
//! Rules refer to sets through these variants, so a rule can never name
//! a variable or set that does not exist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Crisp input axes of the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputVariable {
    CapsRatio,
    ProvocativeScore,
}

impl InputVariable {
    pub const ALL: [InputVariable; 2] = [InputVariable::CapsRatio, InputVariable::ProvocativeScore];

    pub fn name(self) -> &'static str {
        match self {
            InputVariable::CapsRatio => "caps_ratio",
            InputVariable::ProvocativeScore => "provocative_score",
        }
    }
}

impl fmt::Display for InputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fuzzy sets partitioning each input axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSet {
    Low,
    Medium,
    High,
}

impl InputSet {
    pub const ALL: [InputSet; 3] = [InputSet::Low, InputSet::Medium, InputSet::High];

    pub fn name(self) -> &'static str {
        match self {
            InputSet::Low => "low",
            InputSet::Medium => "medium",
            InputSet::High => "high",
        }
    }
}

impl fmt::Display for InputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fuzzy sets partitioning the `hoax_likelihood` output axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSet {
    Safe,
    Suspicious,
    Hoax,
}

impl OutputSet {
    pub const ALL: [OutputSet; 3] = [OutputSet::Safe, OutputSet::Suspicious, OutputSet::Hoax];

    /// Stable position of the set, used to index per-set tables.
    pub fn index(self) -> usize {
        match self {
            OutputSet::Safe => 0,
            OutputSet::Suspicious => 1,
            OutputSet::Hoax => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputSet::Safe => "safe",
            OutputSet::Suspicious => "suspicious",
            OutputSet::Hoax => "hoax",
        }
    }
}

impl fmt::Display for OutputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
