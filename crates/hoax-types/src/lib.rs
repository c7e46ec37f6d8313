// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Shared Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Hoax Kernel — the fuzzy hoax-likelihood scorer for news headlines.

pub mod config;
pub mod error;
pub mod linguistic;
pub mod score;

pub use config::HoaxConfig;
pub use error::{HoaxError, HoaxResult};
pub use linguistic::{InputSet, InputVariable, OutputSet};
pub use score::{
    FeatureVector, HoaxAssessment, HoaxLabel, InferenceResult, MembershipCurve,
    MembershipTrace, SetCurve, SetDegrees,
};
