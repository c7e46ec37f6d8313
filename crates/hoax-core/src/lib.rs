// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Feature extraction and Mamdani fuzzy inference for scoring how
//! likely a news headline is to be a hoax.
//!
//! raw text → `FeatureSource` → `(caps_ratio, provocative_score)`
//! → `FuzzySystem` → `(score, label, optional trace)`
//!
//! # Invariants
//!
//! 1. **Bounded outputs**: every membership degree is in [0, 1] and every
//!    score is in [0, 100]. Inputs outside [0, 100] are clamped, NaN to 0.
//!
//! 2. **No error path at call time**: `extract` and `infer` never fail.
//!    Empty text yields zero features; a rule base that does not fire
//!    yields the fallback score (50, SUSPICIOUS).
//!
//! 3. **Stateless**: configuration is fixed at construction. Identical
//!    inputs give bit-identical outputs, and a `FuzzySystem` may be
//!    shared across threads without locking.

pub mod detector;
pub mod engine;
pub mod features;
pub mod membership;
pub mod rules;

pub use detector::HoaxDetector;
pub use engine::{centroid, FuzzySystem, FuzzySystemBuilder, InputPartition, OutputPartition};
pub use features::{caps_ratio, is_letter, ExternalFeatures, FeatureSource, LexicalFeatureExtractor};
pub use membership::{MembershipFunction, UNIVERSE_SIZE};
pub use rules::{standard_rules, Antecedent, Fuzzified, Rule};
