// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Rust Hoax Kernel.
//!
//! Exposes `extract`, `infer`, `analyze`, `RustFuzzySystem`,
//! `RustFeatureExtractor`, `RustHoaxDetector`, and supporting types to
//! the dashboard and agent layers via PyO3.
//!
//! # FFI Safety
//!
//! - GIL acquired via `Python::with_gil` before every Python callback.
//! - Python exceptions in a feature callback → zero features.
//! - All config validated before storage (`HoaxConfig::validate()`).
//!
//! Install: `pip install -e crates/hoax-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from hoax_kernel import extract, infer, RustFuzzySystem
//!
//! caps, prov = extract("VIRAL!! BABI NGEPET TERTANGKAP DI DEPOK!!")
//! result = infer(caps, prov)
//! print(f"{result.score:.1f}% -> {result.label_text}")
//! ```

use std::sync::{Arc, OnceLock};

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use hoax_core::{
    ExternalFeatures, FeatureSource, FuzzySystem, HoaxDetector, LexicalFeatureExtractor,
};
use hoax_types::{
    HoaxAssessment, HoaxConfig, InferenceResult, MembershipCurve, MembershipTrace, SetDegrees,
};

/// Shared default pipeline behind the module-level functions.
fn default_detector() -> &'static HoaxDetector {
    static DETECTOR: OnceLock<HoaxDetector> = OnceLock::new();
    DETECTOR.get_or_init(HoaxDetector::default)
}

fn degrees_dict<'py>(py: Python<'py>, degrees: &SetDegrees) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("low", degrees.low)?;
    dict.set_item("medium", degrees.medium)?;
    dict.set_item("high", degrees.high)?;
    Ok(dict)
}

fn trace_dict<'py>(py: Python<'py>, trace: &MembershipTrace) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("caps_ratio", trace.caps_ratio)?;
    dict.set_item("provocative_score", trace.provocative_score)?;
    dict.set_item("caps_degrees", degrees_dict(py, &trace.caps_degrees)?)?;
    dict.set_item(
        "provocative_degrees",
        degrees_dict(py, &trace.provocative_degrees)?,
    )?;
    dict.set_item("firing_strengths", trace.firing_strengths.clone())?;
    dict.set_item("output_aggregate", trace.output_aggregate.clone())?;
    dict.set_item("fallback_used", trace.fallback_used)?;
    Ok(dict)
}

fn curve_dict<'py>(py: Python<'py>, curve: &MembershipCurve) -> PyResult<Bound<'py, PyDict>> {
    let sets = PyDict::new(py);
    for set in &curve.sets {
        sets.set_item(set.name.as_str(), set.degrees.clone())?;
    }
    let dict = PyDict::new(py);
    dict.set_item("variable", curve.variable.as_str())?;
    dict.set_item("universe", curve.universe.clone())?;
    dict.set_item("sets", sets)?;
    Ok(dict)
}

// ─── PyHoaxConfig ───────────────────────────────────────────────────

/// Python-visible configuration for the Hoax Kernel.
#[pyclass(name = "HoaxConfig")]
#[derive(Clone)]
struct PyHoaxConfig {
    inner: HoaxConfig,
}

#[pymethods]
impl PyHoaxConfig {
    #[new]
    #[pyo3(signature = (
        provocative_terms = None,
        term_weight = 20.0,
        exclamation_weight = 10.0,
        question_bonus = 10.0,
        question_threshold = 1,
        suspicious_threshold = 40.0,
        hoax_threshold = 70.0,
        fallback_score = 50.0,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        provocative_terms: Option<Vec<String>>,
        term_weight: f64,
        exclamation_weight: f64,
        question_bonus: f64,
        question_threshold: usize,
        suspicious_threshold: f64,
        hoax_threshold: f64,
        fallback_score: f64,
    ) -> PyResult<Self> {
        let config = HoaxConfig {
            provocative_terms: provocative_terms
                .unwrap_or_else(|| HoaxConfig::default().provocative_terms),
            term_weight,
            exclamation_weight,
            question_bonus,
            question_threshold,
            suspicious_threshold,
            hoax_threshold,
            fallback_score,
        };
        config
            .validate()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config =
            HoaxConfig::from_json(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        config
            .validate()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn provocative_terms(&self) -> Vec<String> {
        self.inner.provocative_terms.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "HoaxConfig(terms={}, suspicious_threshold={}, hoax_threshold={})",
            self.inner.provocative_terms.len(),
            self.inner.suspicious_threshold,
            self.inner.hoax_threshold
        )
    }
}

// ─── PyInferenceResult ──────────────────────────────────────────────

/// Python-visible inference result.
#[pyclass(name = "InferenceResult")]
#[derive(Clone)]
struct PyInferenceResult {
    inner: InferenceResult,
}

#[pymethods]
impl PyInferenceResult {
    #[getter]
    fn score(&self) -> f64 {
        self.inner.score
    }

    /// "REAL", "SUSPICIOUS" or "HOAX".
    #[getter]
    fn label(&self) -> &'static str {
        self.inner.label.as_str()
    }

    /// Dashboard banner text, e.g. "HOAX (Berita Palsu)".
    #[getter]
    fn label_text(&self) -> &'static str {
        self.inner.label.display_text()
    }

    /// Membership trace as a dict, or None when not traced.
    fn trace<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyDict>>> {
        self.inner
            .trace
            .as_ref()
            .map(|t| trace_dict(py, t))
            .transpose()
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("score", self.inner.score)?;
        dict.set_item("label", self.inner.label.as_str())?;
        dict.set_item("label_text", self.inner.label.display_text())?;
        if let Some(trace) = &self.inner.trace {
            dict.set_item("trace", trace_dict(py, trace)?)?;
        }
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "InferenceResult(score={:.1}, label={})",
            self.inner.score, self.inner.label
        )
    }
}

// ─── PyHoaxAssessment ───────────────────────────────────────────────

/// Agent-facing assessment of one text.
#[pyclass(name = "HoaxAssessment")]
#[derive(Clone)]
struct PyHoaxAssessment {
    inner: HoaxAssessment,
}

#[pymethods]
impl PyHoaxAssessment {
    #[getter]
    fn caps_ratio_percent(&self) -> f64 {
        self.inner.caps_ratio_percent
    }

    #[getter]
    fn provocative_score_raw(&self) -> f64 {
        self.inner.provocative_score_raw
    }

    #[getter]
    fn hoax_likelihood_score(&self) -> f64 {
        self.inner.hoax_likelihood_score
    }

    #[getter]
    fn assessment_label(&self) -> &str {
        &self.inner.assessment_label
    }

    fn to_json(&self) -> String {
        self.inner.to_json()
    }

    /// Same payload as `to_json`, decoded into a dict.
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let json = PyModule::import(py, "json")?;
        let dict = json
            .call_method1("loads", (self.inner.to_json(),))?
            .downcast_into::<PyDict>()?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "HoaxAssessment(score={:.1}, label={})",
            self.inner.hoax_likelihood_score, self.inner.assessment_label
        )
    }
}

// ─── RustFeatureExtractor ───────────────────────────────────────────

/// Lexical feature extractor exposed to Python.
#[pyclass(name = "RustFeatureExtractor")]
struct PyFeatureExtractor {
    inner: LexicalFeatureExtractor,
}

#[pymethods]
impl PyFeatureExtractor {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyHoaxConfig>) -> PyResult<Self> {
        let inner = match config {
            Some(c) => LexicalFeatureExtractor::from_config(&c.inner)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => LexicalFeatureExtractor::new(),
        };
        Ok(Self { inner })
    }

    /// Returns: tuple(caps_ratio: float, provocative_score: float)
    fn extract(&self, text: &str) -> (f64, f64) {
        let fv = self.inner.extract(text);
        (fv.caps_ratio, fv.provocative_score)
    }

    fn matched_terms(&self, text: &str) -> Vec<String> {
        self.inner
            .matched_terms(text)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

// ─── RustFuzzySystem ────────────────────────────────────────────────

/// Mamdani inference system exposed to Python.
#[pyclass(name = "RustFuzzySystem")]
struct PyFuzzySystem {
    inner: FuzzySystem,
}

#[pymethods]
impl PyFuzzySystem {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyHoaxConfig>) -> PyResult<Self> {
        let inner = match config {
            Some(c) => FuzzySystem::with_config(c.inner)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => FuzzySystem::standard(),
        };
        Ok(Self { inner })
    }

    fn infer(&self, caps_ratio: f64, provocative_score: f64) -> PyInferenceResult {
        PyInferenceResult {
            inner: self.inner.infer(caps_ratio, provocative_score),
        }
    }

    fn infer_traced(&self, caps_ratio: f64, provocative_score: f64) -> PyInferenceResult {
        PyInferenceResult {
            inner: self.inner.infer_traced(caps_ratio, provocative_score),
        }
    }

    /// Membership curves of every variable, for plotting.
    fn curves<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        self.inner
            .curves()
            .iter()
            .map(|c| curve_dict(py, c))
            .collect()
    }

    /// Rule base rendered as text, in evaluation order.
    fn rules(&self) -> Vec<String> {
        self.inner.rules().iter().map(|r| r.to_string()).collect()
    }
}

// ─── RustHoaxDetector ───────────────────────────────────────────────

/// Full text → verdict pipeline exposed to Python.
#[pyclass(name = "RustHoaxDetector")]
struct PyHoaxDetector {
    inner: HoaxDetector,
}

#[pymethods]
impl PyHoaxDetector {
    /// Create a new detector.
    ///
    /// Args:
    ///     config: Optional HoaxConfig (uses defaults if None).
    ///     feature_callback: Optional Callable[[str], tuple[float, float]]
    ///                       replacing the lexical extractor.
    #[new]
    #[pyo3(signature = (config = None, feature_callback = None))]
    fn new(config: Option<PyHoaxConfig>, feature_callback: Option<PyObject>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();

        let features: Arc<dyn FeatureSource> = match feature_callback {
            Some(cb) => Arc::new(ExternalFeatures::new(move |text: &str| {
                Python::with_gil(|py| match cb.call1(py, (text,)) {
                    Ok(result) => result.extract::<(f64, f64)>(py).unwrap_or((0.0, 0.0)),
                    Err(e) => {
                        log::warn!("feature callback raised: {e}");
                        (0.0, 0.0)
                    }
                })
            })),
            None => Arc::new(
                LexicalFeatureExtractor::from_config(&cfg)
                    .map_err(|e| PyValueError::new_err(e.to_string()))?,
            ),
        };
        let system =
            FuzzySystem::with_config(cfg).map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(Self {
            inner: HoaxDetector::new(features, system),
        })
    }

    fn extract(&self, text: &str) -> (f64, f64) {
        let fv = self.inner.extract(text);
        (fv.caps_ratio, fv.provocative_score)
    }

    fn analyze(&self, text: &str) -> PyHoaxAssessment {
        PyHoaxAssessment {
            inner: self.inner.analyze(text),
        }
    }

    /// Returns: tuple(caps_ratio, provocative_score, InferenceResult with trace)
    fn inspect(&self, text: &str) -> (f64, f64, PyInferenceResult) {
        let (fv, result) = self.inner.inspect(text);
        (
            fv.caps_ratio,
            fv.provocative_score,
            PyInferenceResult { inner: result },
        )
    }
}

// ─── Module-level functions ─────────────────────────────────────────

/// Returns: tuple(caps_ratio: float, provocative_score: float)
#[pyfunction]
fn extract(text: &str) -> (f64, f64) {
    let fv = default_detector().extract(text);
    (fv.caps_ratio, fv.provocative_score)
}

#[pyfunction]
fn infer(caps_ratio: f64, provocative_score: f64) -> PyInferenceResult {
    PyInferenceResult {
        inner: default_detector().infer(caps_ratio, provocative_score),
    }
}

#[pyfunction]
fn analyze(text: &str) -> PyHoaxAssessment {
    PyHoaxAssessment {
        inner: default_detector().analyze(text),
    }
}

#[pymodule]
fn hoax_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHoaxConfig>()?;
    m.add_class::<PyInferenceResult>()?;
    m.add_class::<PyHoaxAssessment>()?;
    m.add_class::<PyFeatureExtractor>()?;
    m.add_class::<PyFuzzySystem>()?;
    m.add_class::<PyHoaxDetector>()?;
    m.add_function(wrap_pyfunction!(extract, m)?)?;
    m.add_function(wrap_pyfunction!(infer, m)?)?;
    m.add_function(wrap_pyfunction!(analyze, m)?)?;
    Ok(())
}
