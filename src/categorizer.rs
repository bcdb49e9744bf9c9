// src/categorizer.rs
//! Statistical categorizer: the optional model consulted before keyword rules.
//!
//! The classifier holds a `DynCategorizer` built once at startup:
//! - `DisabledCategorizer` when no model is configured or loading failed,
//! - `NaiveBayesCategorizer` backed by a JSON artifact exported by the trainer
//!   (raw term counts, or l2-normalised tf-idf weights when the artifact carries `idf`),
//! - `FixedCategorizer` for tests and local runs.
//!
//! A categorizer only proposes a label. Keyword tiers always have the last word.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{Result, TriageError};

/// Single `predict` capability. `Ok(None)` means "no opinion".
pub trait Categorizer: Send + Sync {
    fn predict(&self, text: &str) -> Result<Option<String>>;
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

pub type DynCategorizer = Arc<dyn Categorizer>;

/// Always abstains.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCategorizer;

impl Categorizer for DisabledCategorizer {
    fn predict(&self, _text: &str) -> Result<Option<String>> {
        Ok(None)
    }
    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Returns the same label for every input.
#[derive(Debug, Clone)]
pub struct FixedCategorizer {
    pub label: String,
}

impl FixedCategorizer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Categorizer for FixedCategorizer {
    fn predict(&self, _text: &str) -> Result<Option<String>> {
        Ok(Some(self.label.clone()))
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
}

// ------------------------------------------------------------
// Multinomial naive Bayes over word n-grams
// ------------------------------------------------------------

/// Words of two or more word characters, Unicode-aware.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token regex"));

fn default_ngram_max() -> usize {
    2
}

/// On-disk artifact layout.
#[derive(Debug, Deserialize)]
struct NaiveBayesArtifact {
    labels: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: HashMap<String, Vec<f64>>,
    #[serde(default = "default_ngram_max")]
    ngram_max: usize,
    /// Inverse document frequencies of the training vectorizer.
    #[serde(default)]
    idf: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone)]
pub struct NaiveBayesCategorizer {
    labels: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: HashMap<String, Vec<f64>>,
    ngram_max: usize,
    idf: Option<HashMap<String, f64>>,
}

impl NaiveBayesCategorizer {
    pub fn from_json(raw: &str) -> Result<Self> {
        let art: NaiveBayesArtifact = serde_json::from_str(raw)
            .map_err(|e| TriageError::Model(format!("invalid artifact: {e}")))?;

        let k = art.labels.len();
        if k == 0 {
            return Err(TriageError::Model("artifact has no labels".into()));
        }
        if art.class_log_prior.len() != k {
            return Err(TriageError::Model(format!(
                "class_log_prior has {} entries, expected {k}",
                art.class_log_prior.len()
            )));
        }
        if let Some((term, v)) = art.feature_log_prob.iter().find(|(_, v)| v.len() != k) {
            return Err(TriageError::Model(format!(
                "feature '{term}' has {} entries, expected {k}",
                v.len()
            )));
        }
        if art.ngram_max == 0 {
            return Err(TriageError::Model("ngram_max must be >= 1".into()));
        }
        if let Some((term, w)) = art
            .idf
            .iter()
            .flatten()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(TriageError::Model(format!("idf for '{term}' is {w}")));
        }

        Ok(Self {
            labels: art.labels,
            class_log_prior: art.class_log_prior,
            feature_log_prob: art.feature_log_prob,
            ngram_max: art.ngram_max,
            idf: art.idf,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Lowercased tokens plus space-joined n-grams up to `ngram_max`.
    fn terms(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()).collect();
        let mut out = Vec::new();
        for n in 1..=self.ngram_max {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                out.push(window.join(" "));
            }
        }
        out
    }

    /// Feature weights over the known vocabulary. Without `idf` these are raw
    /// counts; with it, count * idf scaled to unit l2 norm.
    fn weights(&self, text: &str) -> HashMap<String, f64> {
        let mut counts: HashMap<String, f64> = HashMap::new();
        for term in self.terms(text) {
            if self.feature_log_prob.contains_key(&term) {
                *counts.entry(term).or_default() += 1.0;
            }
        }

        let Some(idf) = &self.idf else {
            return counts;
        };
        for (term, w) in counts.iter_mut() {
            *w *= idf.get(term).copied().unwrap_or(1.0);
        }
        let norm = counts.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            counts.values_mut().for_each(|w| *w /= norm);
        }
        counts
    }
}

impl Categorizer for NaiveBayesCategorizer {
    fn predict(&self, text: &str) -> Result<Option<String>> {
        let mut scores = self.class_log_prior.clone();
        for (term, weight) in self.weights(text) {
            if let Some(log_probs) = self.feature_log_prob.get(&term) {
                for (s, lp) in scores.iter_mut().zip(log_probs) {
                    *s += weight * lp;
                }
            }
        }

        let best = scores
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);

        match best {
            Some(i) => Ok(Some(self.labels[i].clone())),
            None => Err(TriageError::Model("no finite class score".into())),
        }
    }
    fn name(&self) -> &'static str {
        "naive-bayes"
    }
}

/// Factory: load the artifact at `model_path`, or fall back to `DisabledCategorizer`.
/// Never fails; a missing or broken model only costs the statistical hint.
pub fn build_categorizer(model_path: Option<&Path>) -> DynCategorizer {
    let Some(path) = model_path else {
        info!(target: "triage", "no model configured, using keyword rules only");
        return Arc::new(DisabledCategorizer);
    };

    if !path.exists() {
        warn!(target: "triage", path = %path.display(), "model not found, using keyword rules only");
        return Arc::new(DisabledCategorizer);
    }

    match NaiveBayesCategorizer::from_path(path) {
        Ok(model) => {
            info!(
                target: "triage",
                path = %path.display(),
                labels = model.labels().len(),
                "statistical categorizer loaded"
            );
            Arc::new(model)
        }
        Err(e) => {
            warn!(target: "triage", path = %path.display(), error = %e, "failed to load model");
            Arc::new(DisabledCategorizer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "labels": ["harvest_traffic", "smog_fog"],
        "class_log_prior": [-0.69, -0.69],
        "feature_log_prob": {
            "trolley": [-1.0, -6.0],
            "paddy": [-1.5, -6.0],
            "dhund": [-6.0, -1.0],
            "zero visibility": [-6.0, -0.5]
        }
    }"#;

    #[test]
    fn terms_include_bigrams_and_skip_single_chars() {
        let m = NaiveBayesCategorizer::from_json(ARTIFACT).unwrap();
        let t = m.terms("Zero visibility, a fog");
        assert!(t.contains(&"zero visibility".to_string()));
        assert!(t.contains(&"fog".to_string()));
        assert!(!t.contains(&"a".to_string()));
    }

    #[test]
    fn picks_the_dominant_label() {
        let m = NaiveBayesCategorizer::from_json(ARTIFACT).unwrap();
        assert_eq!(
            m.predict("Trolley stuck, paddy bags").unwrap().as_deref(),
            Some("harvest_traffic")
        );
        assert_eq!(
            m.predict("zero visibility, boht dhund").unwrap().as_deref(),
            Some("smog_fog")
        );
    }

    #[test]
    fn rejects_mismatched_vectors() {
        let bad = r#"{"labels":["a","b"],"class_log_prior":[-0.1,-0.2],
                      "feature_log_prob":{"x":[-1.0]}}"#;
        assert!(matches!(
            NaiveBayesCategorizer::from_json(bad),
            Err(TriageError::Model(_))
        ));
        let no_labels = r#"{"labels":[],"class_log_prior":[],"feature_log_prob":{}}"#;
        assert!(NaiveBayesCategorizer::from_json(no_labels).is_err());
    }

    #[test]
    fn tfidf_weights_ignore_repetition() {
        let counts = r#"{"labels":["a","b"],"class_log_prior":[-0.1,-4.0],
                         "feature_log_prob":{"fog":[-3.0,-1.0]}}"#;
        let m = NaiveBayesCategorizer::from_json(counts).unwrap();
        assert_eq!(m.predict("fog").unwrap().as_deref(), Some("a"));
        assert_eq!(m.predict("fog fog fog").unwrap().as_deref(), Some("b"));

        let tfidf = r#"{"labels":["a","b"],"class_log_prior":[-0.1,-4.0],
                        "feature_log_prob":{"fog":[-3.0,-1.0]},"idf":{"fog":1.7}}"#;
        let m = NaiveBayesCategorizer::from_json(tfidf).unwrap();
        assert_eq!(m.predict("fog").unwrap().as_deref(), Some("a"));
        assert_eq!(m.predict("fog fog fog").unwrap().as_deref(), Some("a"));
        let w = m.weights("fog fog fog unknownword");
        assert_eq!(w.len(), 1);
        assert!((w["fog"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_idf() {
        let bad = r#"{"labels":["a"],"class_log_prior":[-0.1],
                      "feature_log_prob":{"x":[-1.0]},"idf":{"x":0.0}}"#;
        assert!(matches!(
            NaiveBayesCategorizer::from_json(bad),
            Err(TriageError::Model(_))
        ));
    }

    #[test]
    fn missing_model_falls_back_to_disabled() {
        let c = build_categorizer(Some(Path::new("__no_such_model__.json")));
        assert_eq!(c.name(), "disabled");
        assert_eq!(c.predict("anything").unwrap(), None);
        assert_eq!(build_categorizer(None).name(), "disabled");
    }
}
