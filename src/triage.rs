// src/triage.rs
//! # Triage Pipeline
//! Runs the classifier and the annotation builder on one report, resolves the
//! geo target and assembles the response envelope handed to persistence/transport.
//!
//! No I/O here; the persisted record id comes from the caller.

use chrono::{DateTime, Utc};
use metrics::histogram;
use serde::Serialize;
use std::time::Instant;

use crate::annotate::{annotate, DebugAnnotation, LanguageMix};
use crate::categorizer::{build_categorizer, DynCategorizer};
use crate::classifier::{ClassificationResult, Classifier};
use crate::config::TriageConfig;
use crate::locations::{resolve_or, GeoPoint, DEFAULT_COORDINATE};
use crate::taxonomy::{Category, Priority, Sentiment};

/// Status of a freshly triaged incident.
pub const STATUS_OPEN: &str = "Open";

/// Everything the core derives from one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageOutcome {
    pub classification: ClassificationResult,
    pub annotation: DebugAnnotation,
    pub geo_target: GeoPoint,
}

#[derive(Debug, Clone)]
pub struct TriagePipeline {
    classifier: Classifier,
    default_coordinate: GeoPoint,
}

impl Default for TriagePipeline {
    fn default() -> Self {
        Self::new(Classifier::rules_only(), DEFAULT_COORDINATE)
    }
}

impl TriagePipeline {
    pub fn new(classifier: Classifier, default_coordinate: GeoPoint) -> Self {
        Self {
            classifier,
            default_coordinate,
        }
    }

    /// Build from config: loads the model once (or falls back to rules only).
    pub fn from_config(cfg: &TriageConfig) -> Self {
        let categorizer: DynCategorizer = build_categorizer(cfg.model_path.as_deref());
        Self::new(Classifier::new(categorizer), cfg.default_coordinate)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn triage(&self, raw_text: &str) -> TriageOutcome {
        let started = Instant::now();

        let classification = self.classifier.classify(raw_text);
        let geo_target = resolve_or(&classification.location, self.default_coordinate);

        let elapsed = started.elapsed();
        histogram!("triage_processing_ms").record(elapsed.as_secs_f64() * 1000.0);

        TriageOutcome {
            annotation: annotate(raw_text, elapsed),
            classification,
            geo_target,
        }
    }
}

// ------------------------------------------------------------
// Response envelope
// ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentView {
    pub id: u64,
    pub text: String,
    pub location: String,
    pub category: Category,
    pub priority: Priority,
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Annotation plus the classifier-derived hints shown in the debug panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NlpDebug {
    pub lang: LanguageMix,
    pub entities: Vec<String>,
    pub sentiment: Sentiment,
    /// `"<category>_Detection"`
    pub intent: String,
    pub processing_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentEnvelope {
    pub incident: IncidentView,
    pub geo_target: GeoPoint,
    pub nlp_debug: NlpDebug,
}

impl IncidentEnvelope {
    /// Merge an outcome with the id/timestamp assigned by the storage layer.
    pub fn assemble(
        record_id: u64,
        raw_text: &str,
        outcome: TriageOutcome,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let TriageOutcome {
            classification,
            annotation,
            geo_target,
        } = outcome;

        let nlp_debug = NlpDebug {
            lang: annotation.language_mix,
            entities: annotation.entities,
            sentiment: classification.sentiment,
            intent: format!("{}_Detection", classification.category),
            processing_time: annotation.processing_time_ms,
        };

        Self {
            incident: IncidentView {
                id: record_id,
                text: raw_text.to_string(),
                location: classification.location,
                category: classification.category,
                priority: classification.priority,
                status: STATUS_OPEN,
                timestamp: recorded_at,
            },
            geo_target,
            nlp_debug,
        }
    }
}
