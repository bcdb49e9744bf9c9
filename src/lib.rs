// src/lib.rs
// Public library surface for the demo binary and integration tests.

pub mod annotate;
pub mod categorizer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod locations;
pub mod taxonomy;
pub mod telemetry;
pub mod triage;

// Synthetic training data (generator, noise, CSV export)
pub mod corpus;

// ---- Re-exports for stable public API ----
pub use crate::annotate::{annotate, DebugAnnotation, LanguageMix};
pub use crate::categorizer::{Categorizer, DynCategorizer};
pub use crate::classifier::{ClassificationResult, Classifier};
pub use crate::config::TriageConfig;
pub use crate::error::TriageError;
pub use crate::locations::GeoPoint;
pub use crate::taxonomy::{Category, Priority, Sentiment};
pub use crate::triage::{IncidentEnvelope, TriageOutcome, TriagePipeline};

/// Load config (env + fallbacks) and build a ready pipeline.
/// A missing/broken model is logged and degrades to keyword rules only.
pub fn pipeline_from_env() -> anyhow::Result<TriagePipeline> {
    let cfg = TriageConfig::load_default()?;
    let pipeline = TriagePipeline::from_config(&cfg);
    tracing::info!(
        target: "triage",
        categorizer = pipeline.classifier().categorizer_name(),
        "triage pipeline ready"
    );
    Ok(pipeline)
}
