// src/classifier.rs
//! # Incident Classifier
//! Maps a raw driver report to `{category, priority, location, sentiment}`.
//!
//! Order:
//! 1) empty/whitespace → neutral default, categorizer not consulted
//! 2) statistical categorizer proposes a category (errors → `General`)
//! 3) first matching location cue
//! 4) first matching keyword tier overwrites category + priority
//! 5) sentiment from priority
//!
//! Pure apart from logging/metrics; safe to call from many threads at once.

use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn, Level};

use crate::categorizer::{DisabledCategorizer, DynCategorizer};
use crate::taxonomy::{
    match_location, match_tier, Category, Priority, Sentiment, UNKNOWN_LOCATION,
};
use crate::telemetry::anon_hash;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub priority: Priority,
    pub location: String,
    pub sentiment: Sentiment,
}

impl ClassificationResult {
    fn neutral_default() -> Self {
        Self {
            category: Category::General,
            priority: Priority::Low,
            location: UNKNOWN_LOCATION.to_string(),
            sentiment: Priority::Low.sentiment(),
        }
    }
}

#[derive(Clone)]
pub struct Classifier {
    categorizer: DynCategorizer,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::rules_only()
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("categorizer", &self.categorizer.name())
            .finish()
    }
}

impl Classifier {
    pub fn new(categorizer: DynCategorizer) -> Self {
        Self { categorizer }
    }

    /// Keyword taxonomy only, no statistical hint.
    pub fn rules_only() -> Self {
        Self::new(Arc::new(DisabledCategorizer))
    }

    pub fn categorizer_name(&self) -> &'static str {
        self.categorizer.name()
    }

    pub fn classify(&self, raw_text: &str) -> ClassificationResult {
        let id = report_id(raw_text);
        let id = id.as_deref().unwrap_or_default();

        if raw_text.trim().is_empty() {
            debug!(target: "triage", id, "empty report, neutral default");
            let res = ClassificationResult::neutral_default();
            record(&res);
            return res;
        }

        let lowered = raw_text.to_lowercase();
        let mut category = self.statistical_guess(raw_text);
        let mut priority = Priority::Low;

        let location = match_location(&lowered).to_string();

        let mut matched = None;
        if let Some((tier, keyword)) = match_tier(&lowered) {
            category = tier.category.clone();
            priority = tier.priority;
            matched = Some((tier.name, keyword));
        }

        let res = ClassificationResult {
            category,
            priority,
            location,
            sentiment: priority.sentiment(),
        };

        debug!(
            target: "triage",
            id,
            tier = matched.map(|m| m.0).unwrap_or("none"),
            keyword = matched.map(|m| m.1).unwrap_or(""),
            category = %res.category,
            priority = %res.priority,
            location = %res.location,
            "classified"
        );
        record(&res);
        res
    }

    /// The categorizer's proposal; any failure is a soft miss.
    fn statistical_guess(&self, raw_text: &str) -> Category {
        match self.categorizer.predict(raw_text) {
            Ok(Some(label)) => Category::from_label(&label),
            Ok(None) => Category::General,
            Err(e) => {
                warn!(
                    target: "triage",
                    id = %anon_hash(raw_text),
                    categorizer = self.categorizer.name(),
                    error = %e,
                    "categorizer failed, falling back to General"
                );
                Category::General
            }
        }
    }
}

/// Anonymized report id, only hashed when `triage` debug events are on.
fn report_id(raw_text: &str) -> Option<String> {
    tracing::enabled!(target: "triage", Level::DEBUG).then(|| anon_hash(raw_text))
}

fn record(res: &ClassificationResult) {
    counter!("triage_reports_total", "priority" => res.priority.as_str()).increment(1);
}
