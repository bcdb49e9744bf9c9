// src/annotate.rs
//! Debug annotations shown next to a triage result: a language-mix guess,
//! a few capitalized "entities", and the processing time.
//!
//! Marker presence is the whole language test; an entity is any token that
//! starts with an uppercase letter.

use serde::Serialize;
use std::time::Duration;

use crate::taxonomy::MIXED_LANGUAGE_MARKERS;

/// Max entities reported per message.
pub const MAX_ENTITIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LanguageMix {
    Mixed,
    English,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugAnnotation {
    pub language_mix: LanguageMix,
    pub entities: Vec<String>,
    pub processing_time_ms: String,
}

pub fn annotate(raw_text: &str, elapsed: Duration) -> DebugAnnotation {
    DebugAnnotation {
        language_mix: language_mix(raw_text),
        entities: entities(raw_text),
        processing_time_ms: format_elapsed(elapsed),
    }
}

pub fn language_mix(raw_text: &str) -> LanguageMix {
    let lowered = raw_text.to_lowercase();
    if MIXED_LANGUAGE_MARKERS.iter().any(|m| lowered.contains(m)) {
        LanguageMix::Mixed
    } else {
        LanguageMix::English
    }
}

/// First `MAX_ENTITIES` whitespace tokens starting with an uppercase letter.
pub fn entities(raw_text: &str) -> Vec<String> {
    raw_text
        .split_whitespace()
        .filter(|tok| tok.chars().next().is_some_and(char::is_uppercase))
        .take(MAX_ENTITIES)
        .map(str::to_string)
        .collect()
}

/// `"12.34ms"`
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}ms", elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_three_capitalized_tokens_in_order() {
        let e = entities("Truck Stuck Near Khanna Mandi Urgent");
        assert_eq!(e, vec!["Truck", "Stuck", "Near"]);
    }

    #[test]
    fn fewer_entities_are_not_padded() {
        assert_eq!(entities("truck near Khanna"), vec!["Khanna"]);
        assert!(entities("").is_empty());
        assert!(entities("   \t ").is_empty());
    }

    #[test]
    fn markers_flag_mixed_text() {
        assert_eq!(language_mix("Boht dhund HAI"), LanguageMix::Mixed);
        assert_eq!(language_mix("gaddi fas gayi"), LanguageMix::Mixed);
        assert_eq!(language_mix("Road clear, reaching on time"), LanguageMix::English);
    }

    #[test]
    fn elapsed_has_two_decimals_and_unit() {
        assert_eq!(format_elapsed(Duration::from_micros(1_234)), "1.23ms");
        assert_eq!(format_elapsed(Duration::ZERO), "0.00ms");
        let a = annotate("", Duration::from_millis(5));
        assert_eq!(a.processing_time_ms, "5.00ms");
        assert_eq!(a.language_mix, LanguageMix::English);
    }
}
