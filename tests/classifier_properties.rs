// tests/classifier_properties.rs
//
// Property-style checks over seeded, programmatically built reports.
// Covered:
// - Critical keywords win regardless of other tiers present
// - no keyword → never Critical, Low/General without a model
// - sentiment is Negative iff priority is Critical/High
// - repeated calls are identical

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use rlis_triage::taxonomy::{TIERS, UNKNOWN_LOCATION};
use rlis_triage::{Category, Classifier, Priority, Sentiment};

/// Filler words that hit no tier keyword and no location cue.
const FILLER: &[&str] = &[
    "bhai", "truck", "near", "the", "gaadi", "driver", "yaar", "kuch", "pata", "nahi", "kal",
    "abhi", "side", "pe", "tractor", "trolley",
];

fn filler_sentence(rng: &mut StdRng) -> Vec<String> {
    let n = rng.random_range(0..8);
    (0..n)
        .map(|_| FILLER.choose(rng).copied().unwrap_or("bhai").to_string())
        .collect()
}

fn any_keyword(rng: &mut StdRng, tier: usize) -> &'static str {
    TIERS[tier].keywords.choose(rng).copied().unwrap_or("jam")
}

#[test]
fn filler_hits_nothing() {
    let c = Classifier::rules_only();
    for w in FILLER {
        let r = c.classify(w);
        assert_eq!(r.priority, Priority::Low, "filler '{w}' hit a tier");
        assert_eq!(r.category, Category::General, "filler '{w}' hit a tier");
        assert_eq!(r.location, UNKNOWN_LOCATION, "filler '{w}' hit a location");
    }
}

#[test]
fn critical_keyword_always_wins() {
    let c = Classifier::rules_only();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..300 {
        let mut words = filler_sentence(&mut rng);
        for tier in 1..TIERS.len() {
            if rng.random_bool(0.5) {
                words.push(any_keyword(&mut rng, tier).to_string());
            }
        }
        let pos = rng.random_range(0..=words.len());
        words.insert(pos, any_keyword(&mut rng, 0).to_uppercase());

        let text = words.join(" ");
        let r = c.classify(&text);
        assert_eq!(r.priority, Priority::Critical, "text: {text}");
        assert_eq!(r.category, Category::AccidentHazard, "text: {text}");
    }
}

#[test]
fn each_tier_keyword_alone_selects_its_tier() {
    let c = Classifier::rules_only();
    for tier in TIERS.iter() {
        for kw in tier.keywords {
            let r = c.classify(&format!("bhai {kw} yaar"));
            // A lower-tier keyword may contain a higher-tier one ("chakka jam" is fine,
            // both High); never the other way round.
            assert!(r.priority >= tier.priority, "'{kw}' scored {:?}", r.priority);
        }
    }
}

#[test]
fn no_keyword_is_never_critical() {
    let c = Classifier::rules_only();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let text = filler_sentence(&mut rng).join(" ");
        let r = c.classify(&text);
        assert_eq!(r.priority, Priority::Low, "text: {text}");
        assert_eq!(r.category, Category::General, "text: {text}");
    }
}

#[test]
fn sentiment_tracks_priority() {
    let c = Classifier::rules_only();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..300 {
        let mut words = filler_sentence(&mut rng);
        if rng.random_bool(0.8) {
            let tier = rng.random_range(0..TIERS.len());
            words.push(any_keyword(&mut rng, tier).to_string());
        }
        let r = c.classify(&words.join(" "));
        let negative = matches!(r.priority, Priority::Critical | Priority::High);
        assert_eq!(r.sentiment == Sentiment::Negative, negative);
    }
}

#[test]
fn identical_input_identical_output() {
    let c = Classifier::rules_only();
    for text in [
        "Accident near Ludhiana, truck overturned, emergency!",
        "lambi line at rajpura toll",
        "",
        "Road clear, reaching on time",
    ] {
        assert_eq!(c.classify(text), c.classify(text));
    }
}

#[test]
fn location_examples() {
    let c = Classifier::rules_only();
    assert_eq!(
        c.classify("truck stuck near khanna, need help").location,
        "Khanna Mandi"
    );
    assert_eq!(c.classify("truck stuck, need help").location, UNKNOWN_LOCATION);
    // First cue in table order wins when several appear.
    assert_eq!(
        c.classify("from Doraha to Ludhiana").location,
        "Ludhiana Transport Nagar"
    );
}
