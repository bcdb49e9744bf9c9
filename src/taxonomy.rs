// src/taxonomy.rs
//! # Keyword Taxonomy
//! Static lexical tables behind the triage classifier.
//!
//! - `TIERS`: one ordered table of `{name, priority, category, keywords}` records,
//!   scanned Critical → High → Medium → Low. The first tier with any substring hit wins.
//! - `LOCATION_CUES`: lowercase substring → canonical location name; first hit wins.
//! - `MIXED_LANGUAGE_MARKERS`: romanized Hindi/Punjabi particles for the language-mix heuristic.
//!
//! All keywords are lowercase; callers match against lowercased text.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Severity level, ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Critical and High reports read as negative; the rest are neutral.
    pub fn sentiment(&self) -> Sentiment {
        match self {
            Priority::Critical | Priority::High => Sentiment::Negative,
            Priority::Medium | Priority::Low => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
}

/// Canonical incident category.
///
/// The four tier categories plus `General` are fixed. `Predicted` carries a
/// title-cased label from the statistical categorizer when no tier matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    AccidentHazard,
    TrafficJam,
    WeatherSlow,
    LogisticsUpdate,
    General,
    Predicted(String),
}

impl Category {
    /// Build a category from a free-form model label (title-cased, blank → `General`).
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            return Category::General;
        }
        let titled = title_case(label);
        match titled.as_str() {
            "Accident/Hazard" => Category::AccidentHazard,
            "Traffic Jam" => Category::TrafficJam,
            "Weather/Slow" => Category::WeatherSlow,
            "Logistics Update" => Category::LogisticsUpdate,
            "General" => Category::General,
            _ => Category::Predicted(titled),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::AccidentHazard => "Accident/Hazard",
            Category::TrafficJam => "Traffic Jam",
            Category::WeatherSlow => "Weather/Slow",
            Category::LogisticsUpdate => "Logistics Update",
            Category::General => "General",
            Category::Predicted(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Title-case the way drivers' dashboards expect: a letter following a
/// non-letter is upper-cased, every other letter is lower-cased.
/// `"harvest_traffic"` → `"Harvest_Traffic"`, `"accident/hazard"` → `"Accident/Hazard"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

/// One severity tier: its priority, the category it assigns, and its cues.
#[derive(Debug)]
pub struct Tier {
    pub name: &'static str,
    pub priority: Priority,
    pub category: Category,
    pub keywords: &'static [&'static str],
}

impl Tier {
    /// First keyword contained in `lowered`, if any.
    pub fn first_hit(&self, lowered: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|k| lowered.contains(k))
    }
}

/// Tiers in strict precedence order. Do not reorder.
pub static TIERS: [Tier; 4] = [
    Tier {
        name: "critical",
        priority: Priority::Critical,
        category: Category::AccidentHazard,
        keywords: &[
            "accident", "fire", "leak", "blast", "explosion", "palat", "overturned",
            "collision", "thuk", "takkar", "casualty", "dead", "dangerous", "chemical",
            "emergency", "crash", "oil spill", "pile up", "brake fail", "jal gya", "burst",
        ],
    },
    Tier {
        name: "high",
        priority: Priority::High,
        category: Category::TrafficJam,
        keywords: &[
            "jam", "blocked", "stuck", "chakka jam", "gridlock", "fas gaye", "not moving",
            "closed", "dharna", "protest", "packed", "rush", "crawling", "long line",
            "lambi line", "stopped",
        ],
    },
    Tier {
        name: "medium",
        priority: Priority::Medium,
        category: Category::WeatherSlow,
        keywords: &[
            "fog", "dhund", "smog", "rain", "slow", "heavy traffic", "wait", "queue",
            "visibility", "storm", "wind", "tree fallen", "water logging", "slippery",
            "smoke",
        ],
    },
    Tier {
        name: "low",
        priority: Priority::Low,
        category: Category::LogisticsUpdate,
        keywords: &[
            "clear", "smooth", "reached", "unload", "safe", "good", "open", "normal",
            "leaving", "done", "complete", "khul gya",
        ],
    },
];

/// Substring → canonical location. Targets must exist in `locations::LOCATIONS`.
/// More specific cues come before cues they contain ("ferozepur road" before "ferozepur").
pub const LOCATION_CUES: &[(&str, &str)] = &[
    ("ludhiana", "Ludhiana Transport Nagar"),
    ("khanna", "Khanna Mandi"),
    ("moga", "Moga Grain Market"),
    ("phagwara", "Phagwara"),
    ("rajpura", "Rajpura Toll"),
    ("sahnewal", "Sahnewal Mandi"),
    ("doraha", "Doraha"),
    ("ferozepur road", "Ferozepur Road"),
    ("canal road", "Canal Road"),
    ("link road", "Link Road #5"),
    ("gt road", "GT Road"),
    ("nh-44", "NH-44"),
    ("nh 44", "NH-44"),
    ("jalandhar", "Jalandhar Bypass"),
    ("amritsar", "Amritsar Gate"),
    ("bathinda", "Bathinda Refinery"),
    ("jagraon", "Jagraon Mandi"),
    ("sirhind", "Sirhind Mandi"),
    ("raikot", "Raikot"),
    ("machhiwara", "Machhiwara"),
    ("samrala", "Samrala"),
    ("phillaur", "Phillaur"),
    ("nakodar", "Nakodar"),
    ("malerkotla", "Malerkotla"),
    ("hoshiarpur", "Hoshiarpur"),
    ("ferozepur", "Ferozepur"),
    ("patiala", "Patiala"),
];

/// Sentinel for reports without a location cue.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Romanized auxiliary particles. Substring presence marks a report as mixed-language.
pub const MIXED_LANGUAGE_MARKERS: &[&str] = &["hai", "ho", "gya", "fas", "wala"];

/// Canonical location for `lowered`, or `UNKNOWN_LOCATION`.
pub fn match_location(lowered: &str) -> &'static str {
    LOCATION_CUES
        .iter()
        .find(|(cue, _)| lowered.contains(cue))
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_LOCATION)
}

/// First tier (in precedence order) with a keyword in `lowered`, plus the hit.
pub fn match_tier(lowered: &str) -> Option<(&'static Tier, &'static str)> {
    TIERS
        .iter()
        .find_map(|tier| tier.first_hit(lowered).map(|kw| (tier, kw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_in_descending_severity() {
        let prios: Vec<Priority> = TIERS.iter().map(|t| t.priority).collect();
        let mut sorted = prios.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(prios, sorted);
        assert_eq!(prios[0], Priority::Critical);
    }

    #[test]
    fn keywords_are_lowercase() {
        for tier in TIERS.iter() {
            for kw in tier.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "tier {} keyword {kw}", tier.name);
            }
        }
        for (cue, _) in LOCATION_CUES {
            assert_eq!(*cue, cue.to_lowercase());
        }
    }

    #[test]
    fn title_case_follows_letter_boundaries() {
        assert_eq!(title_case("harvest_traffic"), "Harvest_Traffic");
        assert_eq!(title_case("accident/hazard"), "Accident/Hazard");
        assert_eq!(title_case("TRAFFIC JAM"), "Traffic Jam");
        assert_eq!(title_case("nh-44 route"), "Nh-44 Route");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn from_label_maps_known_labels_and_blanks() {
        assert_eq!(Category::from_label("traffic jam"), Category::TrafficJam);
        assert_eq!(Category::from_label("   "), Category::General);
        assert_eq!(
            Category::from_label("smog_fog"),
            Category::Predicted("Smog_Fog".into())
        );
    }

    #[test]
    fn ferozepur_road_beats_ferozepur() {
        assert_eq!(match_location("stuck on ferozepur road"), "Ferozepur Road");
        assert_eq!(match_location("reached ferozepur"), "Ferozepur");
        assert_eq!(match_location("nowhere special"), UNKNOWN_LOCATION);
    }

    #[test]
    fn priority_order_and_sentiment() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::High.sentiment(), Sentiment::Negative);
        assert_eq!(Priority::Medium.sentiment(), Sentiment::Neutral);
    }
}
