// src/corpus/vocab.rs
//! Word pools for synthetic driver messages. Mixed English / Hindi / Punjabi on purpose.

pub const SUBJECTS: &[&str] = &["Tractor", "Trolley", "Truck", "Canter", "Tanker", "Gaadi"];

pub const ACTIONS_TRAFFIC: &[&str] = &[
    "stuck",
    "phas gya",
    "jammed",
    "blocked",
    "stopped",
    "khada hai",
];

pub const REASONS_HARVEST: &[&str] = &[
    "unloading",
    "paddy bags",
    "slow gate entry",
    "overloading check",
    "labor shortage",
];

pub const REASONS_WEATHER: &[&str] = &[
    "fog",
    "dhund",
    "smog",
    "heavy rain",
    "waterlogging",
    "slippery road",
];

pub const REASONS_PROTEST: &[&str] = &[
    "dharna",
    "union block",
    "road roko",
    "strike",
    "police barricade",
];

pub const ADJECTIVES: &[&str] = &["very bad", "boht heavy", "total", "pura", "dead", "slow"];

pub const RURAL_HAZARDS: &[&str] = &["Cattle", "Stray cows", "Electric wire", "Mud", "Pothole"];

pub const BREAKDOWN_ISSUES: &[&str] = &[
    "Tyre burst",
    "Engine heat",
    "Break fail",
    "Diesel over",
    "Clutch plate gya",
];

/// Lowercase word → shorthand/slang variants drivers actually type.
pub const SLANG: &[(&str, &[&str])] = &[
    ("road", &["rd", "rod", "rasta"]),
    ("blocked", &["blokd", "block", "band"]),
    ("traffic", &["jam", "trfic", "rush"]),
    ("accident", &["accdnt", "thuk gyi"]),
    ("near", &["nr", "pass"]),
    ("please", &["plz", "pls"]),
    ("waiting", &["wait", "wtg"]),
    ("brother", &["bhai", "paaji", "bro"]),
];

/// Variants for an already-lowercased word.
pub fn slang_for(word: &str) -> Option<&'static [&'static str]> {
    SLANG.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}
