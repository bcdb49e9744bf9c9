// src/corpus/mod.rs
//! # Synthetic Corpus Generator
//! Labeled, noisy driver messages for training and regression-testing the categorizer.
//!
//! Pipeline per record:
//! 1) draw a timestamp (day offset, hour, minute) from the configured window
//! 2) pick a category from the night or day mix depending on the hour
//! 3) fill the category template from `vocab` and assign its severity
//! 4) inject noise (slang swaps, vowel stripping, lowercase)
//!
//! Records are sorted by timestamp before they are returned. The caller owns the
//! RNG, so a seeded `StdRng` replays the exact same corpus.

pub mod export;
pub mod noise;
pub mod vocab;

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tracing::{debug, info};

use crate::error::{Result, TriageError};
use crate::locations::{LocationKind, LOCATIONS};
pub use export::{export_csv, write_csv};
pub use noise::NoiseProfile;
use vocab::*;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ground-truth label of a synthetic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusCategory {
    HarvestTraffic,
    SmogFog,
    ProtestDharna,
    RuralHazard,
    VehicleBreakdown,
    Clear,
}

impl CorpusCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CorpusCategory::HarvestTraffic => "harvest_traffic",
            CorpusCategory::SmogFog => "smog_fog",
            CorpusCategory::ProtestDharna => "protest_dharna",
            CorpusCategory::RuralHazard => "rural_hazard",
            CorpusCategory::VehicleBreakdown => "vehicle_breakdown",
            CorpusCategory::Clear => "clear",
        }
    }
}

impl fmt::Display for CorpusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 20:00–23:59 and 00:00–06:59 count as night.
pub fn is_night(hour: u32) -> bool {
    hour >= 20 || hour <= 6
}

/// Night: fog and rural hazards dominate.
pub const NIGHT_MIX: &[(CorpusCategory, f64)] = &[
    (CorpusCategory::SmogFog, 0.5),
    (CorpusCategory::RuralHazard, 0.3),
    (CorpusCategory::Clear, 0.2),
];

/// Day: harvest traffic and protests dominate.
pub const DAY_MIX: &[(CorpusCategory, f64)] = &[
    (CorpusCategory::HarvestTraffic, 0.4),
    (CorpusCategory::ProtestDharna, 0.2),
    (CorpusCategory::Clear, 0.2),
    (CorpusCategory::VehicleBreakdown, 0.2),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub location_reported: String,
    pub raw_message: String,
    pub category_label: CorpusCategory,
    pub severity_score: u8,
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or(NaiveDate::MIN)
}

/// `[corpus]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Signed so that negative values from config reach validation instead of a parse error.
    pub records: i64,
    pub start_date: NaiveDate,
    /// Day offsets are drawn from `0..=span_days`.
    pub span_days: u32,
    pub seed: Option<u64>,
    pub word_swap_probability: f64,
    pub vowel_strip_probability: f64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            records: 1000,
            start_date: default_start_date(),
            span_days: 30,
            seed: None,
            word_swap_probability: 0.3,
            vowel_strip_probability: 0.1,
        }
    }
}

impl CorpusConfig {
    pub fn with_records(records: i64) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Seeded RNG when `seed` is set, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Debug)]
pub struct CorpusGenerator {
    count: usize,
    start_date: NaiveDate,
    span_days: u32,
    noise: NoiseProfile,
    night: WeightedIndex<f64>,
    day: WeightedIndex<f64>,
    locations: Vec<&'static str>,
}

impl CorpusGenerator {
    /// Validate `config` up front; a bad config never yields a degenerate corpus.
    pub fn new(config: &CorpusConfig) -> Result<Self> {
        if config.records <= 0 {
            return Err(TriageError::InvalidCorpusConfig(format!(
                "record count must be positive, got {}",
                config.records
            )));
        }
        let count = usize::try_from(config.records).map_err(|_| {
            TriageError::InvalidCorpusConfig(format!("record count {} too large", config.records))
        })?;

        if config
            .start_date
            .checked_add_days(Days::new(u64::from(config.span_days) + 1))
            .is_none()
        {
            return Err(TriageError::InvalidCorpusConfig(format!(
                "span of {} days from {} overflows the calendar",
                config.span_days, config.start_date
            )));
        }

        let noise = NoiseProfile::new(config.word_swap_probability, config.vowel_strip_probability)?;

        // Cities stay out of the draw pool.
        let locations = LOCATIONS
            .iter()
            .filter(|l| l.kind != LocationKind::City)
            .map(|l| l.name)
            .collect();

        Ok(Self {
            count,
            start_date: config.start_date,
            span_days: config.span_days,
            noise,
            night: weighted(NIGHT_MIX)?,
            day: weighted(DAY_MIX)?,
            locations,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Exactly `len()` records, sorted ascending by timestamp.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<CorpusRecord> {
        let mut out: Vec<CorpusRecord> = (0..self.count).map(|_| self.one(rng)).collect();
        out.sort_by_key(|r| r.timestamp);

        info!(target: "triage", records = out.len(), "synthetic corpus generated");
        out
    }

    fn one<R: Rng + ?Sized>(&self, rng: &mut R) -> CorpusRecord {
        let day = rng.random_range(0..=self.span_days);
        let hour = rng.random_range(0..24u32);
        let minute = rng.random_range(0..60u32);
        let timestamp = (self.start_date + Days::new(u64::from(day))).and_time(NaiveTime::default())
            + Duration::hours(i64::from(hour))
            + Duration::minutes(i64::from(minute));

        let category = if is_night(hour) {
            NIGHT_MIX[self.night.sample(rng)].0
        } else {
            DAY_MIX[self.day.sample(rng)].0
        };

        let location = pick(&self.locations, rng);
        let (raw, severity) = compose(category, location, rng);
        let raw_message = self.noise.apply(&raw, rng);

        debug!(target: "triage", %category, severity, "corpus record");
        CorpusRecord {
            timestamp,
            location_reported: location.to_string(),
            raw_message,
            category_label: category,
            severity_score: severity,
        }
    }
}

/// Convenience: `n` records with default settings.
pub fn generate<R: Rng + ?Sized>(n: i64, rng: &mut R) -> Result<Vec<CorpusRecord>> {
    let generator = CorpusGenerator::new(&CorpusConfig::with_records(n))?;
    Ok(generator.generate(rng))
}

fn weighted(mix: &[(CorpusCategory, f64)]) -> Result<WeightedIndex<f64>> {
    WeightedIndex::new(mix.iter().map(|(_, w)| *w))
        .map_err(|e| TriageError::InvalidCorpusConfig(format!("category weights: {e}")))
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Template text and severity score for one record.
fn compose<R: Rng + ?Sized>(category: CorpusCategory, loc: &str, rng: &mut R) -> (String, u8) {
    match category {
        CorpusCategory::HarvestTraffic => {
            let adj = pick(ADJECTIVES, rng);
            let sub = pick(SUBJECTS, rng);
            let act = pick(ACTIONS_TRAFFIC, rng);
            let reason = pick(REASONS_HARVEST, rng);
            (
                format!("{adj} traffic. {sub} {act} near {loc} due to {reason}."),
                rng.random_range(4..=7),
            )
        }
        CorpusCategory::SmogFog => {
            let reason = pick(REASONS_WEATHER, rng);
            let adj = pick(ADJECTIVES, rng);
            (
                format!("Zero visibility near {loc}. {reason} is {adj}. Driving slow."),
                rng.random_range(7..=9),
            )
        }
        CorpusCategory::ProtestDharna => {
            let act = pick(ACTIONS_TRAFFIC, rng);
            let reason = pick(REASONS_PROTEST, rng);
            (
                format!("{loc} {act} by {reason}. Total jam. Avoid this route."),
                10,
            )
        }
        CorpusCategory::RuralHazard => {
            let hazard = pick(RURAL_HAZARDS, rng);
            let act = pick(ACTIONS_TRAFFIC, rng);
            (
                format!("{hazard} on road near {loc}. Risk of accident. {act}."),
                rng.random_range(3..=6),
            )
        }
        CorpusCategory::VehicleBreakdown => {
            let sub = pick(SUBJECTS, rng);
            let issue = pick(BREAKDOWN_ISSUES, rng);
            (
                format!("My {sub} stopped at {loc}. {issue}. Need mechanic."),
                2,
            )
        }
        CorpusCategory::Clear => (format!("Crossed {loc}. Road clear. Reaching on time."), 0),
    }
}
