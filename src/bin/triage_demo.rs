//! Demo: triage a few reports (or the CLI args) and print the JSON envelopes.
//!
//! `triage_demo "truck stuck near khanna"`      → one envelope
//! `triage_demo --corpus 1000 data/corpus.csv`   → write a synthetic corpus
//! `TRIAGE_METRICS=1 triage_demo`                → also dump Prometheus text

use anyhow::{bail, Context};
use chrono::Utc;
use rlis_triage::corpus::{export_csv, CorpusConfig, CorpusGenerator};
use rlis_triage::{pipeline_from_env, telemetry, IncidentEnvelope, TriageConfig};
use std::path::PathBuf;

const SAMPLES: &[&str] = &[
    "Accident near Ludhiana, truck overturned, emergency!",
    "Khanna mandi bahar 4 km lambi line hai, fas gaye.",
    "Boht dhund hai near Doraha, driving slow",
    "Maal unload ho gya, road clear",
    "",
];

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--corpus") {
        return write_corpus(&args[1..]);
    }

    let flag = std::env::var("TRIAGE_METRICS").ok();
    let metrics = if metrics_requested(&args, flag.as_deref()) {
        Some(telemetry::install_prometheus()?)
    } else {
        None
    };

    let pipeline = pipeline_from_env()?;
    let texts: Vec<&str> = if args.is_empty() {
        SAMPLES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for (i, text) in texts.iter().enumerate() {
        let outcome = pipeline.triage(text);
        let envelope = IncidentEnvelope::assemble(i as u64 + 1, text, outcome, Utc::now());
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }

    if let Some(handle) = metrics {
        println!("{}", handle.render());
    }
    Ok(())
}

/// The recorder is only worth installing when envelopes are printed afterwards.
fn metrics_requested(args: &[String], flag: Option<&str>) -> bool {
    flag == Some("1") && args.first().map(String::as_str) != Some("--corpus")
}

fn write_corpus(args: &[String]) -> anyhow::Result<()> {
    let cfg = TriageConfig::load_default()?;
    let mut corpus_cfg: CorpusConfig = cfg.corpus;

    let (count, path) = match args {
        [n, path] => (n.parse::<i64>().context("record count")?, PathBuf::from(path)),
        [path] => (corpus_cfg.records, PathBuf::from(path)),
        _ => bail!("usage: triage_demo --corpus [N] <out.csv>"),
    };
    corpus_cfg.records = count;

    let generator = CorpusGenerator::new(&corpus_cfg)?;
    let mut rng = corpus_cfg.rng();
    let records = generator.generate(&mut rng);
    export_csv(&records, &path)?;
    println!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}
