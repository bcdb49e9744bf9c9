// src/error.rs
//! Library error type.
//!
//! Per-report classification never surfaces these; they come from corpus
//! generation, model loading and config parsing only.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    /// Corpus generator was asked for a degenerate dataset (e.g. zero records).
    #[error("invalid corpus config: {0}")]
    InvalidCorpusConfig(String),

    /// Statistical categorizer artifact missing, malformed or failing to predict.
    #[error("model error: {0}")]
    Model(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;
