// src/corpus/export.rs
//! CSV export: `timestamp, location_reported, raw_message, category_label, severity_score`.

use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

use super::CorpusRecord;
use crate::error::Result;

/// Write records (header row first) to any writer.
pub fn write_csv<W: io::Write>(records: &[CorpusRecord], writer: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    for r in records {
        w.serialize(r)?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_csv(records: &[CorpusRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(records, io::BufWriter::new(file))?;
    info!(target: "triage", rows = records.len(), path = %path.display(), "corpus exported");
    Ok(())
}
