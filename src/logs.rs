//! Training-log loading
//!
//! Evaluation records are appended to CSV logs during training; a resumed
//! run writes a new file. Loading concatenates every readable file and
//! re-sorts by episode so merged runs chart as one continuous curve.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// One evaluation checkpoint from the training log.
///
/// `elapsed_sec` and `bust_rate` are written by current trainers but not
/// charted; older exports may omit them.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalRecord {
    pub episode: u64,
    #[serde(default)]
    pub elapsed_sec: Option<f64>,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub push_rate: f64,
    pub avg_reward: f64,
    #[serde(default)]
    pub bust_rate: Option<f64>,
    pub epsilon: f64,
    pub states_learned: u64,
}

/// Load and concatenate training logs, sorted by episode.
///
/// Files that cannot be read or parsed are skipped with a warning on
/// stderr; the run is fatal only when no records survive at all.
pub fn load_logs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<EvalRecord>> {
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match load_one(path) {
            Ok(mut file_records) => records.append(&mut file_records),
            Err(e) => eprintln!("  Warning: could not read '{}': {e:#}", path.display()),
        }
    }

    if records.is_empty() {
        bail!("no valid log files loaded");
    }

    records.sort_by_key(|r| r.episode);
    Ok(records)
}

fn load_one(path: &Path) -> Result<Vec<EvalRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening '{}'", path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: EvalRecord =
            row.with_context(|| format!("parsing '{}'", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// (first, last) episode numbers of a loaded, sorted log.
pub fn episode_range(records: &[EvalRecord]) -> (u64, u64) {
    let first = records.first().map(|r| r.episode).unwrap_or(0);
    let last = records.last().map(|r| r.episode).unwrap_or(0);
    (first, last)
}
