use crate::error::{CompassError, Result};
use crate::types::decision::{Decision, DecisionRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const HISTORY_VERSION: u32 = 1;
pub const DEFAULT_HISTORY_FILE: &str = ".compass/history.json";

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    decisions: Vec<DecisionRecord>,
}

/// Newest-first list of recorded decisions backed by a JSON file.
///
/// The list grows without bound unless `max_entries` is set.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: Option<usize>,
    records: Vec<DecisionRecord>,
}

impl HistoryStore {
    pub fn load(path: &Path, max_entries: Option<usize>) -> Result<Self> {
        let records = if path.exists() {
            let content = fs::read_to_string(path)?;
            let file: HistoryFile = serde_json::from_str(&content).map_err(|e| {
                CompassError::History(format!("{}: {}", path.display(), e))
            })?;
            if file.version != HISTORY_VERSION {
                return Err(CompassError::History(format!(
                    "unsupported history version {} in {}",
                    file.version,
                    path.display()
                )));
            }
            file.decisions
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), entries = records.len(), "loaded history");

        Ok(Self {
            path: path.to_path_buf(),
            max_entries,
            records,
        })
    }

    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, decision: Decision) -> Result<DecisionRecord> {
        let date = Utc::now().to_rfc3339();
        let id = record_id(&date, &decision)?;
        let record = DecisionRecord { id, date, decision };

        self.records.insert(0, record.clone());
        if let Some(max_entries) = self.max_entries {
            self.records.truncate(max_entries);
        }
        self.save()?;
        info!(id = %record.id, kind = %record.decision.kind(), "recorded decision");
        Ok(record)
    }

    /// Deletes the history file without parsing it.
    pub fn clear(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(CompassError::Io(e)),
        }
        info!(path = %path.display(), "cleared history");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(CompassError::Io)?;
        }
        let file = HistoryFile {
            version: HISTORY_VERSION,
            decisions: self.records.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json).map_err(CompassError::Io)?;
        Ok(())
    }
}

fn record_id(date: &str, decision: &Decision) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(date.as_bytes());
    hasher.update(serde_json::to_vec(decision)?);
    let digest = hasher.finalize();
    Ok(digest
        .iter()
        .take(8)
        .map(|byte| format!("{byte:02x}"))
        .collect())
}
