//! Snapshot loading for page and domain analysis records.
//!
//! A snapshot is the JSON the dashboard backend returns for one fetch:
//! `{ "pages": [...], "domains": [...] }`. Directories are walked in file
//! name order so repeated runs see records in the same order.

use crate::models::{null_as_default, DomainAnalysis, PageScore};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Page and domain records from one or more fetches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub pages: Vec<PageScore>,
    #[serde(deserialize_with = "null_as_default")]
    pub domains: Vec<DomainAnalysis>,
}

impl Snapshot {
    /// Append another snapshot's records after this one's.
    pub fn extend(&mut self, other: Snapshot) {
        self.pages.extend(other.pages);
        self.domains.extend(other.domains);
    }

    /// Whether there is nothing to aggregate.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.domains.is_empty()
    }
}

/// Load a snapshot file, or every `.json` snapshot under a directory.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if path.is_dir() {
        let mut snapshot = Snapshot::default();
        let files = snapshot_files(path);
        info!(
            "Loading {} snapshot files from {}",
            files.len(),
            path.display()
        );

        for file in files {
            snapshot.extend(read_json::<Snapshot>(&file)?);
        }
        Ok(snapshot)
    } else {
        read_json(path)
    }
}

/// Load a JSON array of page analyses.
pub fn load_pages(path: &Path) -> Result<Vec<PageScore>> {
    read_json(path)
}

/// Load a JSON array of domain analyses.
pub fn load_domains(path: &Path) -> Result<Vec<DomainAnalysis>> {
    read_json(path)
}

/// Snapshot files under `dir`, sorted by path. Hidden entries are skipped.
pub fn snapshot_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("json"))
        .collect()
}

fn is_hidden(name: Option<&str>) -> bool {
    name.map(|n| n.starts_with('.')).unwrap_or(false)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
