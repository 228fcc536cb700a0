//! Snapshot cache for analysis results
//!
//! Stores the full analysis result as a JSON document under an
//! XDG-compliant cache directory, keyed by a hash of the source identifier.
//! The cache is best-effort: a missing or unreadable snapshot simply means
//! the analysis runs again.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fs_utils::{atomic_rename, cache_base_dir};
use crate::schema::{fnv1a_hash, AnalysisResult};

/// A persisted analysis result with provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Source identifier (repo URL or local path)
    pub source: String,

    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,

    /// The full analysis result
    pub result: AnalysisResult,
}

impl Snapshot {
    /// Wrap a result with provenance for persistence
    pub fn new(source: &str, result: AnalysisResult) -> Self {
        Self {
            source: source.to_string(),
            analyzed_at: Utc::now(),
            result,
        }
    }
}

/// Cache directory manager for one analysis source
pub struct CacheDir {
    /// Root of the cache for this source
    pub root: PathBuf,

    /// Source hash (for identification)
    pub source_hash: String,
}

impl CacheDir {
    /// Locate the cache directory for a source identifier
    pub fn for_source(source_id: &str) -> Self {
        let source_hash = format!("{:016x}", fnv1a_hash(source_id));
        let root = cache_base_dir().join(&source_hash);
        Self { root, source_hash }
    }

    /// Path to the snapshot document
    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join("analysis.json")
    }

    /// Whether a snapshot exists for this source
    pub fn exists(&self) -> bool {
        self.snapshot_path().exists()
    }

    /// Persist a snapshot atomically (write to temp file, then rename)
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.root.join("analysis.json.tmp");
        fs::write(&tmp, json)?;
        atomic_rename(&tmp, &self.snapshot_path())?;

        Ok(())
    }

    /// Load the snapshot for this source
    pub fn load(&self) -> Result<Snapshot> {
        let json = fs::read_to_string(self.snapshot_path())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Remove this source's cache directory
    pub fn clear(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}
