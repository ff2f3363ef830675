//! Deployment artifact persistence.
//!
//! Artifacts live in `<output_dir>/<env_scope>/` and are numbered
//! sequentially: `uniBootstrap<N>.json` for full deployments and
//! `uniLiquid<N>.json` for liquidity-only runs. The next number is
//! always one past the highest present, gaps are never filled.
//!
//! Sequencing is not atomic: two processes writing into the same
//! scope can compute the same next index and overwrite each other.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::types::Deployment;

/// Artifact series sharing the numbering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Deployment,
    Liquidity,
}

impl ArtifactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Deployment => "uniBootstrap",
            ArtifactKind::Liquidity => "uniLiquid",
        }
    }

    /// Index embedded in `file_name`, if it belongs to this series.
    pub fn index_of(&self, file_name: &str) -> Option<u64> {
        let digits = file_name.strip_prefix(self.prefix())?.strip_suffix(".json")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    pub fn file_name(&self, index: u64) -> String {
        format!("{}{index}.json", self.prefix())
    }
}

/// On-disk shape of a saved artifact.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactRecord<'a> {
    deployment: &'a serde_json::Value,
    signed_txs: &'a [String],
    saved_at: DateTime<Utc>,
}

/// Resolves artifact paths inside one environment scope.
#[derive(Debug, Clone)]
pub struct ArtifactSequencer {
    dir: PathBuf,
}

impl ArtifactSequencer {
    pub fn new(output_dir: impl AsRef<Path>, env_scope: &str) -> Self {
        Self {
            dir: output_dir.as_ref().join(env_scope),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifacts present for `kind` as `(index, path)`, ascending by index.
    /// Paths are the directory entries as found, so zero-padded names
    /// resolve to the file actually on disk. A missing directory is empty.
    pub fn artifacts(&self, kind: ArtifactKind) -> Result<Vec<(u64, PathBuf)>> {
        if !self.dir.exists() {
            debug!(dir = %self.dir.display(), "Artifact directory does not exist yet");
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read artifact directory {}", self.dir.display()))?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read artifact directory entry")?;
            if let Some(index) = entry.file_name().to_str().and_then(|n| kind.index_of(n)) {
                found.push((index, entry.path()));
            }
        }
        found.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        Ok(found)
    }

    /// Indices present for `kind`, ascending.
    pub fn indices(&self, kind: ArtifactKind) -> Result<Vec<u64>> {
        Ok(self.artifacts(kind)?.into_iter().map(|(i, _)| i).collect())
    }

    /// Highest-numbered deployment artifact, if any.
    pub fn resolve_existing(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .artifacts(ArtifactKind::Deployment)?
            .pop()
            .map(|(_, path)| path))
    }

    /// Path for the next artifact of `kind`: highest index plus one, or 0.
    pub fn resolve_next(&self, kind: ArtifactKind) -> Result<PathBuf> {
        let next = match self.indices(kind)?.last() {
            Some(&last) => last.checked_add(1).with_context(|| {
                format!(
                    "No {} index left after {last} in {}",
                    kind.prefix(),
                    self.dir.display()
                )
            })?,
            None => 0,
        };
        Ok(self.dir.join(kind.file_name(next)))
    }

    /// Write `deployment` to `path`, creating the scope directory if needed.
    pub fn save_deployment(&self, path: &Path, deployment: &Deployment) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let record = ArtifactRecord {
            deployment: &deployment.deployment,
            signed_txs: &deployment.signed_txs,
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record).context("Failed to serialise deployment")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write deployment to {}", path.display()))?;

        info!(
            path = %path.display(),
            signed_txs = deployment.signed_txs.len(),
            "Deployment saved"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
