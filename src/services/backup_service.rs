//! Domain service for snapshot backup and restore.
//!
//! Restore drives a decoded snapshot through reconciliation against the
//! live store, isolating failures per entry so one bad record does not
//! abort the whole run.

use crate::backup::codec::SnapshotCodecError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that fail a backup or restore outright. Per-entry problems are
/// not errors at this level; they land in [`RestoreReport::errors`].
#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotCodecError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for BackupError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// One recorded per-entry failure, in restore order.
#[derive(Debug, Clone)]
pub struct RestoreIssue {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Outcome of a restore run.
///
/// `completed` is false only when the run was cancelled; entries restored
/// before cancellation stay persisted, there is no rollback.
#[derive(Debug)]
pub struct RestoreReport {
    pub completed: bool,
    pub total_entries: usize,
    pub restored: usize,
    pub errors: Vec<RestoreIssue>,
}

/// Outcome of writing a snapshot file.
#[derive(Debug)]
pub struct BackupSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub categories: usize,
    pub preferences: usize,
}

#[async_trait::async_trait]
pub trait BackupService: Send + Sync {
    /// Restores a snapshot file into the live store.
    ///
    /// The cancellation token is polled once per entry: an in-flight entry
    /// finishes, remaining entries and the preference step are skipped, and
    /// the report comes back with `completed = false`.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::Snapshot` when the file cannot be read or
    /// decoded; the restore is then considered not started.
    async fn restore(
        &self,
        path: &Path,
        token: &CancellationToken,
        notifier: &dyn crate::backup::RestoreNotifier,
    ) -> Result<RestoreReport, BackupError>;

    /// Serializes the live store into a snapshot file at `path`.
    async fn create(&self, path: &Path) -> Result<BackupSummary, BackupError>;
}
