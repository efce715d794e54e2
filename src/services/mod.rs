pub mod backup_service;
pub mod backup_service_impl;

pub use backup_service::{BackupError, BackupService, BackupSummary, RestoreIssue, RestoreReport};
pub use backup_service_impl::DefaultBackupService;
