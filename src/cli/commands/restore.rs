use crate::backup::TracingNotifier;
use crate::config::Config;
use crate::db::Store;
use crate::services::{BackupService, DefaultBackupService};
use std::path::Path;
use tokio_util::sync::CancellationToken;

pub async fn cmd_restore(config: &Config, file: &Path, db: Option<&str>) -> anyhow::Result<()> {
    let db_url = db.unwrap_or(&config.general.database_path);
    let store = Store::new(db_url).await?;
    let service = DefaultBackupService::new(store);

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!("Cancelling after the current entry...");
                token.cancel();
            }
        });
    }

    println!("Restoring from: {}", file.display());
    let report = service.restore(file, &token, &TracingNotifier).await?;

    println!();
    if report.completed {
        println!(
            "Restore complete: {}/{} entries restored.",
            report.restored, report.total_entries
        );
    } else {
        println!(
            "Restore cancelled: {}/{} entries restored before stopping.",
            report.restored, report.total_entries
        );
    }

    if !report.errors.is_empty() {
        let limit = config.restore.error_display_limit;
        println!("{} entries failed:", report.errors.len());
        for issue in report.errors.iter().take(limit) {
            println!("  [{}] {}", issue.at.format("%H:%M:%S"), issue.message);
        }
        if report.errors.len() > limit {
            println!("  ... and {} more", report.errors.len() - limit);
        }
    }

    Ok(())
}
