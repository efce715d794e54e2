use crate::config::Config;
use crate::db::Store;
use crate::services::{BackupService, DefaultBackupService};
use std::path::Path;

pub async fn cmd_backup(config: &Config, file: &Path, db: Option<&str>) -> anyhow::Result<()> {
    let db_url = db.unwrap_or(&config.general.database_path);
    let store = Store::new(db_url).await?;
    let service = DefaultBackupService::new(store);

    let summary = service.create(file).await?;

    println!("Snapshot written to: {}", summary.path.display());
    println!(
        "  {} entries, {} categories, {} preferences",
        summary.entries, summary.categories, summary.preferences
    );

    Ok(())
}
