use crate::backup::codec;
use std::path::Path;

pub async fn cmd_inspect(file: &Path) -> anyhow::Result<()> {
    let snapshot = codec::read_from_file(file).await?;

    let episodes: usize = snapshot.entries.iter().map(|e| e.episodes.len()).sum();
    let tracks: usize = snapshot.entries.iter().map(|e| e.tracks.len()).sum();
    let history: usize = snapshot
        .entries
        .iter()
        .map(|e| e.history.len() + e.broken_history.len())
        .sum();

    println!("Snapshot: {}", file.display());
    println!("  Version:     {}", snapshot.version);
    println!("  Entries:     {}", snapshot.entries.len());
    println!("  Episodes:    {episodes}");
    println!("  History:     {history}");
    println!("  Tracks:      {tracks}");
    println!("  Categories:  {}", snapshot.categories.len());
    println!(
        "  Sources:     {} (+{} legacy)",
        snapshot.sources.len(),
        snapshot.broken_sources.len()
    );
    println!("  Preferences: {}", snapshot.preferences.len());

    Ok(())
}
