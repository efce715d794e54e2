//! Gzip + JSON codec for snapshot files.
//!
//! Decode is all-or-nothing: a malformed byte stream fails the whole
//! operation before any database work starts. File reads and compression
//! run on blocking threads.

use crate::backup::snapshot::Snapshot;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotCodecError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn decode(bytes: &[u8]) -> Result<Snapshot, SnapshotCodecError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut raw = Vec::new();
    decoder.read_to_end(&mut raw)?;

    Ok(serde_json::from_slice(&raw)?)
}

pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotCodecError> {
    let raw = serde_json::to_vec(snapshot)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    Ok(encoder.finish()?)
}

pub async fn read_from_file(path: &Path) -> Result<Snapshot, SnapshotCodecError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let bytes = std::fs::read(&path)?;
        decode(&bytes)
    })
    .await?
}

pub async fn write_to_file(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotCodecError> {
    let path = path.to_path_buf();
    let snapshot = snapshot.clone();
    tokio::task::spawn_blocking(move || {
        let bytes = encode(&snapshot)?;
        std::fs::write(&path, bytes)?;
        Ok(())
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::snapshot::{SnapshotCategory, SNAPSHOT_VERSION};

    fn sample() -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            categories: vec![SnapshotCategory {
                name: "Reading".to_string(),
                sort_order: 0,
                flags: 0,
            }],
            entries: vec![],
            sources: vec![],
            broken_sources: vec![],
            preferences: vec![],
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let bytes = encode(&sample()).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.version, SNAPSHOT_VERSION);
        assert_eq!(decoded.categories.len(), 1);
        assert_eq!(decoded.categories[0].name, "Reading");
    }

    #[test]
    fn test_garbage_bytes_fail_decode() {
        let err = decode(b"definitely not gzip").unwrap_err();
        assert!(matches!(err, SnapshotCodecError::Io(_)));
    }

    #[test]
    fn test_gzipped_non_json_fails_decode() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"{ not json").unwrap();
        let bytes = encoder.finish().unwrap();

        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotCodecError::Malformed(_)));
    }
}
