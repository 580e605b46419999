//! Startup song list: parsed once, counted by `/count`, and optionally used
//! to reseed the collection.

use super::SongStore;
use crate::models::Song;
use service_core::error::AppError;
use std::path::Path;

/// Catalog shipped with the binary.
pub const BUNDLED_SONGS: &str = include_str!("../../data/songs.json");

pub fn parse_songs(raw: &str) -> Result<Vec<Song>, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::SeedDataError(anyhow::anyhow!("songs data is not a JSON array of songs: {}", e))
    })
}

/// Reads the seed list from `path`, or the bundled catalog when `None`.
pub async fn load_songs(path: Option<&Path>) -> Result<Vec<Song>, AppError> {
    let songs = match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
                tracing::error!("Failed to read songs data at {}: {}", path.display(), e);
                AppError::SeedDataError(anyhow::anyhow!("cannot read {}: {}", path.display(), e))
            })?;
            parse_songs(&raw)?
        }
        None => parse_songs(BUNDLED_SONGS)?,
    };

    tracing::info!(count = songs.len(), "Loaded seed songs");
    Ok(songs)
}

/// Drops every stored song and inserts `songs`. Destructive.
pub async fn reseed(store: &dyn SongStore, songs: &[Song]) -> Result<(), AppError> {
    tracing::warn!(count = songs.len(), "Dropping songs collection and reseeding");
    store
        .replace_all(songs)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("failed to reseed songs: {}", e)))
}
