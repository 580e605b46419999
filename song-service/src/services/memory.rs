use super::{SongStore, StoreError};
use crate::models::{Song, SongFields};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// Process-local [`SongStore`] backed by a `Vec`, preserving insertion order.
///
/// Mirrors the MongoDB adapter's semantics (including the lack of a unique
/// constraint on `id`) so handlers can be exercised without a database.
#[derive(Debug, Default)]
pub struct InMemorySongStore {
    songs: Mutex<Vec<Song>>,
}

impl InMemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_songs(songs: Vec<Song>) -> Self {
        Self {
            songs: Mutex::new(songs),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Result<Vec<Song>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Song>>, StoreError> {
        self.songs
            .lock()
            .map_err(|e| StoreError::Internal(anyhow::anyhow!("In-memory song store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl SongStore for InMemorySongStore {
    async fn find_all(&self) -> Result<Vec<Song>, StoreError> {
        self.snapshot()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>, StoreError> {
        Ok(self.lock()?.iter().find(|song| song.id == id).cloned())
    }

    async fn insert(&self, song: &Song) -> Result<(), StoreError> {
        self.lock()?.push(song.clone());
        Ok(())
    }

    async fn update_by_id(&self, id: i64, fields: &SongFields) -> Result<Option<Song>, StoreError> {
        let mut songs = self.lock()?;
        let Some(song) = songs.iter_mut().find(|song| song.id == id) else {
            return Ok(None);
        };

        let mut updated = song.clone();
        updated.apply(fields).map_err(StoreError::Malformed)?;
        *song = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let mut songs = self.lock()?;
        match songs.iter().position(|song| song.id == id) {
            Some(index) => {
                songs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn replace_all(&self, songs: &[Song]) -> Result<(), StoreError> {
        *self.lock()? = songs.to_vec();
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
