use super::StoreError;
use crate::models::{Song, SongFields};
use async_trait::async_trait;

/// Id-keyed access to the song collection.
///
/// Each call is independent: no transactions, no retries. Implementations
/// must be shareable across request tasks.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Every stored song in the collection's natural order.
    async fn find_all(&self) -> Result<Vec<Song>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>, StoreError>;

    /// Unconditional insert. Callers check for an existing `id` first.
    async fn insert(&self, song: &Song) -> Result<(), StoreError>;

    /// Shallow-merges `fields` into the song matching `id` and returns the
    /// result, or `None` when nothing matched.
    async fn update_by_id(&self, id: i64, fields: &SongFields) -> Result<Option<Song>, StoreError>;

    /// Removes the song matching `id`, returning how many were deleted (0 or 1).
    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError>;

    /// Empties the collection and inserts `songs`.
    async fn replace_all(&self, songs: &[Song]) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
