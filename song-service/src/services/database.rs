use super::{SongStore, StoreError};
use crate::models::{Song, SongFields};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{FindOneAndUpdateOptions, FindOneOptions, FindOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

pub const SONGS_COLLECTION: &str = "songs";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Connects using a full connection string. `display_uri` is what gets
    /// logged, so credentials can be redacted by the caller.
    pub async fn connect(uri: &str, display_uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %display_uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", display_uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn songs(&self) -> Collection<Document> {
        self.db.collection(SONGS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

/// Projection that hides MongoDB's `_id` from everything we read back.
fn without_object_id() -> Document {
    doc! { "_id": 0 }
}

fn song_from_document(document: Document) -> Result<Song, StoreError> {
    let json = Bson::Document(document).into_relaxed_extjson();
    serde_json::from_value(json).map_err(|e| StoreError::Malformed(e.to_string()))
}

#[async_trait]
impl SongStore for MongoDb {
    async fn find_all(&self) -> Result<Vec<Song>, StoreError> {
        let options = FindOptions::builder()
            .projection(without_object_id())
            .build();

        let cursor = self.songs().find(None, options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        tracing::debug!(count = documents.len(), "Fetched songs");
        documents.into_iter().map(song_from_document).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>, StoreError> {
        let options = FindOneOptions::builder()
            .projection(without_object_id())
            .build();

        self.songs()
            .find_one(doc! { "id": id }, options)
            .await?
            .map(song_from_document)
            .transpose()
    }

    async fn insert(&self, song: &Song) -> Result<(), StoreError> {
        let document = mongodb::bson::to_document(song)?;
        self.songs().insert_one(document, None).await?;
        tracing::info!(song_id = song.id, "Inserted song");
        Ok(())
    }

    async fn update_by_id(&self, id: i64, fields: &SongFields) -> Result<Option<Song>, StoreError> {
        if fields.is_empty() {
            return self.find_by_id(id).await;
        }

        let set = mongodb::bson::to_document(fields)?;
        let options = FindOneAndUpdateOptions::builder()
            .projection(without_object_id())
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .songs()
            .find_one_and_update(doc! { "id": id }, doc! { "$set": set }, options)
            .await?;

        if updated.is_some() {
            tracing::info!(song_id = id, "Updated song");
        }
        updated.map(song_from_document).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let result = self.songs().delete_one(doc! { "id": id }, None).await?;
        tracing::info!(song_id = id, deleted = result.deleted_count, "Deleted song");
        Ok(result.deleted_count)
    }

    async fn replace_all(&self, songs: &[Song]) -> Result<(), StoreError> {
        let collection = self.songs();
        collection.drop(None).await?;

        if songs.is_empty() {
            tracing::warn!("Seed list is empty; songs collection left empty");
            return Ok(());
        }

        let documents = songs
            .iter()
            .map(mongodb::bson::to_document)
            .collect::<Result<Vec<_>, _>>()?;
        collection.insert_many(documents, None).await?;

        tracing::info!(count = songs.len(), "Reseeded songs collection");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }
}
