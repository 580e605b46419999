//! CRUD handlers for `/song`. Each performs at most one store mutation.

use crate::error::SongError;
use crate::models::{patch_from_body, patch_id, Song};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

const SONG_WITH_ID_NOT_FOUND: &str = "song with id not found";
const SONG_NOT_FOUND: &str = "song not found";

/// Non-integer ids never match a song route, so they read as not found.
fn song_id(path: Result<Path<i64>, PathRejection>, not_found: &'static str) -> Result<i64, SongError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected non-integer song id");
        SongError::NotFound(not_found)
    })
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, SongError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| SongError::InvalidInput(rejection.body_text()))
}

pub async fn list_songs(State(state): State<AppState>) -> Result<Json<Value>, SongError> {
    let songs = state
        .store
        .find_all()
        .await
        .map_err(SongError::store("Error retrieving songs"))?;

    Ok(Json(json!({ "songs": songs })))
}

pub async fn get_song(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Song>, SongError> {
    let id = song_id(path, SONG_WITH_ID_NOT_FOUND)?;

    state
        .store
        .find_by_id(id)
        .await
        .map_err(SongError::store("Error retrieving song"))?
        .map(Json)
        .ok_or(SongError::NotFound(SONG_WITH_ID_NOT_FOUND))
}

pub async fn create_song(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Song>), SongError> {
    let song = Song::from_body(json_body(body)?).map_err(SongError::InvalidInput)?;

    let existing = state
        .store
        .find_by_id(song.id)
        .await
        .map_err(SongError::store("Error creating song"))?;
    if existing.is_some() {
        tracing::info!(song_id = song.id, "Rejected duplicate song");
        return Err(SongError::AlreadyExists(song.id));
    }

    state
        .store
        .insert(&song)
        .await
        .map_err(SongError::store("Error creating song"))?;

    tracing::info!(song_id = song.id, "Created song");
    Ok((StatusCode::CREATED, Json(song)))
}

pub async fn update_song(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Song>, SongError> {
    let id = song_id(path, SONG_NOT_FOUND)?;
    let patch = patch_from_body(json_body(body)?).map_err(SongError::InvalidInput)?;

    // Renaming onto an id that is already taken would leave two songs sharing it.
    if let Some(new_id) = patch_id(&patch).filter(|new_id| *new_id != id) {
        let taken = state
            .store
            .find_by_id(new_id)
            .await
            .map_err(SongError::store("Error updating song"))?;
        if taken.is_some() {
            tracing::info!(song_id = id, new_id, "Rejected id change onto existing song");
            return Err(SongError::AlreadyExists(new_id));
        }
    }

    let updated = state
        .store
        .update_by_id(id, &patch)
        .await
        .map_err(SongError::store("Error updating song"))?
        .ok_or(SongError::NotFound(SONG_NOT_FOUND))?;

    tracing::info!(song_id = id, fields = patch.len(), "Updated song");
    Ok(Json(updated))
}

pub async fn delete_song(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, SongError> {
    let id = song_id(path, SONG_NOT_FOUND)?;

    let deleted = state
        .store
        .delete_by_id(id)
        .await
        .map_err(SongError::store("Error deleting song"))?;

    if deleted == 0 {
        return Err(SongError::NotFound(SONG_NOT_FOUND));
    }

    tracing::info!(song_id = id, "Deleted song");
    Ok(StatusCode::NO_CONTENT)
}
