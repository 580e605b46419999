use crate::services::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure categories callers can branch on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    Transient,
    Internal,
}

/// Handler result error; its `IntoResponse` owns the status/body contract.
#[derive(Error, Debug)]
pub enum SongError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("song with id {0} already present")]
    AlreadyExists(i64),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Internal server error")]
    SeedUnavailable,
}

impl SongError {
    /// Adapter for `map_err`, tagging a store failure with what was being attempted.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> SongError {
        move |source| SongError::Store { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SongError::NotFound(_) => ErrorKind::NotFound,
            SongError::AlreadyExists(_) => ErrorKind::Conflict,
            SongError::InvalidInput(_) => ErrorKind::InvalidInput,
            SongError::Store { source, .. } if source.is_transient() => ErrorKind::Transient,
            SongError::Store { .. } | SongError::SeedUnavailable => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            // Duplicate ids answer 302 rather than 409; existing clients depend on it.
            ErrorKind::Conflict => StatusCode::FOUND,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Transient | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SongError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = ?self.kind(), "Song request failed");
        } else {
            tracing::debug!(error = %self, kind = ?self.kind(), "Song request rejected");
        }

        let body = match &self {
            SongError::AlreadyExists(_) => json!({ "Message": self.to_string() }),
            _ => json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
