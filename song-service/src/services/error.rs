use mongodb::error::ErrorKind;
use thiserror::Error;

/// Failure reported by a [`SongStore`](super::SongStore) operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be reached: server selection, network I/O or a
    /// cleared connection pool.
    #[error("database unavailable: {0}")]
    Unavailable(anyhow::Error),

    /// The database answered with an error.
    #[error("{0}")]
    Query(anyhow::Error),

    #[error("stored document is not a valid song: {0}")]
    Malformed(String),

    #[error("failed to encode song: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("{0}")]
    Internal(anyhow::Error),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let transient = matches!(
            err.kind.as_ref(),
            ErrorKind::ServerSelection { .. }
                | ErrorKind::Io(_)
                | ErrorKind::ConnectionPoolCleared { .. }
        );

        if transient {
            StoreError::Unavailable(anyhow::Error::new(err))
        } else {
            StoreError::Query(anyhow::Error::new(err))
        }
    }
}
