use crate::movie;
use crate::storage;

use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("storage is not available")]
    StorageUnavailable,
    #[error("storage failed: {0}")]
    Storage(#[from] storage::Error),
    #[error("request failed: {0}")]
    RequestFailed(Arc<reqwest::Error>),
    #[error("series not found: {0}")]
    SeriesNotFound(String),
    #[error("ordering not found: {0}")]
    OrderingNotFound(String),
    #[error("movie not found: {0}")]
    MovieNotFound(movie::Id),
    #[error("no poster listed for movie {0}")]
    PosterNotListed(movie::Id),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(Arc::new(error))
    }
}
