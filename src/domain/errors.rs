use super::models::RestaurantId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No restaurant with id {0}")]
    NotFound(RestaurantId),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored favorites are unreadable: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to fetch restaurants: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to persist favorites: {0}")]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Domain(DomainError::NotFound(_)))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
