use crate::errors::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    /// A referenced entity (user, product, order) does not exist.
    #[error("{0}")]
    InvalidReference(String),

    #[error("{0}")]
    Conflict(String),
}
