use sqlx::Error as SqlxError;
use thiserror::Error;

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}

impl RepositoryError {
    /// Classifies constraint violations so callers can report them as client errors.
    pub fn from_constraint(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => return RepositoryError::AlreadyExists(constraint),
                Some(PG_FOREIGN_KEY_VIOLATION) => return RepositoryError::ForeignKey(constraint),
                _ => {}
            }
        }

        if matches!(err, SqlxError::RowNotFound) {
            return RepositoryError::NotFound;
        }

        RepositoryError::Sqlx(err)
    }
}
