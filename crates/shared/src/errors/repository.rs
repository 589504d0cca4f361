use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if matches!(err, SqlxError::RowNotFound) {
            return RepositoryError::NotFound;
        }

        if let SqlxError::Database(ref db_err) = err {
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    return RepositoryError::AlreadyExists(db_err.message().to_string());
                }
                // foreign_key_violation
                Some("23503") => {
                    return RepositoryError::ForeignKey(db_err.message().to_string());
                }
                _ => {}
            }
        }

        RepositoryError::Sqlx(err)
    }
}
