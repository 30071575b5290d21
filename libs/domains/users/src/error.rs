use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures reported by a [`crate::UserRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A lookup by id matched no row
    #[error("No user with id {0}")]
    NotFound(i32),

    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures returned by [`crate::UserService`].
#[derive(Debug, Error)]
pub enum UserError {
    /// The id looked up by `find_one` or `update` does not exist
    #[error("User not found")]
    NotFound,

    /// Any other repository failure, passed through untouched
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UserError {
    /// Translate the outcome of a lookup by id: a missing row becomes
    /// [`UserError::NotFound`], anything else passes through.
    pub fn from_lookup(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => UserError::NotFound,
            other => UserError::Repository(other),
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound | UserError::Repository(RepositoryError::NotFound(_)) => {
                AppError::NotFound(UserError::NotFound.to_string())
            }
            UserError::Repository(RepositoryError::Database(e)) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
