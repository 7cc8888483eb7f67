use common::FieldError;
use thiserror::Error;

/// Error types for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// One or more submitted fields failed validation; nothing was written
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Lookup by id (or username) found nothing
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Signup with a username that already exists
    #[error("That username is taken. Please choose a different one.")]
    UsernameTaken,

    /// Login was refused
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// Error from the password hasher
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Why a login attempt was refused. Each cause has its own message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("No user with that username. Please try again.")]
    UnknownUser,
    #[error("Password doesn't match. Please try again.")]
    PasswordMismatch,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
