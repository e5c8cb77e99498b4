use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("no account with that email")]
    UnknownEmail,

    #[error("wrong password")]
    BadPassword,

    #[error("forbidden")]
    Forbidden,

    #[error("authentication required")]
    Unauthenticated,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("post title already exists")]
    DuplicateTitle,

    #[error("comment text must not be empty")]
    EmptyText,

    #[error("integrity violation: {0}")]
    IntegrityError(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
