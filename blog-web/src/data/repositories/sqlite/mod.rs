use sqlx::error::ErrorKind;

pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod session_repository;
pub(crate) mod user_repository;

/// Constraint class of a database error, if it is one.
fn constraint_kind(err: &sqlx::Error) -> Option<ErrorKind> {
    match err {
        sqlx::Error::Database(db_err) => Some(db_err.kind()),
        _ => None,
    }
}
