use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod pages;
pub(crate) mod posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(posts::router())
        .merge(pages::router())
}
