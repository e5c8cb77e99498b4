use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::pages::{about, contact};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/contact", get(contact))
}
