use axum::{extract::State, response::Html};

use crate::application::guard::SessionGuard;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::CurrentSession;
use crate::presentation::views;

pub(crate) async fn about(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Html<String>> {
    let viewer = state.auth_service.current_user(session.token()).await?;
    Ok(Html(views::about(viewer.as_ref())))
}

pub(crate) async fn contact(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Html<String>> {
    let viewer = state.auth_service.current_user(session.token()).await?;
    Ok(Html(views::contact(viewer.as_ref())))
}
