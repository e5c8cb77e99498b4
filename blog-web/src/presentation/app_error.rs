use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;
use crate::presentation::flash::{Flash, set_flash};
use crate::presentation::views;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Sends the browser elsewhere with a one-shot message.
    #[error("redirect to {to}")]
    Redirect { to: String, flash: Flash },
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub(crate) fn redirect(to: impl Into<String>, flash: Flash) -> Self {
        AppError::Redirect {
            to: to.into(),
            flash,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Redirect { to, flash } => {
                return (set_flash(CookieJar::new(), flash), Redirect::to(&to)).into_response();
            }
            AppError::Domain(err) => match &err {
                DomainError::DuplicateEmail => {
                    return AppError::redirect("/login", Flash::AlreadyRegistered).into_response();
                }
                DomainError::UnknownEmail => {
                    return AppError::redirect("/login", Flash::UnknownEmail).into_response();
                }
                DomainError::BadPassword => {
                    return AppError::redirect("/login", Flash::WrongPassword).into_response();
                }
                DomainError::Unauthenticated => {
                    return AppError::redirect("/login", Flash::LoginRequired).into_response();
                }
                DomainError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not found".to_string()),
                DomainError::Validation { .. } | DomainError::EmptyText => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                DomainError::DuplicateTitle | DomainError::IntegrityError(_) => {
                    (StatusCode::CONFLICT, err.to_string())
                }
                DomainError::Unexpected(detail) => {
                    error!(%detail, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        (status, Html(views::error_page(status, &msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    fn status_of(err: DomainError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(status_of(DomainError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(DomainError::NotFound("post".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(DomainError::EmptyText), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::DuplicateTitle), StatusCode::CONFLICT);
        assert_eq!(
            status_of(DomainError::IntegrityError("fk".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::Unexpected("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn auth_errors_redirect_to_login_with_flash() {
        let response = AppError::from(DomainError::BadPassword).into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/login".as_slice())
        );
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("flash cookie must be set");
        assert!(cookie.starts_with("flash=wrong_password"));
    }
}
