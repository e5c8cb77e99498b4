use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::domain::session::SessionToken;

pub(crate) const SESSION_COOKIE: &str = "blog_session";

/// Session token carried by the request's cookie, if any.
///
/// The token is not checked here; services resolve it through the session
/// guard, so a stale cookie simply behaves as anonymous.
#[derive(Debug, Clone)]
pub(crate) struct CurrentSession(pub(crate) Option<SessionToken>);

impl CurrentSession {
    pub(crate) fn token(&self) -> Option<&SessionToken> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(SessionToken::new);
        Ok(CurrentSession(token))
    }
}

pub(crate) fn start_session(jar: CookieJar, token: &SessionToken, secure: bool) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, token.as_str().to_owned()))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax),
    )
}

pub(crate) fn end_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"))
}
