use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::application::guard::SessionGuard;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::flash::take_flash;
use crate::presentation::middleware::auth::{CurrentSession, end_session, start_session};
use crate::presentation::views;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct RegisterForm {
    #[validate(length(min = 1, max = 100))]
    pub(crate) name: String,
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct LoginForm {
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 1, max = 128))]
    pub(crate) password: String,
}

pub(crate) async fn register_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, Html(views::register_form(flash)))
}

pub(crate) async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<(CookieJar, Redirect)> {
    form.validate()?;

    let req = RegisterRequest {
        name: form.name,
        email: form.email,
        password: form.password,
    };
    let result = state.auth_service.register(req).await?;

    Ok((
        start_session(jar, &result.session, state.cookie_secure),
        Redirect::to("/"),
    ))
}

pub(crate) async fn login_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, Html(views::login_form(flash)))
}

pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    form.validate()?;

    let req = LoginRequest {
        email: form.email,
        password: form.password,
    };
    let result = state.auth_service.login(req).await?;

    Ok((
        start_session(jar, &result.session, state.cookie_secure),
        Redirect::to("/"),
    ))
}

pub(crate) async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    state.auth_service.require_user(session.token()).await?;
    state.auth_service.logout(session.token()).await?;

    Ok((end_session(jar), Redirect::to("/")))
}
