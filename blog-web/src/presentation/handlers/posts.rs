use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::application::guard::SessionGuard;
use crate::domain::error::DomainError;
use crate::domain::post::{PostDraft, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::flash::{Flash, take_flash};
use crate::presentation::middleware::auth::CurrentSession;
use crate::presentation::views;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct PostForm {
    #[validate(length(min = 1, max = 250))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 250))]
    pub(crate) subtitle: String,
    #[validate(length(min = 1, max = 250))]
    pub(crate) img_url: String,
    #[validate(length(min = 1))]
    pub(crate) body: String,
}

impl From<PostForm> for PostDraft {
    fn from(form: PostForm) -> Self {
        Self {
            title: form.title,
            subtitle: form.subtitle,
            body: form.body,
            img_url: form.img_url,
        }
    }
}

/// The edit form also carries the author, which an admin may reassign.
#[derive(Debug, Deserialize, Validate)]
pub(crate) struct EditPostForm {
    #[validate(length(min = 1, max = 250))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 250))]
    pub(crate) subtitle: String,
    #[validate(length(min = 1, max = 250))]
    pub(crate) img_url: String,
    #[validate(length(min = 1))]
    pub(crate) body: String,
    #[validate(range(min = 1))]
    pub(crate) author_id: i64,
}

impl From<EditPostForm> for UpdatePostRequest {
    fn from(form: EditPostForm) -> Self {
        Self {
            draft: PostDraft {
                title: form.title,
                subtitle: form.subtitle,
                body: form.body,
                img_url: form.img_url,
            },
            author_id: form.author_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CommentForm {
    #[validate(length(max = 5000))]
    pub(crate) comment_text: String,
}

fn post_not_found(post_id: i64) -> AppError {
    DomainError::NotFound(format!("post id: {post_id}")).into()
}

pub(crate) async fn index(
    State(state): State<AppState>,
    session: CurrentSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let viewer = state.auth_service.current_user(session.token()).await?;
    let posts = state.blog_service.list_posts().await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(views::index(&posts, viewer.as_ref(), flash))))
}

pub(crate) async fn show_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    session: CurrentSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let viewer = state
        .auth_service
        .current_user(session.token())
        .await?
        .ok_or_else(|| AppError::redirect("/login", Flash::LoginToViewPosts))?;

    let post = state
        .blog_service
        .get_post(post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;
    let comments = state.comment_service.list_comments_for_post(post_id).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(views::post_page(&post, &comments, &viewer, flash))))
}

pub(crate) async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    session: CurrentSession,
    Form(form): Form<CommentForm>,
) -> AppResult<Redirect> {
    form.validate()?;

    let back = format!("/post/{post_id}");
    match state
        .comment_service
        .add_comment(session.token(), post_id, &form.comment_text)
        .await
    {
        Ok(_) => Ok(Redirect::to(&back)),
        Err(DomainError::Unauthenticated) => {
            Err(AppError::redirect("/login", Flash::LoginToViewPosts))
        }
        Err(DomainError::EmptyText) => Err(AppError::redirect(back, Flash::EmptyComment)),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn new_post_page(
    State(state): State<AppState>,
    session: CurrentSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let admin = state.auth_service.require_admin(session.token()).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(views::post_form(None, admin.user(), flash))))
}

pub(crate) async fn create_post(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<PostForm>,
) -> AppResult<Redirect> {
    // members get 403 even when the form is malformed
    state.auth_service.require_admin(session.token()).await?;
    form.validate()?;

    match state
        .blog_service
        .create_post(session.token(), form.into())
        .await
    {
        Ok(_) => Ok(Redirect::to("/")),
        Err(DomainError::DuplicateTitle) => {
            Err(AppError::redirect("/new-post", Flash::DuplicateTitle))
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn edit_post_page(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    session: CurrentSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let admin = state.auth_service.require_admin(session.token()).await?;
    let post = state
        .blog_service
        .get_post(post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(views::post_form(Some(&post), admin.user(), flash))))
}

pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    session: CurrentSession,
    Form(form): Form<EditPostForm>,
) -> AppResult<Redirect> {
    state.auth_service.require_admin(session.token()).await?;
    form.validate()?;

    let post = state
        .blog_service
        .update_post(session.token(), post_id, form.into())
        .await?;
    Ok(Redirect::to(&format!("/post/{}", post.id)))
}

pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    session: CurrentSession,
) -> AppResult<Redirect> {
    state.blog_service.delete_post(session.token(), post_id).await?;
    Ok(Redirect::to("/"))
}
