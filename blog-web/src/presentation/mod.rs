use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::comment_service::CommentService;
use crate::data::repositories::sqlite::comment_repository::SqliteCommentRepository;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
use crate::data::repositories::sqlite::session_repository::SqliteSessionRepository;
use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordHasher;

pub(crate) mod app_error;
pub(crate) mod flash;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod routes;
pub(crate) mod views;


pub(crate) type AppAuthService = AuthService<SqliteUserRepository, SqliteSessionRepository>;
pub(crate) type AppBlogService = BlogService<SqlitePostRepository, AppAuthService>;
pub(crate) type AppCommentService =
    CommentService<SqliteCommentRepository, SqlitePostRepository, AppAuthService>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AppAuthService>,
    pub(crate) blog_service: Arc<AppBlogService>,
    pub(crate) comment_service: Arc<AppCommentService>,
    pub(crate) cookie_secure: bool,
}

impl AppState {
    pub(crate) fn new(
        pool: SqlitePool,
        jwt: JwtService,
        hasher: PasswordHasher,
        cookie_secure: bool,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            SqliteUserRepository::new(pool.clone()),
            SqliteSessionRepository::new(pool.clone()),
            jwt,
            hasher,
        ));
        let blog_service = Arc::new(BlogService::new(
            SqlitePostRepository::new(pool.clone()),
            Arc::clone(&auth_service),
        ));
        let comment_service = Arc::new(CommentService::new(
            SqliteCommentRepository::new(pool.clone()),
            SqlitePostRepository::new(pool),
            Arc::clone(&auth_service),
        ));

        Self {
            auth_service,
            blog_service,
            comment_service,
            cookie_secure,
        }
    }
}
