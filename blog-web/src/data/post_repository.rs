use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) draft: PostDraft,
    pub(crate) date: String,
    pub(crate) author_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) draft: PostDraft,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, DomainError>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    /// Removes the post together with its comments. `false` when no such post.
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
}
