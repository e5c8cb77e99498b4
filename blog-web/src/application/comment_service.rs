use std::sync::Arc;

use tracing::info;

use crate::application::guard::SessionGuard;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::PostRepository;
use crate::domain::comment::{Comment, normalize_comment_text};
use crate::domain::error::DomainError;
use crate::domain::session::SessionToken;

pub(crate) struct CommentService<C: CommentRepository, P: PostRepository, G: SessionGuard> {
    comments: C,
    posts: P,
    guard: Arc<G>,
}

impl<C: CommentRepository, P: PostRepository, G: SessionGuard> CommentService<C, P, G> {
    pub(crate) fn new(comments: C, posts: P, guard: Arc<G>) -> Self {
        Self {
            comments,
            posts,
            guard,
        }
    }

    pub(crate) async fn add_comment(
        &self,
        session: Option<&SessionToken>,
        post_id: i64,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let author = self.guard.require_user(session).await?;

        if self.posts.get_post(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        let text = normalize_comment_text(text)?;

        let comment = self
            .comments
            .create_comment(NewComment {
                text,
                author_id: author.id,
                post_id,
            })
            .await?;
        info!(comment_id = comment.id, post_id, author_id = author.id, "comment added");
        Ok(comment)
    }

    /// Comments on this post only, oldest first.
    pub(crate) async fn list_comments_for_post(
        &self,
        post_id: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        self.comments.list_for_post(post_id).await
    }
}
