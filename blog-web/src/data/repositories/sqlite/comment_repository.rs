use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::{FromRow, SqlitePool};

use super::constraint_kind;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

const SELECT_COMMENT: &str = r#"
    SELECT
        c.id,
        c.text,
        c.comment_author_id AS author_id,
        u.name AS author_name,
        c.post_ref AS post_id
    FROM comments c
    JOIN users u ON u.id = c.comment_author_id
"#;

#[derive(Debug, Clone)]
pub(crate) struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    text: String,
    author_id: i64,
    author_name: String,
    post_id: i64,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author_id: row.author_id,
            author_name: row.author_name,
            post_id: row.post_id,
        }
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_comment_db_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO comments (text, comment_author_id, post_ref)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(&input.text)
        .bind(input.author_id)
        .bind(input.post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_comment_db_error)?;

        let row = sqlx::query_as::<_, CommentRow>(&format!("{SELECT_COMMENT} WHERE c.id = ?1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_comment_db_error)?;
        tx.commit().await.map_err(map_comment_db_error)?;

        Ok(row.into())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{SELECT_COMMENT} WHERE c.post_ref = ?1 ORDER BY c.id ASC"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    match constraint_kind(&err) {
        Some(ErrorKind::ForeignKeyViolation) => DomainError::NotFound("post".to_string()),
        _ => DomainError::Unexpected(err.to_string()),
    }
}
