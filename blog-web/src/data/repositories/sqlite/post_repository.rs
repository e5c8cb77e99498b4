use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::constraint_kind;
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft};

const SELECT_POST: &str = r#"
    SELECT
        p.id,
        p.title,
        p.subtitle,
        p.body,
        p.img_url,
        p.date,
        p.author_id,
        u.name AS author_name
    FROM blog_posts p
    JOIN users u ON u.id = p.author_id
"#;

#[derive(Debug, Clone)]
pub(crate) struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    subtitle: String,
    body: String,
    img_url: String,
    date: String,
    author_id: i64,
    author_name: String,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO blog_posts (author_id, title, subtitle, date, body, img_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id
            "#,
        )
        .bind(input.author_id)
        .bind(&input.draft.title)
        .bind(&input.draft.subtitle)
        .bind(&input.date)
        .bind(&input.draft.body)
        .bind(&input.draft.img_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        let post = fetch_post(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::Unexpected(format!("inserted post {id} vanished")))?;
        tx.commit().await.map_err(map_post_db_error)?;

        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut conn = self.pool.acquire().await.map_err(map_post_db_error)?;
        fetch_post(&mut conn, id).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE p.title = ?1"))
            .bind(title)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = ?2,
                subtitle = ?3,
                body = ?4,
                img_url = ?5,
                author_id = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&patch.draft.title)
        .bind(&patch.draft.subtitle)
        .bind(&patch.draft.body)
        .bind(&patch.draft.img_url)
        .bind(patch.author_id)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let post = fetch_post(&mut tx, id).await?;
        tx.commit().await.map_err(map_post_db_error)?;
        Ok(post)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_delete_db_error)?;

        // comments reference the post without ON DELETE CASCADE
        sqlx::query("DELETE FROM comments WHERE post_ref = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_delete_db_error)?;

        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_delete_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }
        tx.commit().await.map_err(map_delete_db_error)?;
        Ok(true)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} ORDER BY p.id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

async fn fetch_post(conn: &mut SqliteConnection, id: i64) -> Result<Option<Post>, DomainError> {
    let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE p.id = ?1"))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(map_post_db_error)?;

    row.map(map_row_to_post).transpose()
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let draft = PostDraft {
        title: row.title,
        subtitle: row.subtitle,
        body: row.body,
        img_url: row.img_url,
    };
    Post::new(row.id, draft, row.date, row.author_id, row.author_name)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    match constraint_kind(&err) {
        Some(ErrorKind::UniqueViolation) => DomainError::DuplicateTitle,
        Some(ErrorKind::ForeignKeyViolation) => DomainError::NotFound("author".to_string()),
        _ => DomainError::Unexpected(err.to_string()),
    }
}

fn map_delete_db_error(err: sqlx::Error) -> DomainError {
    match constraint_kind(&err) {
        Some(ErrorKind::ForeignKeyViolation) => DomainError::IntegrityError(err.to_string()),
        _ => DomainError::Unexpected(err.to_string()),
    }
}
