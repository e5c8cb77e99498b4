use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use crate::data::session_repository::SessionRepository;
use crate::domain::error::DomainError;
use crate::domain::session::SessionRecord;

#[derive(Debug, Clone)]
pub(crate) struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    id: String,
    user_id: i64,
    expires_at: i64,
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create_session(&self, record: SessionRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, expires_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&record.id)
        .bind(record.user_id)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(())
    }

    async fn find_session(&self, id: &str) -> Result<Option<SessionRecord>, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, expires_at
            FROM sessions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(row.map(|r| SessionRecord {
            id: r.id,
            user_id: r.user_id,
            expires_at: r.expires_at,
        }))
    }

    async fn delete_session(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteSessionRepository;
    use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;
    use crate::data::session_repository::SessionRepository;
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::session::SessionRecord;
    use crate::infrastructure::database::memory_pool;

    #[tokio::test]
    async fn sessions_can_be_stored_found_and_deleted() {
        let pool = memory_pool().await;
        SqliteUserRepository::new(pool.clone())
            .create_user(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password_digest: "digest".to_string(),
            })
            .await
            .expect("seed user");
        let repo = SqliteSessionRepository::new(pool);

        repo.create_session(SessionRecord {
            id: "abc".to_string(),
            user_id: 1,
            expires_at: 2_000_000_000,
        })
        .await
        .expect("insert");

        let found = repo.find_session("abc").await.expect("query").expect("row");
        assert_eq!(found.user_id, 1);
        assert_eq!(found.expires_at, 2_000_000_000);

        assert!(repo.delete_session("abc").await.expect("delete"));
        assert!(!repo.delete_session("abc").await.expect("idempotent delete"));
        assert!(repo.find_session("abc").await.expect("query").is_none());
    }
}
