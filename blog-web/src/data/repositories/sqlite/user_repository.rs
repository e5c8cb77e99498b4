use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::{FromRow, SqlitePool};

use super::constraint_kind;
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{Role, User};

#[derive(Debug, Clone)]
pub(crate) struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    password_digest: String,
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_digest, role)
            VALUES (
                ?1,
                ?2,
                ?3,
                CASE WHEN EXISTS (SELECT 1 FROM users) THEN 'member' ELSE 'admin' END
            )
            RETURNING id, name, email, role
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        map_row_to_user(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, name, email, role, password_digest
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        let Some(r) = row else {
            return Ok(None);
        };
        let user = map_row_to_user(UserRow {
            id: r.id,
            name: r.name,
            email: r.email,
            role: r.role,
        })?;
        Ok(Some(UserCredentials {
            user,
            password_digest: r.password_digest,
        }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    let role: Role = row
        .role
        .parse()
        .map_err(|err: DomainError| DomainError::Unexpected(err.to_string()))?;
    User::new(row.id, row.name, row.email, role)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if matches!(constraint_kind(&err), Some(ErrorKind::UniqueViolation)) {
        // the partial admin index is the only other unique constraint on users
        if err.to_string().contains("users.email") {
            return DomainError::DuplicateEmail;
        }
        return DomainError::IntegrityError(err.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
