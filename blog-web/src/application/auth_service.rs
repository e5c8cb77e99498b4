use async_trait::async_trait;
use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric};
use tracing::{debug, info};

use crate::application::guard::SessionGuard;
use crate::data::session_repository::SessionRepository;
use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::session::{SessionRecord, SessionToken};
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordHasher;

const SESSION_ID_LEN: usize = 32;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) session: SessionToken,
}

pub(crate) struct AuthService<U: UserRepository, S: SessionRepository> {
    users: U,
    sessions: S,
    jwt: JwtService,
    hasher: PasswordHasher,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub(crate) fn new(users: U, sessions: S, jwt: JwtService, hasher: PasswordHasher) -> Self {
        Self {
            users,
            sessions,
            jwt,
            hasher,
        }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }

        let password_digest = self
            .hasher
            .hash(&req.password)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        let user = self
            .users
            .create_user(Self::into_new_user(req, password_digest))
            .await?;
        info!(user_id = user.id, role = %user.role, "user registered");

        let session = self.open_session(&user).await?;
        Ok(AuthResult { user, session })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let creds = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(DomainError::UnknownEmail)?;

        let matches = self
            .hasher
            .verify(&creds.password_digest, &req.password)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        if !matches {
            debug!(user_id = creds.user.id, "wrong password");
            return Err(DomainError::BadPassword);
        }

        let session = self.open_session(&creds.user).await?;
        info!(user_id = creds.user.id, "user logged in");
        Ok(AuthResult {
            user: creds.user,
            session,
        })
    }

    /// Drops the server-side session. Unknown or malformed tokens are ignored.
    pub(crate) async fn logout(&self, session: Option<&SessionToken>) -> Result<(), DomainError> {
        let Some(token) = session else {
            return Ok(());
        };
        let Ok(claims) = self.jwt.verify_token(token.as_str()) else {
            return Ok(());
        };
        if self.sessions.delete_session(&claims.sid).await? {
            info!(user_id = claims.user_id, "user logged out");
        }
        Ok(())
    }

    pub(crate) fn into_new_user(req: RegisterRequest, password_digest: String) -> NewUser {
        NewUser {
            name: req.name,
            email: req.email,
            password_digest,
        }
    }

    async fn open_session(&self, user: &User) -> Result<SessionToken, DomainError> {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LEN)
            .map(char::from)
            .collect();
        let expires_at = Utc::now().timestamp() + self.jwt.ttl_seconds();

        let token = self
            .jwt
            .generate_token(&id, user.id, expires_at)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        self.sessions
            .create_session(SessionRecord {
                id,
                user_id: user.id,
                expires_at,
            })
            .await?;

        Ok(SessionToken::new(token))
    }
}

#[async_trait]
impl<U: UserRepository, S: SessionRepository> SessionGuard for AuthService<U, S> {
    async fn current_user(
        &self,
        session: Option<&SessionToken>,
    ) -> Result<Option<User>, DomainError> {
        let Some(token) = session else {
            return Ok(None);
        };
        let claims = match self.jwt.verify_token(token.as_str()) {
            Ok(claims) => claims,
            Err(err) => {
                debug!(error = %err, "ignoring invalid session token");
                return Ok(None);
            }
        };

        let Some(record) = self.sessions.find_session(&claims.sid).await? else {
            return Ok(None);
        };
        if record.user_id != claims.user_id {
            return Ok(None);
        }
        if record.is_expired(Utc::now().timestamp()) {
            self.sessions.delete_session(&record.id).await?;
            return Ok(None);
        }

        self.users.find_by_id(record.user_id).await
    }
}
