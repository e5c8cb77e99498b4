use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::session::SessionToken;
use crate::domain::user::{AdminUser, User};

/// Resolves a session to a user and gates operations on it.
///
/// Services call one of the `require_*` guards before touching storage, so a
/// rejected caller never causes side effects.
#[async_trait]
pub(crate) trait SessionGuard: Send + Sync {
    async fn current_user(
        &self,
        session: Option<&SessionToken>,
    ) -> Result<Option<User>, DomainError>;

    async fn require_user(&self, session: Option<&SessionToken>) -> Result<User, DomainError> {
        match self.current_user(session).await? {
            Some(user) => Ok(user),
            None => {
                debug!("rejected anonymous caller");
                Err(DomainError::Unauthenticated)
            }
        }
    }

    async fn require_admin(
        &self,
        session: Option<&SessionToken>,
    ) -> Result<AdminUser, DomainError> {
        let Some(user) = self.current_user(session).await? else {
            debug!("rejected anonymous caller for admin operation");
            return Err(DomainError::Forbidden);
        };
        let user_id = user.id;
        AdminUser::try_from(user).inspect_err(|_| {
            debug!(user_id, "rejected non-admin caller");
        })
    }
}
