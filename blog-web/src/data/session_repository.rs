use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::session::SessionRecord;

#[async_trait]
pub(crate) trait SessionRepository: Send + Sync {
    async fn create_session(&self, record: SessionRecord) -> Result<(), DomainError>;
    async fn find_session(&self, id: &str) -> Result<Option<SessionRecord>, DomainError>;
    async fn delete_session(&self, id: &str) -> Result<bool, DomainError>;
}
