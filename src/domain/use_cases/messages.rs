use crate::{
    entities::message::{Message, MessageQuery, MessageStats},
    errors::AppError,
    repositories::message::{MessageRepository, StoreHealth},
};

/// Admin inbox operations over the message store.
pub struct MessagesHandler<R>
where
    R: MessageRepository,
{
    pub message_repo: R,
}

impl<R> MessagesHandler<R>
where
    R: MessageRepository,
{
    pub fn new(message_repo: R) -> Self {
        MessagesHandler { message_repo }
    }

    /// Messages matching `query`, newest first
    pub async fn list_messages(&self, query: &MessageQuery) -> Result<Vec<Message>, AppError> {
        let messages = self.message_repo.list().await?;

        Ok(messages.into_iter().filter(|m| query.matches(m)).collect())
    }

    pub async fn stats(&self) -> Result<MessageStats, AppError> {
        let messages = self.message_repo.list().await?;
        Ok(MessageStats::from_messages(&messages))
    }

    pub async fn set_read(&self, id: i64, read: bool) -> Result<Message, AppError> {
        self.message_repo.set_read(id, read).await
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), AppError> {
        self.message_repo.delete(id).await
    }

    pub async fn store_health(&self) -> StoreHealth {
        self.message_repo.health().await
    }
}
