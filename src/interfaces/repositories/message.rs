use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use crate::{
    entities::message::{Message, NewMessage},
    errors::AppError,
    repositories::json_file_repo::JsonFileMessageRepo,
};

#[derive(Debug, Clone, Serialize)]
pub struct StoreHealth {
    pub backend: &'static str,
    pub location: String,
    pub readable: bool,
    pub message_count: usize,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Assigns id and timestamp, then stores the message
    async fn append(&self, message: NewMessage) -> Result<Message, AppError>;

    /// All messages, newest first
    async fn list(&self) -> Result<Vec<Message>, AppError>;

    async fn set_read(&self, id: i64, read: bool) -> Result<Message, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn health(&self) -> StoreHealth;
}

/// Newest first by timestamp; equal timestamps fall back to the higher id.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}

/// Millisecond id for a new message, kept strictly above every existing id.
pub fn next_id(now_millis: i64, existing: &[Message]) -> i64 {
    let max_id = existing.iter().map(|m| m.id).max().unwrap_or(i64::MIN);
    now_millis.max(max_id.saturating_add(1))
}

fn message_not_found(id: i64) -> AppError {
    tracing::debug!(id, "Message not found");
    AppError::NotFound("Message not found".to_string())
}

#[async_trait]
impl MessageRepository for JsonFileMessageRepo {
    async fn append(&self, new_message: NewMessage) -> Result<Message, AppError> {
        let _guard = self.write_lock.lock().await;
        let existing = self.load_for_write().await;

        let now = Utc::now();
        let id = next_id(now.timestamp_millis(), existing.as_deref().unwrap_or_default());
        let message = new_message.into_message(id, now);

        match existing {
            Some(mut messages) => {
                messages.push(message.clone());
                self.persist(&messages).await;
                tracing::info!(id, subject = %message.subject, "Stored contact message");
            }
            None => {
                tracing::warn!(id, subject = %message.subject, "Store unreadable, contact message not persisted");
            }
        }

        Ok(message)
    }

    async fn list(&self) -> Result<Vec<Message>, AppError> {
        let mut messages = self.load().await;
        sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn set_read(&self, id: i64, read: bool) -> Result<Message, AppError> {
        let _guard = self.write_lock.lock().await;
        let Some(mut messages) = self.load_for_write().await else {
            return Err(message_not_found(id));
        };

        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| message_not_found(id))?;
        message.read = read;
        let updated = message.clone();

        self.persist(&messages).await;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let Some(mut messages) = self.load_for_write().await else {
            return Err(message_not_found(id));
        };

        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return Err(message_not_found(id));
        }

        self.persist(&messages).await;
        tracing::info!(id, "Deleted contact message");
        Ok(())
    }

    async fn health(&self) -> StoreHealth {
        let (readable, message_count) = match self.read_all().await {
            Ok(messages) => (true, messages.len()),
            Err(_) => (false, 0),
        };

        StoreHealth {
            backend: "json-file",
            location: self.path().display().to_string(),
            readable,
            message_count,
        }
    }
}
