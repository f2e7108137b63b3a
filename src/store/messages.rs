use log::debug;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{Message, NewMessage};

pub struct MessageRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new message and return it with its generated id.
    pub async fn insert(&self, new: &NewMessage) -> Result<Message, StoreError> {
        let message: Message = sqlx::query_as(
            "INSERT INTO message (posted_by, message_text, time_posted_epoch) \
             VALUES (?1, ?2, ?3) \
             RETURNING message_id, posted_by, message_text, time_posted_epoch",
        )
        .bind(new.posted_by)
        .bind(&new.message_text)
        .bind(new.time_posted_epoch)
        .fetch_one(self.pool)
        .await?;

        debug!("Inserted message {} by {}", message.message_id, message.posted_by);
        Ok(message)
    }

    pub async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let messages = sqlx::query_as(
            "SELECT message_id, posted_by, message_text, time_posted_epoch \
             FROM message ORDER BY message_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn find_by_id(&self, message_id: i64) -> Result<Option<Message>, StoreError> {
        let message = sqlx::query_as(
            "SELECT message_id, posted_by, message_text, time_posted_epoch \
             FROM message WHERE message_id = ?1",
        )
        .bind(message_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(message)
    }

    /// Returns `true` if a row was removed.
    pub async fn delete_by_id(&self, message_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM message WHERE message_id = ?1")
            .bind(message_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite `message_text` only. Returns `true` if a row was touched.
    pub async fn update_text(&self, message_id: i64, text: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE message SET message_text = ?1 WHERE message_id = ?2")
            .bind(text)
            .bind(message_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_author(&self, account_id: i64) -> Result<Vec<Message>, StoreError> {
        let messages = sqlx::query_as(
            "SELECT message_id, posted_by, message_text, time_posted_epoch \
             FROM message WHERE posted_by = ?1 ORDER BY message_id",
        )
        .bind(account_id)
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }
}
