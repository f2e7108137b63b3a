use log::{debug, error, info};
use sqlx::SqlitePool;

use super::{check_text, Outcome, Rejection};
use crate::models::{Message, MessagePatch, NewMessage};
use crate::store::{AccountRepo, MessageRepo};

pub struct MessageService<'a> {
    accounts: AccountRepo<'a>,
    messages: MessageRepo<'a>,
}

impl<'a> MessageService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            accounts: AccountRepo::new(pool),
            messages: MessageRepo::new(pool),
        }
    }

    /// Create succeeds iff the text passes the length rules and `posted_by`
    /// names an existing account.
    pub async fn create(&self, new: NewMessage) -> Outcome<Message> {
        if let Err(reason) = check_text(&new.message_text) {
            return reject(reason);
        }

        match self.accounts.find_by_id(new.posted_by).await {
            Ok(Some(_)) => {}
            Ok(None) => return reject(Rejection::UnknownAuthor),
            Err(e) => {
                error!("Failed to look up account {}: {}", new.posted_by, e);
                return Outcome::Invalid(Rejection::Backend);
            }
        }

        match self.messages.insert(&new).await {
            Ok(message) => {
                info!("Message created: {}", message.message_id);
                Outcome::Success(message)
            }
            Err(e) => {
                error!("Failed to create message: {}", e);
                Outcome::Invalid(Rejection::Backend)
            }
        }
    }

    pub async fn list_all(&self) -> Vec<Message> {
        self.messages.list_all().await.unwrap_or_else(|e| {
            error!("Failed to list messages: {}", e);
            Vec::new()
        })
    }

    pub async fn get(&self, message_id: i64) -> Outcome<Message> {
        match self.messages.find_by_id(message_id).await {
            Ok(Some(message)) => Outcome::Success(message),
            Ok(None) => Outcome::Absent,
            Err(e) => {
                error!("Failed to fetch message {}: {}", message_id, e);
                Outcome::Absent
            }
        }
    }

    /// Remove a message and hand back what it looked like before removal.
    pub async fn delete(&self, message_id: i64) -> Outcome<Message> {
        let snapshot = match self.get(message_id).await {
            Outcome::Success(message) => message,
            _ => return Outcome::Absent,
        };

        match self.messages.delete_by_id(message_id).await {
            Ok(true) => {
                info!("Message deleted: {}", message_id);
                Outcome::Success(snapshot)
            }
            Ok(false) => Outcome::Absent,
            Err(e) => {
                error!("Failed to delete message {}: {}", message_id, e);
                Outcome::Absent
            }
        }
    }

    /// Replace the text of an existing message and return the row as stored
    /// after the write.
    pub async fn update(&self, message_id: i64, patch: MessagePatch) -> Outcome<Message> {
        match self.messages.find_by_id(message_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return reject(Rejection::MessageNotFound),
            Err(e) => {
                error!("Failed to fetch message {}: {}", message_id, e);
                return Outcome::Invalid(Rejection::Backend);
            }
        }
        if let Err(reason) = check_text(&patch.message_text) {
            return reject(reason);
        }

        match self.messages.update_text(message_id, &patch.message_text).await {
            Ok(true) => {}
            // Deleted between the existence check and the write.
            Ok(false) => return reject(Rejection::MessageNotFound),
            Err(e) => {
                error!("Failed to update message {}: {}", message_id, e);
                return Outcome::Invalid(Rejection::Backend);
            }
        }

        match self.messages.find_by_id(message_id).await {
            Ok(Some(message)) => {
                info!("Message updated: {}", message_id);
                Outcome::Success(message)
            }
            Ok(None) => reject(Rejection::MessageNotFound),
            Err(e) => {
                error!("Failed to re-read message {}: {}", message_id, e);
                Outcome::Invalid(Rejection::Backend)
            }
        }
    }

    /// Messages posted by `account_id`. Unknown accounts simply have none.
    pub async fn list_by_account(&self, account_id: i64) -> Vec<Message> {
        self.messages
            .list_by_author(account_id)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to list messages for account {}: {}", account_id, e);
                Vec::new()
            })
    }
}

fn reject<T>(reason: Rejection) -> Outcome<T> {
    debug!("Rejected message request: {}", reason);
    Outcome::Invalid(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::Credentials;
    use crate::service::AccountService;

    async fn author(pool: &SqlitePool, username: &str) -> i64 {
        AccountService::new(pool)
            .register(Credentials {
                username: username.into(),
                password: "pass1".into(),
            })
            .await
            .success()
            .unwrap()
            .account_id
    }

    fn new_message(posted_by: i64, text: &str) -> NewMessage {
        NewMessage {
            posted_by,
            message_text: text.into(),
            time_posted_epoch: 1000,
        }
    }

    fn patch(text: &str) -> MessagePatch {
        MessagePatch {
            message_text: text.into(),
        }
    }

    #[tokio::test]
    async fn create_enforces_text_and_author_rules() {
        let pool = test_pool().await;
        let service = MessageService::new(&pool);
        let bob = author(&pool, "bob").await;

        assert_eq!(
            service.create(new_message(bob, "")).await,
            Outcome::Invalid(Rejection::BlankText)
        );
        assert_eq!(
            service.create(new_message(bob, &"x".repeat(256))).await,
            Outcome::Invalid(Rejection::TextTooLong)
        );
        assert_eq!(
            service.create(new_message(bob + 100, "hi")).await,
            Outcome::Invalid(Rejection::UnknownAuthor)
        );

        let created = service
            .create(new_message(bob, &"x".repeat(255)))
            .await
            .success()
            .unwrap();
        assert_eq!(created.posted_by, bob);
        assert_eq!(created.time_posted_epoch, 1000);
    }

    #[tokio::test]
    async fn missing_ids_are_absent() {
        let pool = test_pool().await;
        let service = MessageService::new(&pool);

        assert_eq!(service.get(77).await, Outcome::Absent);
        assert_eq!(service.delete(77).await, Outcome::Absent);
    }

    #[tokio::test]
    async fn delete_returns_snapshot_and_removes_row() {
        let pool = test_pool().await;
        let service = MessageService::new(&pool);
        let bob = author(&pool, "bob").await;
        let created = service.create(new_message(bob, "bye")).await.success().unwrap();

        assert_eq!(
            service.delete(created.message_id).await,
            Outcome::Success(created.clone())
        );
        assert_eq!(service.get(created.message_id).await, Outcome::Absent);
    }

    #[tokio::test]
    async fn update_rewrites_text_only() {
        let pool = test_pool().await;
        let service = MessageService::new(&pool);
        let bob = author(&pool, "bob").await;
        let created = service.create(new_message(bob, "hi")).await.success().unwrap();

        let updated = service
            .update(created.message_id, patch("hello"))
            .await
            .success()
            .unwrap();

        assert_eq!(updated.message_text, "hello");
        assert_eq!(updated.message_id, created.message_id);
        assert_eq!(updated.posted_by, created.posted_by);
        assert_eq!(updated.time_posted_epoch, created.time_posted_epoch);
        assert_eq!(service.get(created.message_id).await, Outcome::Success(updated));
    }

    #[tokio::test]
    async fn update_rejects_missing_message_and_bad_text() {
        let pool = test_pool().await;
        let service = MessageService::new(&pool);
        let bob = author(&pool, "bob").await;
        let created = service.create(new_message(bob, "hi")).await.success().unwrap();

        assert_eq!(
            service.update(created.message_id + 1, patch("hello")).await,
            Outcome::Invalid(Rejection::MessageNotFound)
        );
        assert_eq!(
            service.update(created.message_id, patch("")).await,
            Outcome::Invalid(Rejection::BlankText)
        );
        assert_eq!(
            service.update(created.message_id, patch(&"y".repeat(256))).await,
            Outcome::Invalid(Rejection::TextTooLong)
        );
        assert_eq!(
            service.get(created.message_id).await.success().unwrap().message_text,
            "hi"
        );
    }

    #[tokio::test]
    async fn listings_never_fail() {
        let pool = test_pool().await;
        let service = MessageService::new(&pool);
        let bob = author(&pool, "bob").await;
        let amy = author(&pool, "amy").await;
        service.create(new_message(bob, "one")).await;
        service.create(new_message(bob, "two")).await;

        assert_eq!(service.list_all().await.len(), 2);
        assert_eq!(service.list_by_account(bob).await.len(), 2);
        assert!(service.list_by_account(amy).await.is_empty());
        assert!(service.list_by_account(999).await.is_empty());

        sqlx::query("DROP TABLE message").execute(&pool).await.unwrap();
        assert!(service.list_all().await.is_empty());
        assert_eq!(service.get(1).await, Outcome::Absent);
    }

    #[tokio::test]
    async fn backend_failure_on_writes_maps_to_outcomes() {
        let pool = test_pool().await;
        let service = MessageService::new(&pool);
        let bob = author(&pool, "bob").await;
        sqlx::query("DROP TABLE message").execute(&pool).await.unwrap();

        assert_eq!(
            service.create(new_message(bob, "hi")).await,
            Outcome::Invalid(Rejection::Backend)
        );
        assert_eq!(
            service.update(1, patch("hello")).await,
            Outcome::Invalid(Rejection::Backend)
        );
        assert_eq!(service.delete(1).await, Outcome::Absent);
    }
}
