use chrono::Utc;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use futures::future::join_all;
use sqlx::SqlitePool;
use std::error::Error;

use social_api::config::Config;
use social_api::db;
use social_api::models::{Credentials, NewMessage};
use social_api::service::{AccountService, MessageService, Outcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    println!("Starting data seeding...");

    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url, config.max_connections).await?;

    let num_accounts = count_from_env("SEED_ACCOUNTS", 100)?;
    let messages_per_account = count_from_env("SEED_MESSAGES", 20)?;

    let accounts = seed_accounts(&pool, num_accounts).await;
    seed_messages(&pool, &accounts, messages_per_account).await;

    println!("Seeding completed!");
    Ok(())
}

fn count_from_env(key: &str, default: usize) -> Result<usize, Box<dyn Error>> {
    match std::env::var(key) {
        Ok(raw) => Ok(raw.parse()?),
        Err(_) => Ok(default),
    }
}

async fn seed_accounts(pool: &SqlitePool, count: usize) -> Vec<i64> {
    println!("Creating {} accounts...", count);
    let service = AccountService::new(pool);
    let mut accounts = Vec::new();

    for i in 0..count {
        let username: String = Username().fake();
        let creds = Credentials {
            username: username.clone(),
            password: "password123".to_string(),
        };

        match service.register(creds).await {
            Outcome::Success(account) => {
                println!(
                    "Created account {}/{}: {} ({})",
                    i + 1,
                    count,
                    account.username,
                    account.account_id
                );
                accounts.push(account.account_id);
            }
            other => println!("Skipped {}: {:?}", username, other),
        }
    }

    accounts
}

async fn seed_messages(pool: &SqlitePool, accounts: &[i64], per_account: usize) {
    println!("Creating {} messages per account...", per_account);
    let service = MessageService::new(pool);
    let total = accounts.len() * per_account;
    let mut created = 0;

    for &account_id in accounts {
        let posts = (0..per_account).map(|_| {
            let text: String = Sentence(3..10).fake();
            service.create(NewMessage {
                posted_by: account_id,
                message_text: text,
                time_posted_epoch: Utc::now().timestamp(),
            })
        });

        created += join_all(posts)
            .await
            .into_iter()
            .filter(Outcome::is_success)
            .count();
        println!("Created {}/{} messages", created, total);
    }
}
