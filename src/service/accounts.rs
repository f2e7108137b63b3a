use log::{debug, error, info};
use sqlx::SqlitePool;

use super::{Outcome, Rejection};
use crate::models::{Account, Credentials, MIN_PASSWORD_LEN};
use crate::store::AccountRepo;

pub struct AccountService<'a> {
    accounts: AccountRepo<'a>,
}

impl<'a> AccountService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            accounts: AccountRepo::new(pool),
        }
    }

    /// Register succeeds iff the username is non-empty, the password has at
    /// least [`MIN_PASSWORD_LEN`] characters and the username is not taken.
    ///
    /// The uniqueness check and the insert are separate statements; two
    /// concurrent registrations of one username can both pass.
    pub async fn register(&self, creds: Credentials) -> Outcome<Account> {
        if creds.username.is_empty() {
            return reject(Rejection::BlankUsername);
        }
        if creds.password.chars().count() < MIN_PASSWORD_LEN {
            return reject(Rejection::PasswordTooShort);
        }

        match self.accounts.find_by_username(&creds.username).await {
            Ok(Some(_)) => return reject(Rejection::UsernameTaken),
            Ok(None) => {}
            Err(e) => {
                error!("Failed to look up username {}: {}", creds.username, e);
                return Outcome::Invalid(Rejection::Backend);
            }
        }

        match self.accounts.insert(&creds).await {
            Ok(account) => {
                info!("Registered account {} ({})", account.account_id, account.username);
                Outcome::Success(account)
            }
            Err(e) => {
                error!("Failed to create account {}: {}", creds.username, e);
                Outcome::Invalid(Rejection::Backend)
            }
        }
    }

    pub async fn login(&self, creds: Credentials) -> Outcome<Account> {
        match self.accounts.find_by_credentials(&creds).await {
            Ok(Some(account)) => Outcome::Success(account),
            Ok(None) => {
                debug!("Rejected login for {}", creds.username);
                Outcome::Unauthorized
            }
            Err(e) => {
                error!("Failed to check credentials for {}: {}", creds.username, e);
                Outcome::Unauthorized
            }
        }
    }
}

fn reject<T>(reason: Rejection) -> Outcome<T> {
    debug!("Rejected registration: {}", reason);
    Outcome::Invalid(reason)
}
