//! Business rules for accounts and messages.
//!
//! Each operation returns an [`Outcome`]. Storage failures are logged here
//! and folded into the same outcome a rule violation or a miss would give.

mod accounts;
mod messages;

pub use accounts::AccountService;
pub use messages::MessageService;

use thiserror::Error;

use crate::models::MAX_MESSAGE_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Invalid(Rejection),
    Unauthorized,
    Absent,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Why a request was turned down as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("username is blank")]
    BlankUsername,
    #[error("password is too short")]
    PasswordTooShort,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("message text is blank")]
    BlankText,
    #[error("message text is too long")]
    TextTooLong,
    #[error("posted_by does not refer to an existing account")]
    UnknownAuthor,
    #[error("message does not exist")]
    MessageNotFound,
    #[error("storage backend failed")]
    Backend,
}

/// Message text must be non-empty and at most [`MAX_MESSAGE_LEN`] characters.
pub(crate) fn check_text(text: &str) -> Result<(), Rejection> {
    if text.is_empty() {
        return Err(Rejection::BlankText);
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(Rejection::TextTooLong);
    }
    Ok(())
}
