//! Storage accessors for the `account` and `message` tables.
//!
//! Every accessor issues a single parameterized query and reports absence as
//! `None`, `false` or an empty list. Only engine failures surface as
//! [`StoreError`](crate::error::StoreError).

mod accounts;
mod messages;

pub use accounts::AccountRepo;
pub use messages::MessageRepo;
