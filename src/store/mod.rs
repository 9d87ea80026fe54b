//! Durable, per-node copy of accounts and messages, backed by SQLite.
mod accounts;
mod error;
mod limits;
mod messages;
mod migrations;
mod models;
mod state_store;

pub(crate) use error::Result;
pub(crate) use error::StoreError;
pub use limits::StoreLimits;
pub(crate) use models::Account;
pub(crate) use models::ChatMessage;
pub(crate) use models::MailboxView;
pub(crate) use state_store::StateStore;

#[cfg(test)]
pub(crate) use state_store::test_utils;
