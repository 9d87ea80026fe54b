use crate::store::error::{Result, StoreError};

/// StoreLimits bounds user input that reaches the store. Out-of-bounds input is rejected with
/// `BadRequest` before anything touches the database.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct StoreLimits {
    pub min_username_len: usize,
    pub max_username_len: usize,
    pub min_password_len: usize,
    pub max_password_len: usize,
    pub min_message_len: usize,
    pub max_message_len: usize,
    /// Number of delivered messages shown on a user's homepage.
    pub homepage_message_count: u32,
}

impl Default for StoreLimits {
    fn default() -> Self {
        StoreLimits {
            min_username_len: 1,
            max_username_len: 32,
            min_password_len: 1,
            max_password_len: 256,
            min_message_len: 1,
            max_message_len: 1024,
            homepage_message_count: 5,
        }
    }
}

impl StoreLimits {
    pub(crate) fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.min_username_len == 0 {
            return Err("Usernames must be non-empty");
        }
        if self.min_username_len > self.max_username_len {
            return Err("Minimum username length must not exceed the maximum");
        }
        if self.min_password_len > self.max_password_len {
            return Err("Minimum password length must not exceed the maximum");
        }
        if self.min_message_len > self.max_message_len {
            return Err("Minimum message length must not exceed the maximum");
        }

        Ok(())
    }

    pub(crate) fn check_username(&self, username: &str) -> Result<()> {
        check_len("username", username, self.min_username_len, self.max_username_len)
    }

    pub(crate) fn check_password(&self, password_hash: &str) -> Result<()> {
        check_len("password", password_hash, self.min_password_len, self.max_password_len)
    }

    pub(crate) fn check_message(&self, content: &str) -> Result<()> {
        check_len("message", content, self.min_message_len, self.max_message_len)
    }
}

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(StoreError::BadRequest(format!(
            "{} length {} is outside [{}, {}]",
            field, len, min, max
        )));
    }

    Ok(())
}
