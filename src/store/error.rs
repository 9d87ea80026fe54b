/// Errors produced by the store layer. The first four are domain outcomes that callers turn into
/// client status codes, the rest are storage faults.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Account already exists")]
    AccountExists,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Database connection lock was poisoned")]
    LockPoisoned,
}

pub(crate) type Result<T> = std::result::Result<T, StoreError>;
