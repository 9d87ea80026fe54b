use crate::store::StoreError;

/// StatusCode is the outcome of every client call, carried in the reply's `status` field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    BadRequest,
    AccountExists,
    InvalidCredentials,
    AccountNotFound,
    DatabaseError,
    MessageSendFailure,
}

impl StatusCode {
    pub fn code(self) -> i32 {
        match self {
            StatusCode::Success => 200,
            StatusCode::BadRequest => 4000,
            StatusCode::AccountExists => 4001,
            StatusCode::InvalidCredentials => 4002,
            StatusCode::AccountNotFound => 4041,
            StatusCode::DatabaseError => 5000,
            StatusCode::MessageSendFailure => 5001,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        let status = match code {
            200 => StatusCode::Success,
            4000 => StatusCode::BadRequest,
            4001 => StatusCode::AccountExists,
            4002 => StatusCode::InvalidCredentials,
            4041 => StatusCode::AccountNotFound,
            5000 => StatusCode::DatabaseError,
            5001 => StatusCode::MessageSendFailure,
            _ => return None,
        };
        Some(status)
    }
}

impl From<&StoreError> for StatusCode {
    fn from(e: &StoreError) -> Self {
        match e {
            StoreError::BadRequest(_) => StatusCode::BadRequest,
            StoreError::AccountExists => StatusCode::AccountExists,
            StoreError::AccountNotFound => StatusCode::AccountNotFound,
            StoreError::InvalidCredentials => StatusCode::InvalidCredentials,
            StoreError::Sqlite(_) | StoreError::Migration(_) | StoreError::LockPoisoned => StatusCode::DatabaseError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_wire_taxonomy() {
        assert_eq!(StatusCode::Success.code(), 200);
        assert_eq!(StatusCode::AccountNotFound.code(), 4041);
        assert_eq!(StatusCode::MessageSendFailure.code(), 5001);
        assert_eq!(StatusCode::from_code(4002), Some(StatusCode::InvalidCredentials));
        assert_eq!(StatusCode::from_code(4040), None);
    }

    #[test]
    fn store_errors_map_to_status() {
        assert_eq!(StatusCode::from(&StoreError::AccountExists), StatusCode::AccountExists);
        assert_eq!(
            StatusCode::from(&StoreError::BadRequest("too long".into())),
            StatusCode::BadRequest
        );
        assert_eq!(StatusCode::from(&StoreError::LockPoisoned), StatusCode::DatabaseError);
    }
}
