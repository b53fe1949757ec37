use thiserror::Error;

use crate::account::policy::PolicyViolation;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    PolicyViolation(#[from] PolicyViolation),
    #[error("Invalid reset token")]
    InvalidToken,
    #[error("Reset token has expired")]
    TokenExpired,
    #[error("Password hashing failed")]
    HashingError,
    #[error("Database error: {0}")]
    DatabaseError(String),
}
