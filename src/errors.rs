use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Io(#[from] tokio::io::Error),

    #[error("Unexpected Error: {0}")]
    Custom(String),

    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    #[error(transparent)]
    RedisError(#[from] redis::RedisError),

    #[error(transparent)]
    DbPool(#[from] diesel_async::pooled_connection::deadpool::PoolError),

    #[error("Cache record not found: {0}")]
    NotFound(String),
}

/// Error messages for the API Responses
pub enum ErrorMessages {
    Unexpected,
    DB,
    InvalidCredentials,
    UsernameTaken,
    EmailTaken,
    InvalidToken,
}

// Use the ErrorMessages enum to display error messages for the API Responses
impl fmt::Display for ErrorMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ErrorMessages::Unexpected => "We encountered an unexpected error while processing your request.",
            ErrorMessages::DB => "An unforeseen database error has occurred. Kindly try again after some time.",
            ErrorMessages::InvalidCredentials => "Incorrect username or password.",
            ErrorMessages::UsernameTaken => "This username is already registered.",
            ErrorMessages::EmailTaken => "This email address is already registered.",
            ErrorMessages::InvalidToken => "Could not validate credentials.",
        };
        write!(f, "{message}")
    }
}
