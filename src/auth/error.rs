use super::token::TokenError;
use crate::store::StoreError;
use thiserror::Error;

pub const MSG_REGISTER_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_LOGIN_FIELDS_REQUIRED: &str = "Phone number and ID number are required";

/// Every way an auth request can fail. Mapped to HTTP in `api::error`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    MissingField(&'static str),
    #[error("Phone number must be in format 254xxxxxxxxx")]
    InvalidPhoneFormat,
    #[error("ID number must be 8 digits")]
    InvalidIdFormat,
    #[error("User with this phone number or ID already exists")]
    DuplicateKey,
    #[error("Invalid credentials")]
    CredentialsNotFound,
    #[error("missing bearer token")]
    TokenMissing,
    #[error("invalid token")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("internal error: {0:#}")]
    Internal(#[source] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => Self::DuplicateKey,
            StoreError::Database(e) => Self::Internal(anyhow::Error::new(e).context("user store")),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::TokenInvalid,
            TokenError::Expired => Self::TokenExpired,
            other => Self::Internal(anyhow::Error::new(other).context("token service")),
        }
    }
}
