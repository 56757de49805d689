//! Credential validation, session tokens and the bearer guard.

pub mod error;
pub mod guard;
pub mod service;
pub mod token;
pub mod validator;

pub use error::AuthError;
pub use guard::require_bearer;
pub use service::{LoginRequest, RegisterRequest, Session, login, register};
pub use token::{Claims, DEFAULT_TOKEN_TTL, TokenError, TokenService};
