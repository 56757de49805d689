pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::login;

mod payload;
pub use self::payload::AuthPayload;

pub mod protected;
pub use self::protected::protected;

pub mod register;
pub use self::register::register;

pub mod root;

// common response types for the handlers
use crate::{auth::Session, store::PublicUser};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

impl AuthResponse {
    fn new(message: &str, session: Session) -> Self {
        Self {
            message: message.to_string(),
            token: session.token,
            user: session.user,
        }
    }
}
