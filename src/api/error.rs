//! HTTP mapping for [`AuthError`]. Every handler funnels failures through here.

use crate::auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug)]
pub struct ErrorResponse {
    pub message: String,
}

impl AuthError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::InvalidPhoneFormat
            | Self::InvalidIdFormat
            | Self::DuplicateKey => StatusCode::BAD_REQUEST,
            Self::CredentialsNotFound | Self::TokenMissing => StatusCode::UNAUTHORIZED,
            Self::TokenInvalid | Self::TokenExpired => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the client. Internal detail never leaves the process.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::TokenMissing => "Unauthorized".to_string(),
            Self::TokenInvalid | Self::TokenExpired => "Forbidden".to_string(),
            Self::Internal(_) => "Server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!("Request failed: {err:#}");
        }

        let body = ErrorResponse {
            message: self.client_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}
