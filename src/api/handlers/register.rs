use super::{AuthPayload, AuthResponse};
use crate::{
    api::error::ErrorResponse,
    auth::{self, RegisterRequest, TokenService},
    store::SharedStore,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path= "/api/register",
    request_body(content = RegisterRequest, description = "JSON or urlencoded form body"),
    responses (
        (status = 201, description = "Registration successful", body = AuthResponse, content_type = "application/json"),
        (status = 400, description = "Missing or invalid field, or phone/ID number already registered", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    ),
    tag= "auth"
)]
#[instrument(skip(store, tokens, request))]
pub async fn register(
    Extension(store): Extension<SharedStore>,
    Extension(tokens): Extension<Arc<TokenService>>,
    AuthPayload(request): AuthPayload<RegisterRequest>,
) -> Response {
    match auth::register(store.as_ref(), &tokens, request).await {
        Ok(session) => (
            StatusCode::CREATED,
            Json(AuthResponse::new("Registration successful", session)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
