use super::{AuthPayload, AuthResponse};
use crate::{
    api::error::ErrorResponse,
    auth::{self, LoginRequest, TokenService},
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
    path= "/api/login",
    request_body(content = LoginRequest, description = "JSON or urlencoded form body"),
    responses (
        (status = 200, description = "Login successful", body = AuthResponse, content_type = "application/json"),
        (status = 400, description = "Phone number or ID number missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    ),
    tag= "auth"
)]
#[instrument(skip(store, tokens, request))]
pub async fn login(
    Extension(store): Extension<SharedStore>,
    Extension(tokens): Extension<Arc<TokenService>>,
    AuthPayload(request): AuthPayload<LoginRequest>,
) -> Response {
    match auth::login(store.as_ref(), &tokens, request).await {
        Ok(session) => (
            StatusCode::OK,
            Json(AuthResponse::new("Login successful", session)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
