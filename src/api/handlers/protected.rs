use crate::{
    api::error::ErrorResponse,
    auth::{Claims, TokenService, require_bearer},
};
use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug)]
pub struct Protected {
    pub message: String,
    pub user: Claims,
}

#[utoipa::path(
    get,
    path= "/api/protected",
    responses (
        (status = 200, description = "Token accepted", body = Protected, content_type = "application/json"),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag= "auth"
)]
#[instrument(skip(headers, tokens))]
pub async fn protected(
    headers: HeaderMap,
    Extension(tokens): Extension<Arc<TokenService>>,
) -> Response {
    let claims = match require_bearer(&headers, &tokens) {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    debug!(user_id = %claims.user_id, "Protected route accessed");

    (
        StatusCode::OK,
        Json(Protected {
            message: "This is a protected route".to_string(),
            user: claims,
        }),
    )
        .into_response()
}
