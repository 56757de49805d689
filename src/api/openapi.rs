#![allow(clippy::needless_for_each)]

use crate::{
    api::{
        error::ErrorResponse,
        handlers::{self, AuthResponse, health::Health, protected::Protected},
    },
    auth::{Claims, LoginRequest, RegisterRequest},
    store::PublicUser,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                Http::builder()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::register::register,
        handlers::login::login,
        handlers::protected::protected
    ),
    components(schemas(
        Health,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        PublicUser,
        Protected,
        Claims,
        ErrorResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and protected access"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
