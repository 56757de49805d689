use async_trait::async_trait;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use tracing::debug;

/// Body sent either as JSON or as an urlencoded HTML form.
///
/// Never rejects: a missing or unparseable body yields `T::default()`, which the
/// auth validators then report as missing fields.
#[derive(Debug)]
pub struct AuthPayload<T>(pub T);

fn is_form(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

#[async_trait]
impl<S, T> FromRequest<S> for AuthPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        let parsed = if is_form(content_type) {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|rejection| rejection.body_text())
        };

        Ok(Self(parsed.unwrap_or_else(|reason| {
            debug!("Unreadable request body: {}", reason);
            T::default()
        })))
    }
}
