//! Register and login orchestration.
//!
//! Flow Overview:
//! 1) Validate the input as presented (fail fast, nothing touches the store).
//! 2) Look the user up: for register the hit is an early duplicate error, for login
//!    the exact phone + ID match is the credential check.
//! 3) Register inserts; a concurrent duplicate still fails at the store.
//! 4) Issue a session token for the record id.

use super::{
    AuthError,
    error::{MSG_LOGIN_FIELDS_REQUIRED, MSG_REGISTER_FIELDS_REQUIRED},
    token::TokenService,
    validator::{self, ValidationError},
};
use crate::store::{NewUser, PublicUser, UserStore};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub id_number: Option<String>,
}

#[derive(ToSchema, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone_number: Option<String>,
    pub id_number: Option<String>,
}

/// Token plus the public view of the user it was issued for.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: PublicUser,
}

fn registration_error(err: ValidationError) -> AuthError {
    match err {
        ValidationError::MissingField => AuthError::MissingField(MSG_REGISTER_FIELDS_REQUIRED),
        ValidationError::InvalidPhoneFormat => AuthError::InvalidPhoneFormat,
        ValidationError::InvalidIdFormat => AuthError::InvalidIdFormat,
    }
}

/// Validate, check uniqueness, insert and issue a token.
///
/// # Errors
/// Validation failures, [`AuthError::DuplicateKey`], or [`AuthError::Internal`] when the
/// store or signing fails.
#[instrument(skip_all)]
pub async fn register(
    store: &dyn UserStore,
    tokens: &TokenService,
    request: RegisterRequest,
) -> Result<Session, AuthError> {
    validator::validate_registration(
        request.full_name.as_deref(),
        request.phone_number.as_deref(),
        request.id_number.as_deref(),
    )
    .map_err(registration_error)?;

    let RegisterRequest {
        full_name: Some(full_name),
        phone_number: Some(phone_number),
        id_number: Some(id_number),
    } = request
    else {
        return Err(AuthError::MissingField(MSG_REGISTER_FIELDS_REQUIRED));
    };

    if store
        .find_by_phone_or_id(&phone_number, &id_number)
        .await?
        .is_some()
    {
        debug!("User already exists");
        return Err(AuthError::DuplicateKey);
    }

    let record = store
        .insert(NewUser {
            full_name,
            phone_number,
            id_number,
        })
        .await?;

    let token = tokens.issue(record.id)?;

    info!(user_id = %record.id, "User registered");

    Ok(Session {
        token,
        user: record.public(),
    })
}

/// Match phone + ID exactly and issue a token.
///
/// # Errors
/// [`AuthError::MissingField`], [`AuthError::CredentialsNotFound`], or
/// [`AuthError::Internal`] when the store or signing fails.
#[instrument(skip_all)]
pub async fn login(
    store: &dyn UserStore,
    tokens: &TokenService,
    request: LoginRequest,
) -> Result<Session, AuthError> {
    validator::validate_login(request.phone_number.as_deref(), request.id_number.as_deref())
        .map_err(|_| AuthError::MissingField(MSG_LOGIN_FIELDS_REQUIRED))?;

    let LoginRequest {
        phone_number: Some(phone_number),
        id_number: Some(id_number),
    } = request
    else {
        return Err(AuthError::MissingField(MSG_LOGIN_FIELDS_REQUIRED));
    };

    let Some(record) = store
        .find_by_phone_and_id(&phone_number, &id_number)
        .await?
    else {
        debug!("No user matches the presented credentials");
        return Err(AuthError::CredentialsNotFound);
    };

    let token = tokens.issue(record.id)?;

    info!(user_id = %record.id, "User logged in");

    Ok(Session {
        token,
        user: record.public(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::DEFAULT_TOKEN_TTL;
    use crate::store::{MemoryUserStore, StoreError, UserRecord};
    use async_trait::async_trait;
    use secrecy::SecretString;

    fn tokens() -> TokenService {
        match TokenService::new(
            &SecretString::from("service-secret".to_string()),
            DEFAULT_TOKEN_TTL,
        ) {
            Ok(tokens) => tokens,
            Err(e) => panic!("failed to build token service: {e}"),
        }
    }

    fn jane() -> RegisterRequest {
        RegisterRequest {
            full_name: Some("Jane Doe".to_string()),
            phone_number: Some("254712345678".to_string()),
            id_number: Some("12345678".to_string()),
        }
    }

    #[tokio::test]
    async fn register_creates_record_and_verifiable_token() -> Result<(), AuthError> {
        let store = MemoryUserStore::new();
        let tokens = tokens();

        let session = register(&store, &tokens, jane()).await?;

        let claims = tokens.verify(&session.token)?;
        assert_eq!(claims.user_id, session.user.id);
        assert_eq!(session.user.phone_number, "254712345678");

        let found = store
            .find_by_phone_or_id("254712345678", "12345678")
            .await?;
        assert_eq!(found.map(|u| u.id), Some(session.user.id));
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_padded_phone() {
        let store = MemoryUserStore::new();
        let mut padded = jane();
        padded.phone_number = Some(" 254712345678 ".to_string());

        assert!(matches!(
            register(&store, &tokens(), padded).await,
            Err(AuthError::InvalidPhoneFormat)
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn register_validation_failures_create_nothing() {
        let store = MemoryUserStore::new();
        let tokens = tokens();

        let mut bad_phone = jane();
        bad_phone.phone_number = Some("0712345678".to_string());
        assert!(matches!(
            register(&store, &tokens, bad_phone).await,
            Err(AuthError::InvalidPhoneFormat)
        ));

        let mut bad_id = jane();
        bad_id.id_number = Some("1234".to_string());
        assert!(matches!(
            register(&store, &tokens, bad_id).await,
            Err(AuthError::InvalidIdFormat)
        ));

        let mut empty_name = jane();
        empty_name.full_name = Some(String::new());
        assert!(matches!(
            register(&store, &tokens, empty_name).await,
            Err(AuthError::MissingField(MSG_REGISTER_FIELDS_REQUIRED))
        ));

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_phone() -> Result<(), AuthError> {
        let store = MemoryUserStore::new();
        let tokens = tokens();
        register(&store, &tokens, jane()).await?;

        let mut again = jane();
        again.id_number = Some("87654321".to_string());
        assert!(matches!(
            register(&store, &tokens, again).await,
            Err(AuthError::DuplicateKey)
        ));
        assert_eq!(store.count_by_phone("254712345678").await, 1);
        Ok(())
    }

    /// Store whose lookup always misses, as when a concurrent insert races the check.
    struct RacingStore(MemoryUserStore);

    #[async_trait]
    impl UserStore for RacingStore {
        async fn find_by_phone_or_id(
            &self,
            _phone_number: &str,
            _id_number: &str,
        ) -> Result<Option<UserRecord>, StoreError> {
            Ok(None)
        }

        async fn find_by_phone_and_id(
            &self,
            phone_number: &str,
            id_number: &str,
        ) -> Result<Option<UserRecord>, StoreError> {
            self.0.find_by_phone_and_id(phone_number, id_number).await
        }

        async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
            self.0.insert(user).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_insert_is_final_authority_on_uniqueness() -> Result<(), AuthError> {
        let store = RacingStore(MemoryUserStore::new());
        let tokens = tokens();
        register(&store, &tokens, jane()).await?;

        assert!(matches!(
            register(&store, &tokens, jane()).await,
            Err(AuthError::DuplicateKey)
        ));
        assert_eq!(store.0.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn login_matches_phone_and_id_exactly() -> Result<(), AuthError> {
        let store = MemoryUserStore::new();
        let tokens = tokens();
        let registered = register(&store, &tokens, jane()).await?;

        let session = login(
            &store,
            &tokens,
            LoginRequest {
                phone_number: Some("254712345678".to_string()),
                id_number: Some("12345678".to_string()),
            },
        )
        .await?;
        assert_eq!(session.user, registered.user);
        assert_eq!(tokens.verify(&session.token)?.user_id, registered.user.id);

        let wrong_id = login(
            &store,
            &tokens,
            LoginRequest {
                phone_number: Some("254712345678".to_string()),
                id_number: Some("87654321".to_string()),
            },
        )
        .await;
        assert!(matches!(wrong_id, Err(AuthError::CredentialsNotFound)));

        let padded = login(
            &store,
            &tokens,
            LoginRequest {
                phone_number: Some("254712345678\t".to_string()),
                id_number: Some(" 12345678".to_string()),
            },
        )
        .await;
        assert!(matches!(padded, Err(AuthError::CredentialsNotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let store = MemoryUserStore::new();
        let result = login(
            &store,
            &tokens(),
            LoginRequest {
                phone_number: Some("254712345678".to_string()),
                id_number: None,
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(AuthError::MissingField(MSG_LOGIN_FIELDS_REQUIRED))
        ));
    }
}
