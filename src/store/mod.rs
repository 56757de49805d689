//! User record storage.
//!
//! Flow Overview: handlers look users up by phone/ID and insert new ones through
//! the [`UserStore`] trait. The store owns persistence and is the final authority
//! on uniqueness: `insert` must reject duplicates atomically, whatever lookups the
//! caller did first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// A stored user. Created once at registration, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub id_number: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Projection safe to return to clients; the ID number and creation time are withheld.
    #[must_use]
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Input for [`UserStore::insert`]. Fields are already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub phone_number: String,
    pub id_number: String,
}

#[derive(ToSchema, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("phone number or ID number already registered")]
    DuplicateKey,
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Record whose phone number OR ID number matches.
    async fn find_by_phone_or_id(
        &self,
        phone_number: &str,
        id_number: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Record whose phone number AND ID number both match.
    async fn find_by_phone_and_id(
        &self,
        phone_number: &str,
        id_number: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Create a record, failing with [`StoreError::DuplicateKey`] on a uniqueness conflict.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn UserStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_projection_withholds_id_number() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            full_name: "Jane Doe".to_string(),
            phone_number: "254712345678".to_string(),
            id_number: "12345678".to_string(),
            created_at: Utc::now(),
        };

        let public = record.public();
        assert_eq!(public.id, record.id);
        assert_eq!(public.full_name, "Jane Doe");
        assert_eq!(public.phone_number, "254712345678");

        let json = serde_json::to_value(&public).unwrap_or_default();
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["phoneNumber"], "254712345678");
        assert!(json.get("idNumber").is_none());
        assert!(json.get("createdAt").is_none());
    }
}
