//! Process-local store for development and tests.

use super::{NewUser, StoreError, UserRecord, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Number of records registered with `phone_number`.
    pub async fn count_by_phone(&self, phone_number: &str) -> usize {
        self.users
            .read()
            .await
            .iter()
            .filter(|user| user.phone_number == phone_number)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_phone_or_id(
        &self,
        phone_number: &str,
        id_number: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.phone_number == phone_number || user.id_number == id_number)
            .cloned())
    }

    async fn find_by_phone_and_id(
        &self,
        phone_number: &str,
        id_number: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.phone_number == phone_number && user.id_number == id_number)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        // check and push under one write lock
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|u| u.phone_number == user.phone_number || u.id_number == user.id_number)
        {
            return Err(StoreError::DuplicateKey);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            phone_number: user.phone_number,
            id_number: user.id_number,
            created_at: Utc::now(),
        };
        users.push(record.clone());

        Ok(record)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(phone: &str, id: &str) -> NewUser {
        NewUser {
            full_name: "Jane Doe".to_string(),
            phone_number: phone.to_string(),
            id_number: id.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() -> Result<(), StoreError> {
        let store = MemoryUserStore::new();
        let before = Utc::now();
        let record = store.insert(new_user("254712345678", "12345678")).await?;

        assert!(!record.id.is_nil());
        assert!(record.created_at >= before);
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_phone_or_id() -> Result<(), StoreError> {
        let store = MemoryUserStore::new();
        store.insert(new_user("254712345678", "12345678")).await?;

        let same_phone = store.insert(new_user("254712345678", "87654321")).await;
        assert!(matches!(same_phone, Err(StoreError::DuplicateKey)));

        let same_id = store.insert(new_user("254700000000", "12345678")).await;
        assert!(matches!(same_id, Err(StoreError::DuplicateKey)));

        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn find_by_phone_or_id_matches_either_field() -> Result<(), StoreError> {
        let store = MemoryUserStore::new();
        let record = store.insert(new_user("254712345678", "12345678")).await?;

        let by_phone = store
            .find_by_phone_or_id("254712345678", "00000000")
            .await?;
        assert_eq!(by_phone.map(|u| u.id), Some(record.id));

        let by_id = store
            .find_by_phone_or_id("254700000000", "12345678")
            .await?;
        assert_eq!(by_id.map(|u| u.id), Some(record.id));

        let neither = store
            .find_by_phone_or_id("254700000000", "00000000")
            .await?;
        assert!(neither.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn find_by_phone_and_id_requires_both() -> Result<(), StoreError> {
        let store = MemoryUserStore::new();
        let record = store.insert(new_user("254712345678", "12345678")).await?;
        store.insert(new_user("254700000000", "87654321")).await?;

        let both = store
            .find_by_phone_and_id("254712345678", "12345678")
            .await?;
        assert_eq!(both.map(|u| u.id), Some(record.id));

        // fields belong to different records
        let mixed = store
            .find_by_phone_and_id("254712345678", "87654321")
            .await?;
        assert!(mixed.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_inserts_keep_phone_unique() {
        let store = Arc::new(MemoryUserStore::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert(new_user("254712345678", &format!("1000000{i}")))
                    .await
                    .is_ok()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap_or(false) {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.count_by_phone("254712345678").await, 1);
    }
}
