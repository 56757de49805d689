//! PostgreSQL-backed store.
//!
//! Uniqueness lives in the `users` table constraints; a concurrent registration that
//! slips past the handler's lookup still fails here with SQLSTATE `23505`.

use super::{NewUser, StoreError, UserRecord, UserStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use std::time::Duration;
use tracing::{Instrument, debug, info_span};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and make sure the schema exists.
    ///
    /// # Errors
    /// Returns an error if the connection or the schema statements fail.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&pool)
            .await
            .context("Failed to apply database schema")?;

        debug!("Database schema ready");

        Ok(Self::new(pool))
    }
}

fn record_from_row(row: &PgRow) -> Result<UserRecord, sqlx::Error> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        phone_number: row.try_get("phone_number")?,
        id_number: row.try_get("id_number")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

/// `TEXT` cannot hold NUL, so such values can never match a stored row.
fn storable(values: &[&str]) -> bool {
    values.iter().all(|value| !value.contains('\0'))
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_phone_or_id(
        &self,
        phone_number: &str,
        id_number: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        if !storable(&[phone_number, id_number]) {
            return Ok(None);
        }

        let query = "SELECT id, full_name, phone_number, id_number, created_at FROM users \
                     WHERE phone_number = $1 OR id_number = $2 LIMIT 1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(phone_number)
            .bind(id_number)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.as_ref().map(record_from_row).transpose()?)
    }

    async fn find_by_phone_and_id(
        &self,
        phone_number: &str,
        id_number: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        if !storable(&[phone_number, id_number]) {
            return Ok(None);
        }

        let query = "SELECT id, full_name, phone_number, id_number, created_at FROM users \
                     WHERE phone_number = $1 AND id_number = $2";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(phone_number)
            .bind(id_number)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.as_ref().map(record_from_row).transpose()?)
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let query = "INSERT INTO users (full_name, phone_number, id_number) VALUES ($1, $2, $3) \
                     RETURNING id, full_name, phone_number, id_number, created_at";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        match sqlx::query(query)
            .bind(&user.full_name)
            .bind(&user.phone_number)
            .bind(&user.id_number)
            .fetch_one(&self.pool)
            .instrument(span)
            .await
        {
            Ok(row) => Ok(record_from_row(&row)?),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateKey),
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;

        Ok(())
    }
}
