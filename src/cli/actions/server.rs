use crate::{
    api,
    auth::TokenService,
    store::{MemoryUserStore, PgUserStore, SharedStore},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum StoreBackend {
    Memory,
    Postgres { dsn: SecretString },
}

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub store: StoreBackend,
    pub token_secret: SecretString,
    pub token_ttl: Duration,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the token service cannot be built, the database is unreachable,
/// or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let tokens = TokenService::new(&args.token_secret, args.token_ttl)
        .context("Invalid token configuration")?;

    let store: SharedStore = match args.store {
        StoreBackend::Memory => {
            warn!("Using in-memory user store; records are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
        StoreBackend::Postgres { dsn } => Arc::new(PgUserStore::connect(dsn.expose_secret()).await?),
    };

    api::new(args.port, store, Arc::new(tokens)).await
}
