use crate::cli::{
    actions::{
        Action,
        server::{Args, StoreBackend},
    },
    commands::{ARG_DSN, ARG_IN_MEMORY, ARG_PORT, token},
};
use anyhow::{Result, anyhow};
use secrecy::SecretString;

/// Turn parsed arguments into the action to run.
/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let store = if matches.get_flag(ARG_IN_MEMORY) {
        StoreBackend::Memory
    } else {
        let dsn = matches
            .get_one::<String>(ARG_DSN)
            .cloned()
            .ok_or_else(|| anyhow!("missing required argument: --dsn"))?;
        StoreBackend::Postgres {
            dsn: SecretString::from(dsn),
        }
    };

    let token = token::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port: matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(5000),
        store,
        token_secret: token.secret,
        token_ttl: token.ttl,
    }))
}
