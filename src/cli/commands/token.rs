use anyhow::{Context, Result};
use clap::{Arg, Command};
use secrecy::SecretString;
use std::time::Duration;

pub const ARG_TOKEN_SECRET: &str = "token-secret";
pub const ARG_TOKEN_TTL: &str = "token-ttl";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_TOKEN_SECRET)
                .long(ARG_TOKEN_SECRET)
                .help("Secret used to sign session tokens (HS256)")
                .env("IDAUTH_TOKEN_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL)
                .long(ARG_TOKEN_TTL)
                .help("Session token lifetime in seconds")
                .env("IDAUTH_TOKEN_TTL")
                .default_value("3600")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub secret: SecretString,
    pub ttl: Duration,
}

impl Options {
    /// # Errors
    /// Returns an error if the secret is missing or empty.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let secret = matches
            .get_one::<String>(ARG_TOKEN_SECRET)
            .filter(|secret| !secret.trim().is_empty())
            .cloned()
            .context("missing required argument: --token-secret")?;
        let ttl = matches.get_one::<u64>(ARG_TOKEN_TTL).copied().unwrap_or(3600);

        Ok(Self {
            secret: SecretString::from(secret),
            ttl: Duration::from_secs(ttl),
        })
    }
}
