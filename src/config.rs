use anyhow::{bail, Context};
use serde::Deserialize;

/// One year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Reads configuration from the environment. A missing or empty
    /// `JWT_SECRET` is fatal.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let secret = get("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        let ttl_minutes = match get("JWT_TTL_MINUTES") {
            None => 60,
            Some(raw) => {
                let minutes = raw
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("JWT_TTL_MINUTES is not an integer: {raw:?}"))?;
                if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
                    bail!("JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}");
                }
                minutes
            }
        };
        let jwt = JwtConfig {
            secret,
            ttl_minutes,
        };
        Ok(Self { database_url, jwt })
    }
}
