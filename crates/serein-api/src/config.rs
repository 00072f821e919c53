use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub token_secret: String,
    pub bootstrap_admin_email: String,
    pub max_db_connections: u32,
}

impl Config {
    pub fn load() -> eyre::Result<Self> {
        Ok(Self {
            port: read_or("SEREIN_PORT", "8080")?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| eyre::eyre!("DATABASE_URL must be set"))?,
            token_secret: env::var("SEREIN_TOKEN_SECRET")
                .map_err(|_| eyre::eyre!("SEREIN_TOKEN_SECRET must be set"))?,
            bootstrap_admin_email: env::var("SEREIN_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@serein.local".to_string()),
            max_db_connections: read_or("SEREIN_DB_POOL", "5")?,
        })
    }
}

fn read_or<T: FromStr>(key: &str, default: &str) -> eyre::Result<T>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| eyre::eyre!("invalid {key}: {e}"))
}
