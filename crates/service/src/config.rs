// Runtime configuration read from the environment

use anyhow::{anyhow, Context, Result};
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:algoalchemy.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct Config {
    // Store connection string
    pub database_url: String,

    // Pool size; in-memory SQLite is always pinned to one connection
    pub max_connections: u32,

    // Bucket count for the field-staging hash map
    pub hashmap_buckets: usize,

    // How many of the most recent blog posts `delete-recent` removes by default
    pub delete_recent_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            hashmap_buckets: 16,
            delete_recent_count: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: env_or("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            hashmap_buckets: env_or("HASHMAP_BUCKETS", defaults.hashmap_buckets)?,
            delete_recent_count: env_or("DELETE_RECENT_COUNT", defaults.delete_recent_count)?,
        };
        config.validate()?;

        Ok(config)
    }

    // Configuration for a throwaway in-memory store
    pub fn in_memory() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Config::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hashmap_buckets == 0 {
            return Err(anyhow!("HASHMAP_BUCKETS must be a positive integer"));
        }
        if self.max_connections == 0 {
            return Err(anyhow!("DB_MAX_CONNECTIONS must be a positive integer"));
        }
        Ok(())
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    // Every connection to an in-memory database sees its own empty database
    pub fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_connections
        }
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {name}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
