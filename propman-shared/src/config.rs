/// Configuration management
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DB_USER`, `DB_PASS`, `DB_HOST`, `DB_NAME`: PostgreSQL credentials (required)
/// - `DB_PORT`: PostgreSQL port (default: 5432)
/// - `DB_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`: Object storage credentials (required)
/// - `BUCKET`: Object storage bucket (required)
/// - `ENDPOINT`: Custom S3-compatible endpoint (optional)
/// - `AWS_REGION`: Region (default: us-east-1)
/// - `SCRATCH_DIR`: Directory for temporary upload/download copies (default: OS temp dir)
///
/// # Example
///
/// ```no_run
/// use propman_shared::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Connecting to {}", config.database.host);
/// # Ok(())
/// # }
/// ```

use crate::db::pool::DatabaseConfig;
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection settings
    pub database: DatabaseSettings,

    /// Object storage settings
    pub storage: StorageConfig,
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Object storage settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,

    /// Custom endpoint for S3-compatible services (None = AWS)
    pub endpoint: Option<String>,

    pub region: String,
    pub bucket: String,

    /// Where temporary copies of uploads and downloads are written
    pub scratch_dir: PathBuf,
}

impl DatabaseSettings {
    /// Builds a PostgreSQL connection URL, percent-encoding the credentials
    pub fn url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }

    /// Converts into the pool configuration, keeping pool defaults for timeouts
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url(),
            max_connections: self.max_connections,
            ..Default::default()
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database: DatabaseSettings::from_lookup(&lookup)?,
            storage: StorageConfig::from_lookup(&lookup)?,
        })
    }
}

impl DatabaseSettings {
    /// Loads only the `DB_*` variables (plus `.env`)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("DB_PORT")
            .unwrap_or_else(|| "5432".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("DB_PORT is not a valid port: {}", e))?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DB_MAX_CONNECTIONS is not a number: {}", e))?;

        Ok(Self {
            user: required(&lookup, "DB_USER")?,
            password: lookup("DB_PASS").unwrap_or_default(),
            host: required(&lookup, "DB_HOST")?,
            port,
            name: required(&lookup, "DB_NAME")?,
            max_connections,
        })
    }
}

impl StorageConfig {
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            access_key_id: required(&lookup, "AWS_ACCESS_KEY_ID")?,
            secret_access_key: required(&lookup, "AWS_SECRET_ACCESS_KEY")?,
            endpoint: lookup("ENDPOINT").filter(|value| !value.is_empty()),
            region: lookup("AWS_REGION")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| "us-east-1".to_string()),
            bucket: required(&lookup, "BUCKET")?,
            scratch_dir: lookup("SCRATCH_DIR")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow::anyhow!("{} environment variable is required", key))
}
