//! Server configuration.
//!
//! Built once at startup from documented defaults, overridden by environment
//! variables, then shared read-only through `Arc<AppConfig>`.
//!
//! | Env var                    | Default                   |
//! |----------------------------|---------------------------|
//! | `DATABASE_URL`             | `empresa_3d.db`           |
//! | `SECRET_KEY`               | `hz-dev-secret-change-me` |
//! | `HZ_OUTPUT_DIR`            | `output`                  |
//! | `HZ_HOST`                  | `0.0.0.0`                 |
//! | `HZ_PORT`                  | `5000`                    |
//! | `HZ_BUSINESS_NAME`         | `HZ Impresiones 3D`       |
//! | `HZ_DB_MAX_CONNECTIONS`    | `5`                       |
//! | `HZ_INVOICE_LINK_TTL_SECS` | `86400`                   |

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Signing secret used when `SECRET_KEY` is not set.
pub const DEV_SECRET_KEY: &str = "hz-dev-secret-change-me";

/// (config key, environment variable)
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("database_url", "DATABASE_URL"),
    ("secret_key", "SECRET_KEY"),
    ("output_dir", "HZ_OUTPUT_DIR"),
    ("host", "HZ_HOST"),
    ("port", "HZ_PORT"),
    ("business_name", "HZ_BUSINESS_NAME"),
    ("db_max_connections", "HZ_DB_MAX_CONNECTIONS"),
    ("invoice_link_ttl_secs", "HZ_INVOICE_LINK_TTL_SECS"),
];

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite database file. A `sqlite://` prefix is accepted and ignored.
    pub database_url: String,

    /// Secret that signs invoice download links.
    pub secret_key: String,

    /// Directory that receives invoices and reports.
    pub output_dir: PathBuf,

    pub host: String,
    pub port: u16,

    /// Letterhead printed on every document.
    pub business_name: String,

    pub db_max_connections: u32,

    /// Lifetime of an invoice download link in seconds.
    pub invoice_link_ttl_secs: i64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration with `lookup` standing in for the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .set_default("database_url", "empresa_3d.db")?
            .set_default("secret_key", DEV_SECRET_KEY)?
            .set_default("output_dir", "output")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("business_name", hz_core::DEFAULT_BUSINESS_NAME)?
            .set_default("db_max_connections", 5)?
            .set_default("invoice_link_ttl_secs", 86_400)?;

        for &(key, var) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path().as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_URL".to_string()));
        }
        if self.secret_key.is_empty() {
            return Err(ConfigError::MissingRequired("SECRET_KEY".to_string()));
        }
        if self.business_name.trim().is_empty() {
            return Err(ConfigError::MissingRequired("HZ_BUSINESS_NAME".to_string()));
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("HZ_DB_MAX_CONNECTIONS".to_string()));
        }
        if self.invoice_link_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue("HZ_INVOICE_LINK_TTL_SECS".to_string()));
        }
        Ok(())
    }

    /// Database file path with any `sqlite:` scheme removed.
    pub fn database_path(&self) -> &Path {
        let url = self.database_url.as_str();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        Path::new(path)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| env.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database_path(), Path::new("empresa_3d.db"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.business_name, "HZ Impresiones 3D");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.invoice_link_ttl_secs, 86_400);
        assert!(config.uses_dev_secret());
    }

    #[test]
    fn test_environment_overrides() {
        let config = load_with(&[
            ("DATABASE_URL", "sqlite://data/tienda.db"),
            ("SECRET_KEY", "s3cret"),
            ("HZ_PORT", "8080"),
            ("HZ_BUSINESS_NAME", "Taller Uno"),
            ("HZ_OUTPUT_DIR", "/tmp/docs"),
        ])
        .unwrap();

        assert_eq!(config.database_path(), Path::new("data/tienda.db"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.business_name, "Taller Uno");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/docs"));
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn test_malformed_port_fails() {
        assert!(load_with(&[("HZ_PORT", "cinco mil")]).is_err());
    }

    #[test]
    fn test_zero_pool_rejected() {
        assert!(matches!(
            load_with(&[("HZ_DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            load_with(&[("SECRET_KEY", "")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
