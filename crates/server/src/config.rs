//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DATABASE_URL` - `PostgreSQL` connection string; presence selects the
//!   networked backend
//! - `SQLITE_PATH` - embedded database file (default: velvetbean.db)
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 3000)
//!
//! ## Optional (email - both `SMTP_HOST` and `SMTP_USER` enable sending)
//! - `SMTP_HOST` - SMTP server hostname
//! - `SMTP_USER` - SMTP authentication username, also the sender address
//! - `SMTP_PASS` - SMTP authentication password (required once enabled)
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `SMTP_SECURE` - "true" for implicit TLS instead of STARTTLS

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SQLITE_PATH: &str = "velvetbean.db";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Database backend selection
    pub database: DatabaseConfig,
    /// SMTP configuration; absent disables order confirmation email
    pub smtp: Option<SmtpConfig>,
}

/// Database backend selection.
///
/// A present connection URL selects the networked `PostgreSQL` backend;
/// otherwise the embedded SQLite engine is used at `sqlite_path`.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub url: Option<SecretString>,
    /// Embedded database file, created if absent
    pub sqlite_path: PathBuf,
}

/// SMTP transport configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS instead of STARTTLS
    pub secure: bool,
    /// Authentication username, also used as the sender address
    pub username: String,
    pub password: SecretString,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is present but malformed, or if
    /// SMTP is enabled without a password.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = match optional_env("HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("HOST".to_string(), raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = parse_port("PORT", DEFAULT_PORT)?;

        let database = DatabaseConfig {
            url: optional_env("DATABASE_URL").map(SecretString::from),
            sqlite_path: optional_env("SQLITE_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH), PathBuf::from),
        };

        Ok(Self {
            host,
            port,
            database,
            smtp: SmtpConfig::from_env()?,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SmtpConfig {
    /// Load the SMTP section; sending is enabled only when both `SMTP_HOST`
    /// and `SMTP_USER` are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if enabled without `SMTP_PASS`.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(host), Some(username)) = (optional_env("SMTP_HOST"), optional_env("SMTP_USER"))
        else {
            return Ok(None);
        };

        let password = optional_env("SMTP_PASS")
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("SMTP_PASS".to_string()))?;

        Ok(Some(Self {
            host,
            port: parse_port("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            secure: optional_env("SMTP_SECURE").as_deref() == Some("true"),
            username,
            password,
        }))
    }
}

/// Read an environment variable, treating empty values as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_port(name: &str, default: u16) -> Result<u16, ConfigError> {
    optional_env(name).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = AppConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 4100,
            database: DatabaseConfig {
                url: None,
                sqlite_path: PathBuf::from(DEFAULT_SQLITE_PATH),
            },
            smtp: None,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:4100");
    }
}
