use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

/// Where the HTTP server binds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Connection parameters for the participant store.
///
/// Every field has a documented default so the application runs against a
/// local PostgreSQL instance with no configuration at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database server host. Default: `127.0.0.1`.
    pub host: String,
    /// Database server port. Default: `5432`.
    pub port: u16,
    /// Database name. Default: `splitpool`.
    pub name: String,
    /// Database user. Default: `postgres`.
    pub user: String,
    /// Database password. Default: empty (trust/peer auth).
    pub password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseSettings {
                host: "127.0.0.1".to_string(),
                port: 5432,
                name: "splitpool".to_string(),
                user: "postgres".to_string(),
                password: String::new(),
            },
        }
    }
}

impl ServerSettings {
    /// Parses the configured host and port into a bindable socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ConfigError::ValidationError(format!(
                    "invalid server bind address '{}:{}'",
                    self.host, self.port
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_address_parses() {
        let settings = Settings::default();
        let addr = settings.server.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn garbage_host_is_a_validation_error() {
        let server = ServerSettings {
            host: "not a host".to_string(),
            port: 3000,
        };
        assert!(matches!(
            server.socket_addr(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn database_defaults_match_the_documented_values() {
        let db = Settings::default().database;
        assert_eq!(db.host, "127.0.0.1");
        assert_eq!(db.port, 5432);
        assert_eq!(db.name, "splitpool");
        assert_eq!(db.user, "postgres");
        assert!(db.password.is_empty());
    }
}
