//! Connection parameter configuration.
//!
//! Parameters arrive as a key-value mapping (environment variables or a
//! dotenv file read by the frontend) and are copied into an immutable
//! [`ExporterConfig`] at startup.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::TcexError;

/// Configuration key for the database server hostname.
pub const HOST: &str = "TCEX_HOSTNAME";
/// Configuration key for the login username.
pub const USER: &str = "TCEX_USERNAME";
/// Configuration key for the login password.
pub const PASSWORD: &str = "TCEX_PASSWORD";
/// Configuration key for the database name.
pub const DATABASE: &str = "TCEX_DATABASE";
/// Configuration key for the optional unix socket directory.
pub const UNIX_SOCKET: &str = "TCEX_UXSOCKET";

/// Connection parameters for the export data source.
///
/// Values are copied out of the source mapping on construction, so later
/// mutation of that mapping does not affect an existing config.
#[derive(Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    host: String,
    user: String,
    password: String,
    database: String,
    unix_socket: Option<PathBuf>,
}

impl ExporterConfig {
    /// Build a config from a key-value mapping.
    ///
    /// `TCEX_HOSTNAME`, `TCEX_USERNAME`, `TCEX_PASSWORD` and `TCEX_DATABASE`
    /// are required; `TCEX_UXSOCKET` is optional and, when present and
    /// non-empty, names the directory holding the server's unix socket.
    pub fn from_map(config: &HashMap<String, String>) -> Result<Self, TcexError> {
        let unix_socket = config
            .get(UNIX_SOCKET)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host: required(config, HOST)?,
            user: required(config, USER)?,
            password: required(config, PASSWORD)?,
            database: required(config, DATABASE)?,
            unix_socket,
        })
    }

    /// Build a config from the process environment.
    pub fn from_env() -> Result<Self, TcexError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_map(&vars)
    }

    /// Get the database server hostname.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the login username.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Get the login password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Get the database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the unix socket directory, if configured.
    pub fn unix_socket(&self) -> Option<&PathBuf> {
        self.unix_socket.as_ref()
    }

    /// Get the display connection string (without password).
    pub fn display_url(&self) -> String {
        format!("postgresql://{}@{}/{}", self.user, self.host, self.database)
    }
}

impl std::fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("unix_socket", &self.unix_socket)
            .finish()
    }
}

fn required(config: &HashMap<String, String>, key: &str) -> Result<String, TcexError> {
    config
        .get(key)
        .cloned()
        .ok_or_else(|| TcexError::config(format!("missing required key {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> HashMap<String, String> {
        HashMap::from([
            (HOST.to_string(), "localhost".to_string()),
            (USER.to_string(), "joeavg".to_string()),
            (PASSWORD.to_string(), "****".to_string()),
            (DATABASE.to_string(), "valuabledata".to_string()),
            (UNIX_SOCKET.to_string(), "/var/run/postgresql".to_string()),
        ])
    }

    #[test]
    fn test_accessors_return_mapped_values_unchanged() {
        let config = ExporterConfig::from_map(&sample_map()).unwrap();
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.user(), "joeavg");
        assert_eq!(config.password(), "****");
        assert_eq!(config.database(), "valuabledata");
        assert_eq!(config.unix_socket(), Some(&PathBuf::from("/var/run/postgresql")));
    }

    #[test]
    fn test_config_is_a_defensive_copy() {
        let mut map = sample_map();
        let config = ExporterConfig::from_map(&map).unwrap();
        map.insert(HOST.to_string(), "elsewhere".to_string());
        map.clear();
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.database(), "valuabledata");
    }

    #[test]
    fn test_missing_required_key_is_a_config_error() {
        let mut map = sample_map();
        map.remove(PASSWORD);
        let err = ExporterConfig::from_map(&map).unwrap_err();
        assert_eq!(err.category(), "Config");
        assert!(err.to_string().contains(PASSWORD));
    }

    #[test]
    fn test_unix_socket_is_optional() {
        let mut map = sample_map();
        map.remove(UNIX_SOCKET);
        let config = ExporterConfig::from_map(&map).unwrap();
        assert_eq!(config.unix_socket(), None);

        // An empty value counts as absent
        map.insert(UNIX_SOCKET.to_string(), String::new());
        let config = ExporterConfig::from_map(&map).unwrap();
        assert_eq!(config.unix_socket(), None);
    }

    #[test]
    fn test_debug_output_redacts_password() {
        let config = ExporterConfig::from_map(&sample_map()).unwrap();
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("****"));
    }

    #[test]
    fn test_display_url_omits_password() {
        let config = ExporterConfig::from_map(&sample_map()).unwrap();
        assert_eq!(config.display_url(), "postgresql://joeavg@localhost/valuabledata");
        assert!(!config.display_url().contains("****"));
    }
}
