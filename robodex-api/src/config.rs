//! Server Configuration Module
//!
//! Configuration is loaded from environment variables with defaults that
//! match a checkout served from its own directory: `robots.json` and
//! `index.html` in the working directory, uploads under `static/images`.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_PORT: u16 = 3000;

// ============================================================================
// SERVER CONFIGURATION
// ============================================================================

/// Server configuration for storage locations, listening address and CORS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind.
    pub bind_host: String,

    /// Port to bind.
    pub port: u16,

    /// JSON file holding the robot list.
    pub data_file: PathBuf,

    /// Root directory for static files.
    pub web_root: PathBuf,

    /// Directory uploaded images are written to.
    /// Must live under `web_root` at `static/images` for the public URLs to resolve.
    pub upload_dir: PathBuf,

    /// Fallback document, relative to `web_root`.
    pub index_file: PathBuf,

    /// Allowed CORS origins. Empty means allow all origins.
    pub cors_origins: Vec<String>,

    /// Optional request body limit in bytes. `None` disables the limit.
    pub max_upload_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from("robots.json"),
            web_root: PathBuf::from("."),
            upload_dir: PathBuf::from("static/images"),
            index_file: PathBuf::from("index.html"),
            cors_origins: Vec::new(),
            max_upload_bytes: None,
        }
    }
}

impl ServerConfig {
    /// Create ServerConfig from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` (or `SERVER_PORT`): listen port (default: 3000)
    /// - `ROBODEX_BIND`: listen host (default: 0.0.0.0)
    /// - `ROBODEX_DATA_FILE`: record file (default: robots.json)
    /// - `ROBODEX_WEB_ROOT`: static root (default: .)
    /// - `ROBODEX_UPLOAD_DIR`: upload directory (default: static/images)
    /// - `ROBODEX_INDEX_FILE`: fallback document (default: index.html)
    /// - `ROBODEX_CORS_ORIGINS`: comma-separated origins (empty = allow all)
    /// - `ROBODEX_MAX_UPLOAD_BYTES`: request body limit (unset = unlimited)
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", raw)))?,
            None => defaults.port,
        };

        let max_upload_bytes = match lookup("ROBODEX_MAX_UPLOAD_BYTES") {
            Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<usize>().map_err(
                |_| ApiError::invalid_input(format!("Invalid upload limit: {}", raw)),
            )?),
            _ => None,
        };

        let cors_origins = lookup("ROBODEX_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_host: lookup("ROBODEX_BIND").unwrap_or(defaults.bind_host),
            port,
            data_file: lookup("ROBODEX_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            web_root: lookup("ROBODEX_WEB_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.web_root),
            upload_dir: lookup("ROBODEX_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            index_file: lookup("ROBODEX_INDEX_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_file),
            cors_origins,
            max_upload_bytes,
        })
    }

    /// Resolve the socket address to listen on.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
        })
    }

    /// Absolute-or-relative path of the fallback document.
    pub fn index_path(&self) -> PathBuf {
        self.web_root.join(&self.index_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.index_path(), PathBuf::from("./index.html"));
        assert!(config.max_upload_bytes.is_none());
    }

    #[test]
    fn test_port_prefers_port_over_server_port() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("PORT", "8080"), ("SERVER_PORT", "9090")]))
                .unwrap();
        assert_eq!(config.port, 8080);

        let config = ServerConfig::from_lookup(lookup_from(&[("SERVER_PORT", "9090")])).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.message.contains("eighty"));
    }

    #[test]
    fn test_paths_and_origins_from_env() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("ROBODEX_DATA_FILE", "/var/lib/robodex/robots.json"),
            ("ROBODEX_WEB_ROOT", "/srv/www"),
            ("ROBODEX_UPLOAD_DIR", "/srv/www/static/images"),
            ("ROBODEX_CORS_ORIGINS", "https://a.example, ,https://b.example"),
            ("ROBODEX_MAX_UPLOAD_BYTES", "1048576"),
        ]))
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/var/lib/robodex/robots.json"));
        assert_eq!(config.index_path(), PathBuf::from("/srv/www/index.html"));
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.max_upload_bytes, Some(1_048_576));
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr().unwrap().port(), 3000);

        let config = ServerConfig {
            bind_host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.bind_addr().is_err());
    }
}
