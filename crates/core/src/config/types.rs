use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::discovery::DiscoveryConfig;
use crate::universe::RetailerCatalog;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Retailer universe override; the built-in Vietnamese universe is
    /// used when absent.
    #[serde(default)]
    pub catalog: Option<RetailerCatalog>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            source: None,
            discovery: DiscoveryConfig::default(),
            catalog: None,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("pricescout.db")
}

/// Candidate source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Source backend type
    pub backend: SourceBackend,
    /// Extractor-specific configuration (required when backend = "extractor")
    #[serde(default)]
    pub extractor: Option<ExtractorConfig>,
}

/// Available candidate source backends
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceBackend {
    Extractor,
}

/// Browser-extraction service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Extraction service URL (e.g., "http://localhost:7700")
    pub url: String,
    /// Extraction service API key
    pub api_key: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SanitizedSourceConfig>,
    pub discovery: DiscoveryConfig,
}

/// Sanitized source config (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourceConfig {
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractor: Option<SanitizedExtractorConfig>,
}

/// Sanitized extractor config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedExtractorConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            source: config.source.as_ref().map(|s| SanitizedSourceConfig {
                backend: match s.backend {
                    SourceBackend::Extractor => "extractor".to_string(),
                },
                extractor: s.extractor.as_ref().map(|e| SanitizedExtractorConfig {
                    url: e.url.clone(),
                    api_key_configured: !e.api_key.is_empty(),
                    timeout_secs: e.timeout_secs,
                }),
            }),
            discovery: config.discovery.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, PathBuf::from("pricescout.db"));
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_sanitized_config_redacts_api_key() {
        let config = Config {
            source: Some(SourceConfig {
                backend: SourceBackend::Extractor,
                extractor: Some(ExtractorConfig {
                    url: "http://localhost:7700".to_string(),
                    api_key: "super-secret".to_string(),
                    timeout_secs: 30,
                }),
            }),
            ..Config::default()
        };

        let sanitized = SanitizedConfig::from(&config);
        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("\"api_key_configured\":true"));
    }
}
