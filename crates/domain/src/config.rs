//! Configuration structures
//!
//! Every vendor section is optional: a missing credential degrades that
//! vendor's adapter to its mock or unconfigured fallback, it never prevents
//! the service from starting.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub govee: GoveeConfig,
    #[serde(default)]
    pub aidot: AiDotConfig,
    #[serde(default)]
    pub hue: HueConfig,
    #[serde(default)]
    pub shark: SharkConfig,
    #[serde(default)]
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub google: GoogleConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Public base URL used to build OAuth redirect URIs.
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Govee cloud API settings (static API key auth)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoveeConfig {
    pub api_key: Option<String>,
}

/// AI Dot local-network settings
///
/// Entries are host/authority strings, e.g. `192.168.4.41` or
/// `192.168.4.52:8080`. There is no automatic discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiDotConfig {
    #[serde(default)]
    pub device_hosts: Vec<String>,
}

/// Philips Hue OAuth settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HueConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Shark (Ayla Networks) settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharkConfig {
    pub access_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Spotify settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Token pasted in manually by the operator; seeds the credential store.
    pub access_token: Option<String>,
    /// Enables the manual exchange and implicit-grant bootstrap routes.
    #[serde(default)]
    pub legacy_auth: bool,
}

/// Google Calendar OAuth settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Externally-obtained access token for the calendar sync adapter.
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_deserializes_with_defaults() {
        let config: Config = toml_like_empty();
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
        assert!(config.govee.api_key.is_none());
        assert!(config.aidot.device_hosts.is_empty());
        assert!(!config.spotify.legacy_auth);
    }

    fn toml_like_empty() -> Config {
        serde_json::from_str("{}").unwrap()
    }
}
