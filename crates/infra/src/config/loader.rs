//! Configuration loader
//!
//! Loads application configuration from a file (if one is found) and then
//! overlays environment variables on top. Every vendor credential is
//! optional: a missing one degrades that vendor's adapter, it never fails
//! the load.
//!
//! ## Environment Variables
//! - `HEARTH_CONFIG`: explicit config file path
//! - `HEARTH_BIND_ADDR` / `HEARTH_PUBLIC_BASE_URL`: server settings
//! - `GOVEE_API_KEY`
//! - `AIDOT_DEVICE_HOSTS`: comma-separated host list
//! - `HUE_CLIENT_ID` / `HUE_CLIENT_SECRET`
//! - `SHARK_ACCESS_TOKEN` / `SHARK_USERNAME` / `SHARK_PASSWORD`
//! - `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` / `SPOTIFY_ACCESS_TOKEN`
//!   / `SPOTIFY_LEGACY_AUTH` (true/false)
//! - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` / `GOOGLE_ACCESS_TOKEN`
//!
//! ## File Locations
//! When `HEARTH_CONFIG` is unset the loader probes `./config.toml`,
//! `./config.json`, `./hearth.toml`, `./hearth.json`, then the same names
//! in the parent directory.

use std::path::{Path, PathBuf};

use hearth_domain::{Config, HearthError, Result};

/// Load configuration: file (when present) overlaid with environment.
pub fn load() -> Result<Config> {
    let mut config = match find_config_file() {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration file");
            load_from_file(&path)?
        }
        None => Config::default(),
    };

    apply_env(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Load configuration from a specific file. Format is detected by
/// extension; `.toml` and `.json` are supported.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|err| {
        HearthError::Config(format!("failed to read config file {}: {err}", path.display()))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .map_err(|err| HearthError::Config(format!("invalid TOML config: {err}"))),
        Some("json") => serde_json::from_str(&contents)
            .map_err(|err| HearthError::Config(format!("invalid JSON config: {err}"))),
        other => Err(HearthError::Config(format!(
            "unsupported config extension {:?} for {}",
            other,
            path.display()
        ))),
    }
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("HEARTH_CONFIG") {
        return Some(PathBuf::from(explicit));
    }

    let names = ["config.toml", "config.json", "hearth.toml", "hearth.json"];
    for dir in [".", ".."] {
        for name in names {
            let candidate = Path::new(dir).join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Overlay environment variables onto a config. The lookup is injected so
/// tests can run without touching process-wide state.
pub fn apply_env(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(addr) = lookup("HEARTH_BIND_ADDR") {
        config.server.bind_addr = addr;
    }
    if let Some(base) = lookup("HEARTH_PUBLIC_BASE_URL") {
        config.server.public_base_url = base;
    }

    overlay(&mut config.govee.api_key, lookup("GOVEE_API_KEY"));

    if let Some(hosts) = lookup("AIDOT_DEVICE_HOSTS") {
        config.aidot.device_hosts =
            hosts.split(',').map(str::trim).filter(|h| !h.is_empty()).map(String::from).collect();
    }

    overlay(&mut config.hue.client_id, lookup("HUE_CLIENT_ID"));
    overlay(&mut config.hue.client_secret, lookup("HUE_CLIENT_SECRET"));

    overlay(&mut config.shark.access_token, lookup("SHARK_ACCESS_TOKEN"));
    overlay(&mut config.shark.username, lookup("SHARK_USERNAME"));
    overlay(&mut config.shark.password, lookup("SHARK_PASSWORD"));

    overlay(&mut config.spotify.client_id, lookup("SPOTIFY_CLIENT_ID"));
    overlay(&mut config.spotify.client_secret, lookup("SPOTIFY_CLIENT_SECRET"));
    overlay(&mut config.spotify.access_token, lookup("SPOTIFY_ACCESS_TOKEN"));
    if let Some(flag) = lookup("SPOTIFY_LEGACY_AUTH") {
        config.spotify.legacy_auth = flag.eq_ignore_ascii_case("true") || flag == "1";
    }

    overlay(&mut config.google.client_id, lookup("GOOGLE_CLIENT_ID"));
    overlay(&mut config.google.client_secret, lookup("GOOGLE_CLIENT_SECRET"));
    overlay(&mut config.google.access_token, lookup("GOOGLE_ACCESS_TOKEN"));
}

fn overlay(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}
