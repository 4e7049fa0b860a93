use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub obs: ObsSettings,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ObsSettings {
    #[serde(default = "default_obs_url")]
    pub url: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ObsSettings {
    fn default() -> Self {
        Self {
            url: default_obs_url(),
            password: String::new(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_scene")]
    pub scene: String,
    #[serde(default = "default_layer")]
    pub layer: i64,
    /// Inputs muted while gateway-driven playback runs.
    #[serde(default)]
    pub mute_sources: Vec<String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            scene: default_scene(),
            layer: default_layer(),
            mute_sources: Vec::new(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:5050".into()
}

fn default_obs_url() -> String {
    "ws://127.0.0.1:4455".into()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_scene() -> String {
    "Scene 1".into()
}

fn default_layer() -> i64 {
    1
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            tracing::info!("config file not found at '{}', using defaults", path);
            Config::default()
        };

        // Environment variable overrides
        if let Ok(value) = std::env::var("SCENECAST_BIND_ADDRESS") {
            config.server.bind_address = value;
        }
        if let Ok(value) = std::env::var("SCENECAST_OBS_URL") {
            config.obs.url = value;
        }
        if let Ok(value) = std::env::var("SCENECAST_OBS_PASSWORD") {
            config.obs.password = value;
        }
        if let Ok(value) = std::env::var("SCENECAST_OBS_CONNECT_TIMEOUT_SECS") {
            if let Ok(parsed) = value.parse::<u64>() {
                config.obs.connect_timeout_secs = parsed;
            }
        }
        if let Ok(value) = std::env::var("SCENECAST_OBS_REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = value.parse::<u64>() {
                config.obs.request_timeout_secs = parsed;
            }
        }
        if let Ok(value) = std::env::var("SCENECAST_SCENE") {
            config.playback.scene = value;
        }
        if let Ok(value) = std::env::var("SCENECAST_LAYER") {
            match value.parse::<i64>() {
                Ok(parsed) => config.playback.layer = parsed,
                Err(_) => {
                    tracing::warn!("ignoring non-numeric SCENECAST_LAYER value '{}'", value);
                }
            }
        }
        if let Ok(value) = std::env::var("SCENECAST_MUTE_SOURCES") {
            config.playback.mute_sources = parse_mute_sources(&value);
        }

        Ok(config)
    }
}

/// Split a comma-separated source list, trimming entries and dropping
/// empties.
pub fn parse_mute_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mute_sources_trims_and_drops_empties() {
        assert_eq!(
            parse_mute_sources(" Mic , Desktop Audio ,,music"),
            vec!["Mic", "Desktop Audio", "music"]
        );
        assert!(parse_mute_sources("").is_empty());
        assert!(parse_mute_sources(" , ,").is_empty());
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:5050");
        assert_eq!(config.obs.url, "ws://127.0.0.1:4455");
        assert_eq!(config.playback.scene, "Scene 1");
        assert_eq!(config.playback.layer, 1);
        assert!(config.playback.mute_sources.is_empty());
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let config: Config = toml::from_str(
            r#"
            [obs]
            url = "ws://10.0.0.4:4455"

            [playback]
            mute_sources = ["Mic"]
            "#,
        )
        .unwrap();
        assert_eq!(config.obs.url, "ws://10.0.0.4:4455");
        assert_eq!(config.obs.connect_timeout_secs, 5);
        assert_eq!(config.playback.scene, "Scene 1");
        assert_eq!(config.playback.mute_sources, vec!["Mic"]);
    }
}
