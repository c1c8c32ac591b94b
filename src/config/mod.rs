use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::DEFAULT_HANDSHAKE_LATENCY_MS;
use crate::demo::{CurrentDemo, DemoKind};

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Demo mode opened on startup
    #[serde(default)]
    pub demo: DemoKind,

    /// Whether the simulated platform reports AR support.
    /// Set to false to exercise the "AR not supported" path.
    #[serde(default = "default_true")]
    pub ar_supported: bool,

    /// Simulated latency of each handshake step in milliseconds
    #[serde(default = "default_latency")]
    pub handshake_latency_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_latency() -> u64 {
    DEFAULT_HANDSHAKE_LATENCY_MS
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            demo: DemoKind::default(),
            ar_supported: true,
            handshake_latency_ms: DEFAULT_HANDSHAKE_LATENCY_MS,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Load configuration from disk, falling back to defaults on any error
fn load_config() -> AppConfig {
    let config_path = crate::paths::config_file();

    let data = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    data
                }
                Err(e) => {
                    warn!("Failed to parse config file, using defaults: {}", e);
                    AppConfigData::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file, using defaults: {}", e);
                AppConfigData::default()
            }
        }
    } else {
        info!("No config file found, using defaults");
        AppConfigData::default()
    };

    AppConfig {
        data,
        config_path,
        dirty: false,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(mut config: ResMut<AppConfig>) {
    let loaded = load_config();
    config.data = loaded.data;
    config.config_path = loaded.config_path;
    config.dirty = false;
}

/// Startup system to apply the persisted demo mode
fn apply_config_to_demo(config: Res<AppConfig>, mut current: ResMut<CurrentDemo>) {
    current.kind = config.data.demo;
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_message::<SaveConfigRequest>()
            .add_systems(PreStartup, load_config_system)
            .add_systems(Startup, apply_config_to_demo)
            .add_systems(Update, save_config_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_data() {
        let data = AppConfigData::default();
        assert_eq!(data.demo, DemoKind::Placement);
        assert!(data.ar_supported);
        assert_eq!(data.handshake_latency_ms, DEFAULT_HANDSHAKE_LATENCY_MS);
    }

    #[test]
    fn test_config_round_trip() {
        let data = AppConfigData {
            demo: DemoKind::Orbit,
            ar_supported: false,
            handshake_latency_ms: 10,
        };
        let json = serde_json::to_string(&data).unwrap();
        let back: AppConfigData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.demo, DemoKind::Orbit);
        assert!(!back.ar_supported);
        assert_eq!(back.handshake_latency_ms, 10);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let back: AppConfigData = serde_json::from_str("{}").unwrap();
        assert_eq!(back.demo, DemoKind::Placement);
        assert!(back.ar_supported);
        assert_eq!(back.handshake_latency_ms, DEFAULT_HANDSHAKE_LATENCY_MS);
    }
}
