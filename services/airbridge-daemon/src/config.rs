//! Configuration load, validation, and persistence.
//!
//! The configuration file is JSON, consumed once at startup and rewritten
//! only when the controller zone id is changed over the bus. Persistence
//! goes through a temp file in the same directory followed by a rename so
//! a crash never leaves a half-written file behind.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use airbridge_domain::{BridgeContext, DeviceIdentity, SensorDefinition, SensorTable};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
const DEFAULT_SENSOR_CAPACITY: usize = 20;

/// Configuration errors. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to write configuration: {0}")]
    WriteError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// One sensor channel as configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    pub sensor_type: u32,
    pub sensor_usage: u32,
}

/// The bridge configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Appliance hardware identifier. Mandatory.
    pub id: String,
    /// Appliance network address (host or host:port). Mandatory.
    pub address: String,
    /// Shared secret for payload decryption. Mandatory.
    pub secret: String,
    /// Display name, composed into sensor names.
    #[serde(default = "default_name")]
    pub name: String,
    /// Controller identifier on the bus.
    #[serde(default)]
    pub controller_id: String,
    /// Container identifier on the bus.
    #[serde(default)]
    pub container_id: String,
    /// Device identifier on the bus.
    #[serde(default)]
    pub device_id: String,
    /// Default zone assignment, settable over the bus.
    #[serde(default)]
    pub zone_id: u64,
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Maximum number of sensor table entries.
    #[serde(default = "default_sensor_capacity")]
    pub sensor_capacity: usize,
    /// Ordered sensor definitions; order fixes the bus ordinals.
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

fn default_name() -> String {
    "AirQ".to_string()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_sensor_capacity() -> usize {
    DEFAULT_SENSOR_CAPACITY
}

impl BridgeConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: BridgeConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "mandatory parameter 'id' is not set".to_string(),
            ));
        }
        if self.address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "mandatory parameter 'address' is not set".to_string(),
            ));
        }
        if self.secret.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "mandatory parameter 'secret' is not set".to_string(),
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.sensors.len() > self.sensor_capacity {
            return Err(ConfigError::ValidationError(format!(
                "{} sensors configured but capacity is {}",
                self.sensors.len(),
                self.sensor_capacity
            )));
        }
        Ok(())
    }

    /// Persist the configuration atomically next to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        let tmp: PathBuf = path.with_extension("cfg.new");
        std::fs::write(&tmp, contents).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(ConfigError::WriteError(e.to_string()));
        }
        Ok(())
    }

    /// Build the runtime context from the loaded configuration.
    ///
    /// Definitions are pushed in file order and all marked active, which
    /// establishes the contiguous active prefix the sensor table relies
    /// on.
    pub fn build_context(&self) -> Result<BridgeContext, ConfigError> {
        let mut table = SensorTable::with_capacity(self.sensor_capacity);
        for sensor in &self.sensors {
            table
                .push(SensorDefinition {
                    name: sensor.name.clone(),
                    sensor_type: sensor.sensor_type,
                    sensor_usage: sensor.sensor_usage,
                    active: true,
                })
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        Ok(BridgeContext::new(
            DeviceIdentity {
                id: self.id.clone(),
                address: self.address.clone(),
                secret: self.secret.clone(),
                name: self.name.clone(),
                zone_id: self.zone_id,
            },
            table,
            self.zone_id,
        ))
    }
}
