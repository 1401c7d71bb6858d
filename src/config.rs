use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LapsecamConfig {
    pub storage: StorageConfig,
    pub timing: TimingConfig,
    pub pins: PinConfig,
    pub lcd: LcdConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory holding the numbered session directories
    pub base_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct TimingConfig {
    /// Nominal tick period of the main loop in milliseconds
    pub tick_millis: u64,

    /// LED flash duration after each capture in milliseconds
    pub flash_millis: u64,

    /// Combined hold duration that triggers graceful shutdown, in seconds
    pub shutdown_hold_secs: u64,

    /// How long the version banner stays on the display at boot, in milliseconds
    pub banner_millis: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PinConfig {
    /// BCM pin for the capture-toggle button (negative logic)
    pub toggle_button: u8,

    /// BCM pin for the menu-cycle button (negative logic)
    pub menu_button: u8,

    /// BCM pin for the select button (negative logic)
    pub select_button: u8,

    /// BCM pins of the 4-bit BCD interval dial, most significant bit first
    pub dial: [u8; 4],

    /// BCM pin driving the capture indicator LED
    pub led: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LcdConfig {
    pub rs: u8,
    pub en: u8,
    pub d4: u8,
    pub d5: u8,
    pub d6: u8,
    pub d7: u8,
    pub columns: u8,
    pub rows: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CameraConfig {
    /// Still-capture command invoked per frame
    pub command: String,

    /// Sensor rotation in degrees
    pub rotation: u16,
}

impl LapsecamConfig {
    /// Load configuration from the default file path plus environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("lapsecam.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            // Configuration file (optional; defaults apply when absent)
            .add_source(File::with_name(&path_str).required(false))
            // Environment variables with LAPSECAM_ prefix
            .add_source(Environment::with_prefix("LAPSECAM").separator("_"))
            .build()?;

        let config: LapsecamConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.base_dir.is_empty() {
            return Err(ConfigError::Message(
                "Storage base_dir must not be empty".to_string(),
            ));
        }

        if self.timing.tick_millis == 0 {
            return Err(ConfigError::Message(
                "Tick period must be greater than 0".to_string(),
            ));
        }

        if self.timing.flash_millis == 0 {
            return Err(ConfigError::Message(
                "Flash duration must be greater than 0".to_string(),
            ));
        }

        if self.timing.shutdown_hold_secs == 0 {
            return Err(ConfigError::Message(
                "Shutdown hold span must be greater than 0".to_string(),
            ));
        }

        if self.lcd.columns == 0 || self.lcd.rows < 2 {
            return Err(ConfigError::Message(
                "LCD must have at least one column and two rows".to_string(),
            ));
        }

        if !matches!(self.camera.rotation, 0 | 90 | 180 | 270) {
            return Err(ConfigError::Message(
                "Camera rotation must be one of 0, 90, 180, 270".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for LapsecamConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            timing: TimingConfig::default(),
            pins: PinConfig::default(),
            lcd: LcdConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: "/var/lapse".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_millis: 50,
            flash_millis: 200,
            shutdown_hold_secs: 4,
            banner_millis: 1500,
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            toggle_button: 12,
            menu_button: 5,
            select_button: 6,
            dial: [26, 13, 19, 16],
            led: 14,
        }
    }
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            rs: 25,
            en: 24,
            d4: 23,
            d5: 17,
            d6: 21,
            d7: 22,
            columns: 16,
            rows: 2,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: "libcamera-still".to_string(),
            rotation: 270,
        }
    }
}
