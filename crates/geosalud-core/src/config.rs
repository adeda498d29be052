use crate::error::{GeosaludError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for GeoSalud
///
/// Precedence: defaults < config file < environment < CLI flags.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// IPRESS hospital registry (delimited text, Latin-1)
    pub hospitals: ConfigValue<PathBuf>,
    /// District polygon shapefile
    pub districts: ConfigValue<PathBuf>,
    /// Population-center point shapefile
    pub centers: ConfigValue<PathBuf>,
    /// Buffer radius in kilometers for the proximity analysis
    pub buffer_km: ConfigValue<f64>,
    /// Department analyzed when none is given on the command line
    pub department: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            hospitals: ConfigValue::new(PathBuf::from("IPRESS.csv"), ConfigSource::Default),
            districts: ConfigValue::new(PathBuf::from("DISTRITOS.shp"), ConfigSource::Default),
            centers: ConfigValue::new(PathBuf::from("CCPP_IGN100K.shp"), ConfigSource::Default),
            buffer_km: ConfigValue::new(10.0, ConfigSource::Default),
            department: ConfigValue::new("Lima".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeosaludError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeosaludError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(hospitals) = file_config.hospitals {
            self.hospitals.update(hospitals, ConfigSource::File);
        }

        if let Some(districts) = file_config.districts {
            self.districts.update(districts, ConfigSource::File);
        }

        if let Some(centers) = file_config.centers {
            self.centers.update(centers, ConfigSource::File);
        }

        if let Some(buffer_km) = file_config.buffer_km {
            validate_buffer_km(buffer_km)?;
            self.buffer_km.update(buffer_km, ConfigSource::File);
        }

        if let Some(department) = file_config.department {
            self.department.update(department, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(path) = env::var("GEOSALUD_HOSPITALS") {
            self.hospitals.update(PathBuf::from(path), ConfigSource::Environment);
        }

        if let Ok(path) = env::var("GEOSALUD_DISTRICTS") {
            self.districts.update(PathBuf::from(path), ConfigSource::Environment);
        }

        if let Ok(path) = env::var("GEOSALUD_CENTERS") {
            self.centers.update(PathBuf::from(path), ConfigSource::Environment);
        }

        if let Ok(km_str) = env::var("GEOSALUD_BUFFER_KM") {
            match km_str.parse::<f64>() {
                Ok(km) if km > 0.0 => self.buffer_km.update(km, ConfigSource::Environment),
                _ => tracing::warn!(
                    "Invalid GEOSALUD_BUFFER_KM value '{}': expected a positive number",
                    km_str
                ),
            }
        }

        if let Ok(department) = env::var("GEOSALUD_DEPARTMENT") {
            self.department.update(department, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(hospitals) = overrides.hospitals {
            self.hospitals.update(hospitals, ConfigSource::Cli);
        }

        if let Some(districts) = overrides.districts {
            self.districts.update(districts, ConfigSource::Cli);
        }

        if let Some(centers) = overrides.centers {
            self.centers.update(centers, ConfigSource::Cli);
        }

        if let Some(buffer_km) = overrides.buffer_km {
            self.buffer_km.update(buffer_km, ConfigSource::Cli);
        }

        if let Some(department) = overrides.department {
            self.department.update(department, ConfigSource::Cli);
        }
    }
}

fn validate_buffer_km(km: f64) -> Result<()> {
    if km > 0.0 && km.is_finite() {
        Ok(())
    } else {
        Err(GeosaludError::ConfigInvalid {
            key: "buffer_km".to_string(),
            reason: format!("Buffer radius must be a positive number of kilometers, got {}", km),
        })
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    hospitals: Option<PathBuf>,
    districts: Option<PathBuf>,
    centers: Option<PathBuf>,
    buffer_km: Option<f64>,
    department: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub hospitals: Option<PathBuf>,
    pub districts: Option<PathBuf>,
    pub centers: Option<PathBuf>,
    pub buffer_km: Option<f64>,
    pub department: Option<String>,
}
