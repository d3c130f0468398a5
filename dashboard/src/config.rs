//! Configuration management for the warehouse dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WMS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{validate_copies, LabelSize, LabelTemplate};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Origin used to build product lookup URLs
    pub origin: String,

    /// Currency code shown next to money values
    pub currency: String,

    /// Label printing defaults
    pub labels: LabelConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LabelConfig {
    pub size: LabelSize,
    pub template: LabelTemplate,
    /// Copies per print job, clamped to 1..=10
    pub copies: u32,
    /// Print today's date on the label
    pub include_date: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Directive string for `EnvFilter`, used when RUST_LOG is unset
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WMS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("origin", "http://localhost:3000")?
            .set_default("currency", "USD")?
            .set_default("labels.size", "medium")?
            .set_default("labels.template", "detailed")?
            .set_default("labels.copies", 1)?
            .set_default("labels.include_date", true)?
            .set_default("logging.filter", "wms_dashboard=debug,warehouse_dashboard=debug")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WMS_ prefix)
            .add_source(
                Environment::with_prefix("WMS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no view could honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_copies(self.labels.copies)
            .map_err(|msg| ConfigError::Message(format!("labels.copies: {}", msg)))
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            size: LabelSize::default(),
            template: LabelTemplate::default(),
            copies: 1,
            include_date: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wms_dashboard=debug,warehouse_dashboard=debug".to_string(),
            json: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            origin: "http://localhost:3000".to_string(),
            currency: "USD".to_string(),
            labels: LabelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
