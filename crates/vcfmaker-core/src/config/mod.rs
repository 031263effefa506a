use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    DEFAULT_INPUT_PATH, DEFAULT_NAME_FIELD, DEFAULT_PHONE_FIELD, DEFAULT_PHONE_LABEL,
};
use crate::error::{CoreError, CoreResult};

/// Name of the optional configuration file read from the working directory.
pub const CONFIG_FILE_NAME: &str = "vcfmaker.toml";

/// Prefix for environment overrides, e.g. `VCFMAKER__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "VCFMAKER";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub defaults: ConversionDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Values used when the command line leaves a setting out.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionDefaults {
    pub input: String,
    pub name_field: String,
    pub phone_field: String,
    pub phone_label: String,
    pub prefix: String,
    pub postfix: String,
    pub interactive: bool,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_PATH.to_string(),
            name_field: DEFAULT_NAME_FIELD.to_string(),
            phone_field: DEFAULT_PHONE_FIELD.to_string(),
            phone_label: DEFAULT_PHONE_LABEL.to_string(),
            prefix: String::new(),
            postfix: String::new(),
            interactive: true,
        }
    }
}

impl ConversionDefaults {
    /// ## Summary
    /// Rejects defaults that leave a run with nothing to read.
    ///
    /// ## Errors
    /// Returns `ConfigError` if `defaults.input` is blank.
    pub fn validate(&self) -> CoreResult<()> {
        if self.input.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "defaults.input must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from built-in defaults, the optional `vcfmaker.toml`
    /// file, and `VCFMAKER__*` environment variables, in increasing precedence.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing, or validating the
    /// configuration fails.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.defaults.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Returns a builder pre-populated with every default so partial sources
    /// still deserialize.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be set.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = ConversionDefaults::default();
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("defaults.input", defaults.input)?
            .set_default("defaults.name_field", defaults.name_field)?
            .set_default("defaults.phone_field", defaults.phone_field)?
            .set_default("defaults.phone_label", defaults.phone_label)?
            .set_default("defaults.prefix", defaults.prefix)?
            .set_default("defaults.postfix", defaults.postfix)?
            .set_default("defaults.interactive", defaults.interactive)?)
    }
}

/// ## Summary
/// Loads configuration after reading a `.env` file if one is present.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(level = %settings.logging.level, "Configuration loaded");
    Ok(settings)
}
