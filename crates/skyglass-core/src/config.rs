use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{AppError, ConfigError};

/// Environment variable that overrides `weather.api_key`
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// One problem found in a config file, tied to its dotted field path.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

/// Errors block startup; warnings are only logged.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn issue(field: impl Into<String>, message: impl Into<String>) -> ConfigIssue {
        ConfigIssue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Self::issue(field, message));
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Self::issue(field, message));
    }

    pub fn error_summary(&self) -> String {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Display preferences
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key (the environment variable takes precedence)
    #[serde(default)]
    pub api_key: Option<String>,

    /// OpenWeatherMap API host
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// IP geolocation endpoint used when no city is given
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,

    /// City used when IP geolocation fails
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Language code passed to the API for localized descriptions
    #[serde(default)]
    pub language: Option<String>,

    /// Refresh interval in minutes for watch mode
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_geolocation_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_city() -> String {
    "Dehradun".to_string()
}

fn default_refresh_minutes() -> u32 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            geolocation_url: default_geolocation_url(),
            default_city: default_city(),
            language: None,
            refresh_minutes: default_refresh_minutes(),
        }
    }
}

impl WeatherConfig {
    /// API key from the environment, falling back to the config file
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|k| !k.trim().is_empty() && !k.starts_with("YOUR_"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    /// Viewport width used to size background images
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
}

fn default_viewport_width() -> u32 {
    1440
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            viewport_width: default_viewport_width(),
        }
    }
}

impl Config {
    /// Read the config file in the user's config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Read `path`, writing a default file there first when none exists.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load from `path` (or the default location) and reject configs with
    /// validation errors. Warnings are logged and returned.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };

        let report = config.validate();
        if !report.is_valid() {
            let err = AppError::Config(ConfigError::Invalid(report.error_summary()));
            return Err(err.into());
        }
        for warning in &report.warnings {
            tracing::warn!("Config: {}", warning);
        }

        Ok((config, report))
    }

    /// Check URLs, the default city, and display settings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::check_endpoint(
            &self.weather.api_base_url,
            "weather.api_base_url",
            &mut result,
        );
        Self::check_endpoint(
            &self.weather.geolocation_url,
            "weather.geolocation_url",
            &mut result,
        );

        if self.weather.default_city.trim().is_empty() {
            result.add_error("weather.default_city", "Default city must not be empty");
        }

        if self.weather.resolved_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!(
                    "No API key configured - set {} or weather.api_key",
                    API_KEY_ENV
                ),
            );
        }

        if self.weather.refresh_minutes == 0 {
            result.add_warning(
                "weather.refresh_minutes",
                "0 means watch mode refreshes every minute",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "refreshing less than once a day",
            );
        }

        if self.display.viewport_width == 0 {
            result.add_error(
                "display.viewport_width",
                "Viewport width must be greater than 0",
            );
        } else if self.display.viewport_width > 10000 {
            result.add_warning(
                "display.viewport_width",
                "Viewport width is unusually large (>10000)",
            );
        }

        result
    }

    fn check_endpoint(value: &str, field: &str, report: &mut ValidationResult) {
        let url = match Url::parse(value) {
            Ok(url) => url,
            Err(e) => {
                report.add_error(field, format!("not a URL ({})", e));
                return;
            }
        };

        if !matches!(url.scheme(), "http" | "https") {
            report.add_error(
                field,
                format!("expected an http or https URL, got {}", url.scheme()),
            );
        }
        if url.host_str().map_or(true, str::is_empty) {
            report.add_error(field, "URL has no host");
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let body = toml::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))
    }

    /// `<config dir>/skyglass/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("no config directory on this platform")?;
        Ok(base.join("skyglass").join("config.toml"))
    }
}
